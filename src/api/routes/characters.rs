use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::CharacterDetail;
use crate::models::CharacterId;

pub async fn character_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CharacterDetail>, ApiError> {
    let entries = state.dataset.fetch_all()?;
    let id = CharacterId::from(id);

    CharacterDetail::build(&entries, &id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("character '{}'", id)))
}
