use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::models::Kind;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Debug, Serialize)]
pub struct KindSummary {
    pub kind: Kind,
    pub label: &'static str,
    pub prefix: &'static str,
    pub is_default: bool,
}

#[derive(Debug, Serialize)]
pub struct KindsResponse {
    pub kinds: Vec<KindSummary>,
}

pub async fn list_kinds(State(state): State<AppState>) -> Json<KindsResponse> {
    let default_kind = state.config.ranking.default_kind;
    let kinds = Kind::ALL
        .iter()
        .map(|&kind| KindSummary {
            kind,
            label: kind.label(),
            prefix: kind.prefix(),
            is_default: kind == default_kind,
        })
        .collect();

    Json(KindsResponse { kinds })
}
