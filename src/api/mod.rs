//! REST API endpoints.
//!
//! Axum-based HTTP API serving leaderboards, chart datasets and
//! character details. Every request loads the dataset once and runs the
//! pure ranking pipeline over it.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::calculate::RankingError;
use crate::config::RankingConfig;
use crate::models::Kind;
use crate::storage::StorageError;

use self::state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<RankingError> for ApiError {
    fn from(e: RankingError) -> Self {
        match e {
            RankingError::InvalidPageSize | RankingError::InvalidPageNumber(_) => {
                ApiError::BadRequest(e.to_string())
            }
            RankingError::PaletteMismatch { .. } => ApiError::Internal(e.to_string()),
        }
    }
}

/// Resolve a kind from a path segment.
pub fn resolve_kind(raw: &str) -> Result<Kind, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("kind '{}'", raw)))
}

/// Pagination parameters (1-based page numbers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Pagination {
    /// Apply configured defaults and reject out-of-contract values.
    pub fn new(
        page: Option<usize>,
        page_size: Option<usize>,
        config: &RankingConfig,
    ) -> Result<Self, ApiError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(ApiError::BadRequest("page starts at 1".to_string()));
        }

        let page_size = page_size.unwrap_or(config.page_size);
        if page_size == 0 || page_size > config.max_page_size {
            return Err(ApiError::BadRequest(format!(
                "page_size must be between 1 and {}",
                config.max_page_size
            )));
        }

        Ok(Self { page, page_size })
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        "*" => layer.allow_origin(Any),
        other => match HeaderValue::from_str(other) {
            Ok(value) => layer.allow_origin(value),
            Err(_) => {
                tracing::warn!("Invalid CORS origin {:?}, allowing any", other);
                layer.allow_origin(Any)
            }
        },
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/api/health", get(routes::kinds::health))
        .route("/api/kinds", get(routes::kinds::list_kinds))
        .route("/api/rankings/:kind", get(routes::rankings::ranking_view))
        .route(
            "/api/rankings/:kind/chart",
            get(routes::rankings::ranking_chart),
        )
        .route(
            "/api/characters/:id",
            get(routes::characters::character_detail),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
