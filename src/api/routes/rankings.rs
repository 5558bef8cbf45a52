use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::{resolve_kind, ApiError, Pagination};
use crate::calculate::{ChartDataset, RankingView};

#[derive(Debug, Deserialize)]
pub struct RankingParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

fn build_view(state: &AppState, kind: &str, params: &RankingParams) -> Result<RankingView, ApiError> {
    let kind = resolve_kind(kind)?;
    let pagination = Pagination::new(params.page, params.page_size, &state.config.ranking)?;
    let entries = state.dataset.fetch_all()?;

    let view = RankingView::build(&entries, kind, pagination.page, pagination.page_size)?;
    tracing::debug!(
        "Built {} page {} with {} rows",
        kind,
        pagination.page,
        view.rows.len()
    );
    Ok(view)
}

pub async fn ranking_view(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<RankingParams>,
) -> Result<Json<RankingView>, ApiError> {
    build_view(&state, &kind, &params).map(Json)
}

pub async fn ranking_chart(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<RankingParams>,
) -> Result<Json<ChartDataset>, ApiError> {
    build_view(&state, &kind, &params).map(|view| Json(view.chart))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::{get, get_json, test_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_first_page() {
        let (status, json) = get("/api/rankings/local").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["kind"], "local");
        assert_eq!(json["rows"].as_array().unwrap().len(), 10);
        assert_eq!(json["rows"][0]["rank"], 1);
        assert!(json["rows"][0]["behind"].is_null());
        // Local n ends on 1000 - 30n points, having gained 500 - 10n
        assert_eq!(json["rows"][0]["point"], 970);
        assert_eq!(json["rows"][0]["point_delta"], 490);
        assert_eq!(json["rows"][5]["behind"], 30);
        assert_eq!(json["pagination"]["count"], 11);
        assert_eq!(json["pagination"]["page_count"], 2);
        assert_eq!(json["pagination"]["has_next"], true);
        assert_eq!(json["chart"]["series"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_second_page_neighbor_from_previous_page() {
        let (status, json) = get("/api/rankings/local?page=2").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "l11");
        assert_eq!(rows[0]["behind"], 30);
        assert_eq!(json["pagination"]["has_prev"], true);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let (status, json) = get("/api/rankings/company?page=9").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["rows"].as_array().unwrap().is_empty());
        assert!(json["chart"]["series"].as_array().unwrap().is_empty());
        assert_eq!(json["pagination"]["count"], 2);
    }

    #[tokio::test]
    async fn test_custom_page_size() {
        let (status, json) = get("/api/rankings/local?page=3&page_size=4").await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = json["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["l9", "l10", "l11"]);
        assert_eq!(json["pagination"]["page_count"], 3);
    }

    #[tokio::test]
    async fn test_unknown_kind_is_not_found() {
        let (status, json) = get("/api/rankings/alien").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_bad_pagination_is_rejected() {
        let (status, json) = get("/api/rankings/local?page=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");

        let (status, _) = get("/api/rankings/local?page_size=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get("/api/rankings/local?page_size=500").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chart_endpoint() {
        let (status, json) = get("/api/rankings/company/chart").await;

        assert_eq!(status, StatusCode::OK);
        let series = json["series"].as_array().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0]["label"], "Company 1");
        assert_eq!(series[0]["color"], "#ff0029");
        assert_eq!(series[1]["color"], "#377eb8");
        assert_eq!(series[0]["points"][0]["y"], 300);
        assert_eq!(series[0]["points"][0]["date"], "2020-08-10");
    }

    #[tokio::test]
    async fn test_empty_dataset() {
        let app = build_router(test_state(Vec::new()));
        let (status, json) = get_json(app, "/api/rankings/local").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["rows"].as_array().unwrap().is_empty());
        assert_eq!(json["pagination"]["page_count"], 0);
    }
}
