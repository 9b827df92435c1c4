use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::PaginationMeta;
use crate::models::{LeaderboardEntry, LeaderboardMode, SeasonFilter, StatKey};

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub stat: Option<String>,
    pub season: Option<String>,
    pub mode: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub stat: StatKey,
    pub season: String,
    pub mode: LeaderboardMode,
    pub entries: Vec<LeaderboardEntry>,
    pub pagination: PaginationMeta,
    /// "showing X–Y of N"
    pub showing: String,
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let stat: StatKey = match params.stat.as_deref() {
        Some(s) => s.parse().map_err(ApiError::BadRequest)?,
        None => StatKey::Points,
    };
    let mode: LeaderboardMode = match params.mode.as_deref() {
        Some(m) => m.parse().map_err(ApiError::BadRequest)?,
        None => LeaderboardMode::default(),
    };
    let season = SeasonFilter::parse(params.season.as_deref());
    let pagination = state.pagination(params.page, params.page_size);

    let page = state
        .engine
        .leaderboard(stat, &season, mode, &pagination)
        .await?;

    Ok(Json(LeaderboardResponse {
        stat,
        season: season.to_string(),
        mode,
        showing: page.meta.summary(),
        entries: page.items,
        pagination: page.meta,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_default_leaderboard_is_points_averages() {
        let app = build_router(state_with(sample_league()).await);
        let (status, json) = get_json(app, "/api/leaderboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stat"], "points");
        assert_eq!(json["mode"], "averages");

        let entries = json["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["player_name"], "Ada");
        assert_eq!(entries[0]["rank"], 1);
        assert_eq!(entries[0]["value"], 25.0);
        assert_eq!(json["showing"], "showing 1\u{2013}2 of 2");
    }

    #[tokio::test]
    async fn test_totals_with_paging() {
        let app = build_router(state_with(sample_league()).await);
        let (_, json) = get_json(
            app,
            "/api/leaderboard?stat=pts&mode=totals&season=2024-25&page=2&page_size=1",
        )
        .await;

        let entries = json["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["player_name"], "Bo");
        assert_eq!(entries[0]["rank"], 2);
        assert_eq!(entries[0]["value"], 18.0);
        assert_eq!(json["pagination"]["has_prev"], true);
        assert_eq!(json["pagination"]["has_next"], false);
        assert_eq!(json["showing"], "showing 2\u{2013}2 of 2");
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let app = build_router(state_with(sample_league()).await);
        let (status, json) = get_json(app, "/api/leaderboard?page=9").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["entries"].as_array().unwrap().is_empty());
        assert_eq!(json["showing"], "showing 0\u{2013}0 of 2");
    }

    #[tokio::test]
    async fn test_unknown_stat_or_mode() {
        let state = state_with(sample_league()).await;
        let (status, json) =
            get_json(build_router(state.clone()), "/api/leaderboard?stat=dunks").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");

        let (status, _) = get_json(build_router(state), "/api/leaderboard?mode=median").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
