use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::engine::StatLineChange;
use crate::models::{NewStatLine, StatLineId, StatLinePatch};

pub async fn create_stat_line(
    State(state): State<AppState>,
    Json(new): Json<NewStatLine>,
) -> Result<(StatusCode, Json<StatLineChange>), ApiError> {
    let change = state.engine.create_stat_line(new).await?;
    Ok((StatusCode::CREATED, Json(change)))
}

pub async fn update_stat_line(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<StatLinePatch>,
) -> Result<Json<StatLineChange>, ApiError> {
    let change = state
        .engine
        .update_stat_line(&StatLineId::from(id), &patch)
        .await?;
    Ok(Json(change))
}

pub async fn delete_stat_line(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatLineChange>, ApiError> {
    let change = state.engine.delete_stat_line(&StatLineId::from(id)).await?;
    Ok(Json(change))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_stat_line() {
        let data = sample_league();
        let bo = data.players[1].id.to_string();
        let state = state_with(data).await;

        let body = json!({
            "player_id": bo,
            "date": "2025-01-09",
            "opponent": "Bears",
            "result": "L",
            "points": 22,
            "field_goals_made": 9,
            "field_goals_attempted": 17
        });
        let (status, json) = send(
            build_router(state.clone()),
            "POST",
            "/api/stat-lines",
            Some(&body.to_string()),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["line"]["points"], 22);
        assert!(json["line"]["game_id"].is_null());
        assert_eq!(json["profile"]["games_played"], 2);
        assert_eq!(json["profile"]["points"], 20.0);

        let (_, player) = get_json(build_router(state), &format!("/api/players/{}", bo)).await;
        assert_eq!(player["profile"]["points"], 20.0);
    }

    #[tokio::test]
    async fn test_create_rejects_made_over_attempted() {
        let data = sample_league();
        let bo = data.players[1].id.to_string();
        let app = build_router(state_with(data).await);

        let body = json!({
            "player_id": bo,
            "date": "2025-01-09",
            "opponent": "Bears",
            "result": "W",
            "three_pointers_made": 4,
            "three_pointers_attempted": 2
        });
        let (status, json) = send(app, "POST", "/api/stat-lines", Some(&body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_create_for_unknown_player() {
        let app = build_router(state_with(sample_league()).await);
        let body = json!({
            "player_id": "ghost",
            "date": "2025-01-09",
            "opponent": "Bears",
            "result": "W"
        });
        let (status, _) = send(app, "POST", "/api/stat-lines", Some(&body.to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_patch_and_delete() {
        let data = sample_league();
        let line_id = data.stat_lines[2].id.to_string();
        let state = state_with(data).await;
        let uri = format!("/api/stat-lines/{}", line_id);

        let (status, json) = send(
            build_router(state.clone()),
            "PATCH",
            &uri,
            Some(r#"{"points": 12, "field_goals_made": 6}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["line"]["points"], 12);
        assert_eq!(json["profile"]["points"], 12.0);

        let (status, _) = send(
            build_router(state.clone()),
            "PATCH",
            &uri,
            Some(r#"{"blocks": -1}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = send(build_router(state.clone()), "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["profile"]["games_played"], 0);
        assert_eq!(json["profile"]["points"], 0.0);

        let (status, _) = send(build_router(state), "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
