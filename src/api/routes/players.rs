use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Player, PlayerId, PlayerSeasonProfile};

#[derive(Debug, Serialize)]
pub struct PlayerResponse {
    #[serde(flatten)]
    pub player: Player,
    /// False while a failed write has left the profile behind its lines
    pub profile_current: bool,
}

#[derive(Debug, Serialize)]
pub struct RecomputeResponse {
    pub player_id: PlayerId,
    pub profile: PlayerSeasonProfile,
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlayerResponse>, ApiError> {
    let id = PlayerId::from(id);
    let player = state.engine.get_player(&id).await?;
    let profile_current = state.engine.is_profile_current(&id);
    Ok(Json(PlayerResponse {
        player,
        profile_current,
    }))
}

pub async fn recompute_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecomputeResponse>, ApiError> {
    let player_id = PlayerId::from(id);
    let profile = state.engine.recompute_profile(&player_id).await?;
    Ok(Json(RecomputeResponse { player_id, profile }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_get_player_with_profile() {
        let data = sample_league();
        let ada = data.players[0].id.to_string();
        let app = build_router(state_with(data).await);

        let (status, json) = get_json(app, &format!("/api/players/{}", ada)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["profile"]["games_played"], 2);
        assert_eq!(json["profile"]["points"], 25.0);
        assert_eq!(json["profile_current"], true);
    }

    #[tokio::test]
    async fn test_get_unknown_player() {
        let app = build_router(state_with(sample_league()).await);
        let (status, json) = get_json(app, "/api/players/nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_recompute_player() {
        let data = sample_league();
        let bo = data.players[1].id.to_string();
        let app = build_router(state_with(data).await);

        let uri = format!("/api/players/{}/recompute", bo);
        let (status, json) = send(app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["player_id"], bo);
        assert_eq!(json["profile"]["points"], 18.0);
    }
}
