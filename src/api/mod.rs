//! REST API endpoints.
//!
//! Axum-based HTTP API for stat entry, player profiles, standings,
//! tiers and leaderboards.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::engine::EngineError;
use crate::storage::StorageError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

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
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidInput(e) => ApiError::BadRequest(e.to_string()),
            EngineError::PlayerNotFound(_) | EngineError::StatLineNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            EngineError::Store(StorageError::NotFound { .. }) => {
                ApiError::NotFound(err.to_string())
            }
            EngineError::Store(StorageError::Json(_)) => ApiError::Internal(err.to_string()),
            EngineError::Store(_) | EngineError::ProfileNotCommitted { .. } => {
                tracing::warn!("Request failed on store: {}", err);
                ApiError::Unavailable(err.to_string())
            }
        }
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            tracing::warn!("Invalid CORS origin {:?}, allowing any", origin);
            layer.allow_origin(Any)
        }
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/players/:id", get(routes::players::get_player))
        .route(
            "/api/players/:id/recompute",
            post(routes::players::recompute_player),
        )
        .route("/api/stat-lines", post(routes::stat_lines::create_stat_line))
        .route(
            "/api/stat-lines/:id",
            patch(routes::stat_lines::update_stat_line)
                .delete(routes::stat_lines::delete_stat_line),
        )
        .route("/api/standings", get(routes::standings::get_standings))
        .route("/api/standings/tiers", get(routes::standings::get_tiers))
        .route("/api/leaderboard", get(routes::leaderboard::get_leaderboard))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use chrono::NaiveDate;

    use super::state::AppState;
    use crate::config::AppConfig;
    use crate::engine::StatsEngine;
    use crate::models::{BoxScore, EntityId, Game, GameResult, GameStatLine, Player, Team};
    use crate::storage::{LeagueData, MemoryStore};

    pub async fn state_with(data: LeagueData) -> AppState {
        let engine = StatsEngine::new(Arc::new(MemoryStore::new()));
        engine.import(data).await.unwrap();
        AppState::new(Arc::new(engine), AppConfig::default())
    }

    pub async fn send(
        app: axum::Router,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let resp = app.oneshot(request).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        send(app, "GET", uri, None).await
    }

    /// Hawks 80-70 Owls, Owls 75-60 Bears, Bears 85-90 Hawks, all 2024-25.
    /// Ada (Hawks) scores 20 and 30; Bo (Owls) scores 18.
    pub fn sample_league() -> LeagueData {
        let hawks = Team::new("Hawks", "East");
        let owls = Team::new("Owls", "East");
        let bears = Team::new("Bears", "West");
        let day = |d: u32| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
        let game = |home: &Team, away: &Team, d: u32, hs: u32, aws: u32| {
            Game::new(home.id.clone(), away.id.clone(), day(d), "2024-25")
                .with_final_score(hs, aws)
        };
        let games = vec![
            game(&hawks, &owls, 1, 80, 70),
            game(&owls, &bears, 2, 75, 60),
            game(&bears, &hawks, 3, 85, 90),
        ];

        let ada = Player::new("Ada", Some(hawks.id.clone()));
        let bo = Player::new("Bo", Some(owls.id.clone()));
        let line = |p: &Player, g: &Game, points: u32| GameStatLine {
            id: EntityId::generate(&["line", p.id.as_str(), g.id.as_str()]),
            player_id: p.id.clone(),
            game_id: Some(g.id.clone()),
            date: g.date,
            opponent: "Opp".to_string(),
            result: GameResult::Win,
            stats: BoxScore {
                points,
                field_goals_made: points / 2,
                field_goals_attempted: points,
                ..Default::default()
            },
        };
        let stat_lines = vec![
            line(&ada, &games[0], 20),
            line(&ada, &games[2], 30),
            line(&bo, &games[0], 18),
        ];

        LeagueData {
            teams: vec![hawks, owls, bears],
            players: vec![ada, bo],
            games,
            stat_lines,
        }
    }
}
