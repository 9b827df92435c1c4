use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{SeasonFilter, Standing, TierBands};

#[derive(Debug, Default, Deserialize)]
pub struct StandingsParams {
    pub season: Option<String>,
    pub conference: Option<String>,
}

impl StandingsParams {
    fn season(&self) -> SeasonFilter {
        SeasonFilter::parse(self.season.as_deref())
    }

    fn conference(&self) -> Option<&str> {
        self.conference
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    pub season: String,
    pub conference: Option<String>,
    pub standings: Vec<Standing>,
}

#[derive(Debug, Serialize)]
pub struct TiersResponse {
    pub season: String,
    pub conference: Option<String>,
    pub tiers: TierBands,
}

pub async fn get_standings(
    State(state): State<AppState>,
    Query(params): Query<StandingsParams>,
) -> Result<Json<StandingsResponse>, ApiError> {
    let season = params.season();
    let conference = params.conference();
    let standings = state.engine.standings(&season, conference).await?;

    Ok(Json(StandingsResponse {
        season: season.to_string(),
        conference: conference.map(str::to_string),
        standings,
    }))
}

pub async fn get_tiers(
    State(state): State<AppState>,
    Query(params): Query<StandingsParams>,
) -> Result<Json<TiersResponse>, ApiError> {
    let season = params.season();
    let conference = params.conference();
    let tiers = state.engine.tiers(&season, conference).await?;

    Ok(Json(TiersResponse {
        season: season.to_string(),
        conference: conference.map(str::to_string),
        tiers,
    }))
}
