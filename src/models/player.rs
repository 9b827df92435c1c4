//! Players and their season profile.

use serde::{Deserialize, Serialize};

use super::{EntityId, PlayerId, TeamId};

/// A player's current cumulative statistical summary.
///
/// Always equal to a fresh aggregation over the player's stat lines, except
/// `assist_percentage`, which comes from outside the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonProfile {
    pub games_played: u32,

    // Per-game averages
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub fouls: f64,
    pub minutes: f64,
    pub field_goals_made: f64,
    pub field_goals_attempted: f64,
    pub three_pointers_made: f64,
    pub three_pointers_attempted: f64,
    pub free_throws_made: f64,
    pub free_throws_attempted: f64,

    // Percentages (0-100)
    pub field_goal_percentage: f64,
    pub three_point_percentage: f64,
    pub free_throw_percentage: f64,

    pub assist_turnover_ratio: f64,

    /// Supplied externally; needs team-level data this engine never sees.
    #[serde(default)]
    pub assist_percentage: f64,

    /// Per-game efficiency
    pub efficiency: f64,

    /// Summed efficiency numerator across all games
    pub total_efficiency: i64,
}

impl PlayerSeasonProfile {
    /// Copy externally supplied fields from a previously stored profile.
    ///
    /// An empty profile stays all zero, so external fields are dropped once
    /// a player has no games left.
    pub fn with_external_from(mut self, previous: &PlayerSeasonProfile) -> Self {
        if !self.is_empty() {
            self.assist_percentage = previous.assist_percentage;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.games_played == 0
    }
}

/// A player on a league roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub jersey_number: Option<u32>,
    #[serde(default)]
    pub profile: PlayerSeasonProfile,
}

impl Player {
    /// Create a player with an ID derived from name and team.
    pub fn new(name: &str, team_id: Option<TeamId>) -> Self {
        let team_key = team_id.as_ref().map(|t| t.as_str()).unwrap_or("");
        Self {
            id: EntityId::generate(&["player", &name.to_lowercase(), team_key]),
            name: name.to_string(),
            team_id,
            jersey_number: None,
            profile: PlayerSeasonProfile::default(),
        }
    }

    /// Builder method to set jersey number.
    pub fn with_jersey_number(mut self, number: u32) -> Self {
        self.jersey_number = Some(number);
        self
    }
}
