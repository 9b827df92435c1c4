//! Leaderboard models.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::PlayerId;

/// Statistic a leaderboard ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
    Fouls,
    Minutes,
    FieldGoalsMade,
    FieldGoalsAttempted,
    ThreePointersMade,
    ThreePointersAttempted,
    FreeThrowsMade,
    FreeThrowsAttempted,
    FieldGoalPercentage,
    ThreePointPercentage,
    FreeThrowPercentage,
    AssistTurnoverRatio,
    Efficiency,
}

impl StatKey {
    /// Rates are reported as-is in both modes.
    pub fn is_rate(&self) -> bool {
        matches!(
            self,
            StatKey::FieldGoalPercentage
                | StatKey::ThreePointPercentage
                | StatKey::FreeThrowPercentage
                | StatKey::AssistTurnoverRatio
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKey::Points => "points",
            StatKey::Rebounds => "rebounds",
            StatKey::Assists => "assists",
            StatKey::Steals => "steals",
            StatKey::Blocks => "blocks",
            StatKey::Turnovers => "turnovers",
            StatKey::Fouls => "fouls",
            StatKey::Minutes => "minutes",
            StatKey::FieldGoalsMade => "field_goals_made",
            StatKey::FieldGoalsAttempted => "field_goals_attempted",
            StatKey::ThreePointersMade => "three_pointers_made",
            StatKey::ThreePointersAttempted => "three_pointers_attempted",
            StatKey::FreeThrowsMade => "free_throws_made",
            StatKey::FreeThrowsAttempted => "free_throws_attempted",
            StatKey::FieldGoalPercentage => "field_goal_percentage",
            StatKey::ThreePointPercentage => "three_point_percentage",
            StatKey::FreeThrowPercentage => "free_throw_percentage",
            StatKey::AssistTurnoverRatio => "assist_turnover_ratio",
            StatKey::Efficiency => "efficiency",
        }
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_lowercase().replace('-', "_").as_str() {
            "points" | "pts" => StatKey::Points,
            "rebounds" | "reb" => StatKey::Rebounds,
            "assists" | "ast" => StatKey::Assists,
            "steals" | "stl" => StatKey::Steals,
            "blocks" | "blk" => StatKey::Blocks,
            "turnovers" | "tov" | "to" => StatKey::Turnovers,
            "fouls" | "pf" => StatKey::Fouls,
            "minutes" | "min" => StatKey::Minutes,
            "field_goals_made" | "fgm" => StatKey::FieldGoalsMade,
            "field_goals_attempted" | "fga" => StatKey::FieldGoalsAttempted,
            "three_pointers_made" | "3pm" | "tpm" => StatKey::ThreePointersMade,
            "three_pointers_attempted" | "3pa" | "tpa" => StatKey::ThreePointersAttempted,
            "free_throws_made" | "ftm" => StatKey::FreeThrowsMade,
            "free_throws_attempted" | "fta" => StatKey::FreeThrowsAttempted,
            "field_goal_percentage" | "fg_pct" | "fg%" => StatKey::FieldGoalPercentage,
            "three_point_percentage" | "3p_pct" | "3p%" => StatKey::ThreePointPercentage,
            "free_throw_percentage" | "ft_pct" | "ft%" => StatKey::FreeThrowPercentage,
            "assist_turnover_ratio" | "ast_to" | "a/to" => StatKey::AssistTurnoverRatio,
            "efficiency" | "eff" => StatKey::Efficiency,
            other => return Err(format!("unknown stat: {}", other)),
        };
        Ok(key)
    }
}

/// Averages or reconstructed totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardMode {
    #[default]
    Averages,
    Totals,
}

impl FromStr for LeaderboardMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "averages" | "average" | "avg" | "per_game" => Ok(LeaderboardMode::Averages),
            "totals" | "total" => Ok(LeaderboardMode::Totals),
            other => Err(format!("unknown mode: {}", other)),
        }
    }
}

/// One ranked row of a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position in the full leaderboard
    pub rank: u32,
    pub player_id: PlayerId,
    pub player_name: String,
    pub value: f64,
    pub games_played: u32,
}
