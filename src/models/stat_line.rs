//! Per-game player box score.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{counting_stat, ValidationError};
use super::{EntityId, GameId, PlayerId, StatLineId};

/// Result of a game from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Win => write!(f, "W"),
            GameResult::Loss => write!(f, "L"),
        }
    }
}

/// Counting stats recorded for one player in one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxScore {
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub rebounds: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub steals: u32,
    #[serde(default)]
    pub blocks: u32,
    #[serde(default)]
    pub turnovers: u32,
    #[serde(default)]
    pub fouls: u32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub field_goals_made: u32,
    #[serde(default)]
    pub field_goals_attempted: u32,
    #[serde(default)]
    pub three_pointers_made: u32,
    #[serde(default)]
    pub three_pointers_attempted: u32,
    #[serde(default)]
    pub free_throws_made: u32,
    #[serde(default)]
    pub free_throws_attempted: u32,
}

impl BoxScore {
    /// Check shooting splits. Counting fields are unsigned so sign is
    /// already enforced by the type.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let splits = [
            (
                "field_goals_made",
                self.field_goals_made,
                "field_goals_attempted",
                self.field_goals_attempted,
            ),
            (
                "three_pointers_made",
                self.three_pointers_made,
                "three_pointers_attempted",
                self.three_pointers_attempted,
            ),
            (
                "free_throws_made",
                self.free_throws_made,
                "free_throws_attempted",
                self.free_throws_attempted,
            ),
        ];

        for (made_field, made, attempted_field, attempted) in splits {
            if made > attempted {
                return Err(ValidationError::MadeExceedsAttempted {
                    made_field,
                    made,
                    attempted_field,
                    attempted,
                });
            }
        }
        Ok(())
    }
}

/// One player's recorded box score for a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStatLine {
    pub id: StatLineId,

    pub player_id: PlayerId,

    /// Manual entries may not reference a scheduled game.
    #[serde(default)]
    pub game_id: Option<GameId>,

    pub date: NaiveDate,

    /// Opponent label as entered
    pub opponent: String,

    pub result: GameResult,

    #[serde(flatten)]
    pub stats: BoxScore,
}

impl GameStatLine {
    /// Whether the line was entered without a game reference.
    pub fn is_manual_entry(&self) -> bool {
        self.game_id.is_none()
    }
}

/// A stat line as submitted by the stat-entry operation, before it has an ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStatLine {
    pub player_id: PlayerId,
    #[serde(default)]
    pub game_id: Option<GameId>,
    pub date: NaiveDate,
    pub opponent: String,
    pub result: GameResult,
    #[serde(flatten)]
    pub stats: BoxScore,
}

impl NewStatLine {
    /// Validate and assign an ID.
    pub fn into_line(self) -> Result<GameStatLine, ValidationError> {
        self.stats.validate()?;
        Ok(GameStatLine {
            id: EntityId::random(),
            player_id: self.player_id,
            game_id: self.game_id,
            date: self.date,
            opponent: self.opponent,
            result: self.result,
            stats: self.stats,
        })
    }
}

/// Partial update of a stat line.
///
/// Counting fields are signed so that negative input reaches validation
/// and is rejected with a reason instead of failing to parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatLinePatch {
    pub game_id: Option<GameId>,
    pub date: Option<NaiveDate>,
    pub opponent: Option<String>,
    pub result: Option<GameResult>,
    pub points: Option<i64>,
    pub rebounds: Option<i64>,
    pub assists: Option<i64>,
    pub steals: Option<i64>,
    pub blocks: Option<i64>,
    pub turnovers: Option<i64>,
    pub fouls: Option<i64>,
    pub minutes: Option<i64>,
    pub field_goals_made: Option<i64>,
    pub field_goals_attempted: Option<i64>,
    pub three_pointers_made: Option<i64>,
    pub three_pointers_attempted: Option<i64>,
    pub free_throws_made: Option<i64>,
    pub free_throws_attempted: Option<i64>,
}

fn patch_stat(
    target: &mut u32,
    field: &'static str,
    value: Option<i64>,
) -> Result<(), ValidationError> {
    if let Some(v) = value {
        *target = counting_stat(field, v)?;
    }
    Ok(())
}

impl StatLinePatch {
    /// Apply the patch to a copy of `line`. Identity and player are never
    /// changed by a patch.
    pub fn apply_to(&self, line: &GameStatLine) -> Result<GameStatLine, ValidationError> {
        let mut out = line.clone();

        if let Some(game_id) = &self.game_id {
            out.game_id = Some(game_id.clone());
        }
        if let Some(date) = self.date {
            out.date = date;
        }
        if let Some(opponent) = &self.opponent {
            out.opponent = opponent.clone();
        }
        if let Some(result) = self.result {
            out.result = result;
        }

        let s = &mut out.stats;
        patch_stat(&mut s.points, "points", self.points)?;
        patch_stat(&mut s.rebounds, "rebounds", self.rebounds)?;
        patch_stat(&mut s.assists, "assists", self.assists)?;
        patch_stat(&mut s.steals, "steals", self.steals)?;
        patch_stat(&mut s.blocks, "blocks", self.blocks)?;
        patch_stat(&mut s.turnovers, "turnovers", self.turnovers)?;
        patch_stat(&mut s.fouls, "fouls", self.fouls)?;
        patch_stat(&mut s.minutes, "minutes", self.minutes)?;
        patch_stat(&mut s.field_goals_made, "field_goals_made", self.field_goals_made)?;
        patch_stat(
            &mut s.field_goals_attempted,
            "field_goals_attempted",
            self.field_goals_attempted,
        )?;
        patch_stat(
            &mut s.three_pointers_made,
            "three_pointers_made",
            self.three_pointers_made,
        )?;
        patch_stat(
            &mut s.three_pointers_attempted,
            "three_pointers_attempted",
            self.three_pointers_attempted,
        )?;
        patch_stat(&mut s.free_throws_made, "free_throws_made", self.free_throws_made)?;
        patch_stat(
            &mut s.free_throws_attempted,
            "free_throws_attempted",
            self.free_throws_attempted,
        )?;

        out.stats.validate()?;
        Ok(out)
    }
}
