//! Scheduled and completed games.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::ValidationError;
use super::{EntityId, GameId, TeamId};

/// Lifecycle of a game. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Scheduled,
    Live,
    Completed,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Scheduled => write!(f, "scheduled"),
            GameStatus::Live => write!(f, "live"),
            GameStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Home or away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

/// A game between two teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub date: NaiveDate,
    pub status: GameStatus,
    /// Season tag, e.g. "2024-25"
    pub season: String,
    #[serde(default)]
    pub home_score: u32,
    #[serde(default)]
    pub away_score: u32,
    #[serde(default)]
    pub is_forfeit: bool,
    #[serde(default)]
    pub forfeit_winner: Option<Side>,
}

impl Game {
    /// Create a scheduled game with an ID derived from date and teams.
    pub fn new(home_team_id: TeamId, away_team_id: TeamId, date: NaiveDate, season: &str) -> Self {
        let id = EntityId::generate(&[
            "game",
            &date.to_string(),
            home_team_id.as_str(),
            away_team_id.as_str(),
        ]);
        Self {
            id,
            home_team_id,
            away_team_id,
            date,
            status: GameStatus::Scheduled,
            season: season.to_string(),
            home_score: 0,
            away_score: 0,
            is_forfeit: false,
            forfeit_winner: None,
        }
    }

    /// Builder: mark completed with a final score.
    pub fn with_final_score(mut self, home_score: u32, away_score: u32) -> Self {
        self.home_score = home_score;
        self.away_score = away_score;
        self.status = GameStatus::Completed;
        self
    }

    /// Builder: mark completed as a forfeit won by `winner`.
    pub fn with_forfeit(mut self, winner: Side) -> Self {
        self.is_forfeit = true;
        self.forfeit_winner = Some(winner);
        self.status = GameStatus::Completed;
        self
    }

    /// Move the game forward in its lifecycle. `live` may be skipped.
    pub fn transition(&mut self, next: GameStatus) -> Result<(), ValidationError> {
        if next < self.status {
            return Err(ValidationError::StatusTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    /// Which side `team` played on, if it played at all.
    pub fn side_of(&self, team: &TeamId) -> Option<Side> {
        if &self.home_team_id == team {
            Some(Side::Home)
        } else if &self.away_team_id == team {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn opponent_of(&self, side: Side) -> &TeamId {
        match side {
            Side::Home => &self.away_team_id,
            Side::Away => &self.home_team_id,
        }
    }

    /// (team score, opponent score) from `side`'s perspective.
    pub fn scores_for(&self, side: Side) -> (u32, u32) {
        match side {
            Side::Home => (self.home_score, self.away_score),
            Side::Away => (self.away_score, self.home_score),
        }
    }

    /// Whether `side` won. A forfeit with a designated winner overrides
    /// the score comparison.
    pub fn is_win_for(&self, side: Side) -> bool {
        if self.is_forfeit {
            if let Some(winner) = self.forfeit_winner {
                return winner == side;
            }
        }
        let (team, opponent) = self.scores_for(side);
        team > opponent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::new(
            "home".into(),
            "away".into(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            "2024-25",
        )
    }

    #[test]
    fn test_status_moves_forward() {
        let mut g = game();
        assert!(g.transition(GameStatus::Live).is_ok());
        assert!(g.transition(GameStatus::Completed).is_ok());
        assert!(g.transition(GameStatus::Live).is_err());
        assert_eq!(g.status, GameStatus::Completed);
    }

    #[test]
    fn test_live_may_be_skipped() {
        let mut g = game();
        assert!(g.transition(GameStatus::Completed).is_ok());
    }

    #[test]
    fn test_scores_by_side() {
        let g = game().with_final_score(80, 70);
        assert_eq!(g.scores_for(Side::Home), (80, 70));
        assert_eq!(g.scores_for(Side::Away), (70, 80));
        assert!(g.is_win_for(Side::Home));
        assert!(!g.is_win_for(Side::Away));
    }

    #[test]
    fn test_forfeit_overrides_score() {
        let g = game().with_forfeit(Side::Away);
        assert_eq!(g.scores_for(Side::Home), (0, 0));
        assert!(g.is_win_for(Side::Away));
        assert!(!g.is_win_for(Side::Home));
    }

    #[test]
    fn test_forfeit_without_winner_falls_back_to_score() {
        let mut g = game().with_final_score(60, 62);
        g.is_forfeit = true;
        assert!(g.is_win_for(Side::Away));
    }

    #[test]
    fn test_side_lookup() {
        let g = game();
        assert_eq!(g.side_of(&"home".into()), Some(Side::Home));
        assert_eq!(g.side_of(&"away".into()), Some(Side::Away));
        assert_eq!(g.side_of(&"other".into()), None);
        assert_eq!(g.opponent_of(Side::Home).as_str(), "away");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&GameStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(serde_json::to_string(&Side::Home).unwrap(), "\"home\"");
    }
}
