//! League teams.

use serde::{Deserialize, Serialize};

use super::{EntityId, TeamId};

/// A team in the league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Conference tag, e.g. "East"
    pub conference: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

impl Team {
    /// Create a team with an ID derived from its name.
    pub fn new(name: &str, conference: &str) -> Self {
        Self {
            id: EntityId::generate(&["team", &name.to_lowercase()]),
            name: name.to_string(),
            conference: conference.to_string(),
            abbreviation: None,
        }
    }

    /// Builder method to set the display abbreviation.
    pub fn with_abbreviation(mut self, abbreviation: &str) -> Self {
        self.abbreviation = Some(abbreviation.to_string());
        self
    }

    pub fn in_conference(&self, conference: &str) -> bool {
        self.conference.eq_ignore_ascii_case(conference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_ignores_case() {
        assert_eq!(Team::new("Hawks", "East").id, Team::new("hawks", "East").id);
    }

    #[test]
    fn test_conference_match_is_case_insensitive() {
        let team = Team::new("Hawks", "East").with_abbreviation("HWK");
        assert!(team.in_conference("east"));
        assert!(!team.in_conference("West"));
        assert_eq!(team.abbreviation.as_deref(), Some("HWK"));
    }
}
