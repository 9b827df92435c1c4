//! Derived (computed, never stored) standings models.

use serde::{Deserialize, Serialize};

use super::TeamId;

/// Ordinal rank band of a standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::S, Tier::A, Tier::B, Tier::C];
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::S => write!(f, "S"),
            Tier::A => write!(f, "A"),
            Tier::B => write!(f, "B"),
            Tier::C => write!(f, "C"),
        }
    }
}

/// Season scope of a query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeasonFilter {
    #[default]
    AllTime,
    Season(String),
}

impl SeasonFilter {
    /// Parse a query value. Empty, "all", "all-time" and "all time" mean
    /// no season restriction.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None => SeasonFilter::AllTime,
            Some(v)
                if v.is_empty()
                    || v.eq_ignore_ascii_case("all")
                    || v.eq_ignore_ascii_case("all-time")
                    || v.eq_ignore_ascii_case("all time") =>
            {
                SeasonFilter::AllTime
            }
            Some(v) => SeasonFilter::Season(v.to_string()),
        }
    }

    pub fn is_all_time(&self) -> bool {
        matches!(self, SeasonFilter::AllTime)
    }

    pub fn matches(&self, season: &str) -> bool {
        match self {
            SeasonFilter::AllTime => true,
            SeasonFilter::Season(s) => s == season,
        }
    }
}

impl std::fmt::Display for SeasonFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeasonFilter::AllTime => write!(f, "all"),
            SeasonFilter::Season(s) => write!(f, "{}", s),
        }
    }
}

/// A team's win/loss record under a season/conference filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub team_name: String,
    pub conference: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub point_differential: i64,
    /// 0.0 to 1.0
    pub win_percentage: f64,
    /// "W3", "L1", or "-" when no games
    pub streak: String,
}

/// Standings partitioned into rank bands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierBands {
    #[serde(rename = "S")]
    pub s: Vec<Standing>,
    #[serde(rename = "A")]
    pub a: Vec<Standing>,
    #[serde(rename = "B")]
    pub b: Vec<Standing>,
    #[serde(rename = "C")]
    pub c: Vec<Standing>,
}

impl TierBands {
    pub fn band(&self, tier: Tier) -> &[Standing] {
        match tier {
            Tier::S => &self.s,
            Tier::A => &self.a,
            Tier::B => &self.b,
            Tier::C => &self.c,
        }
    }

    /// Total number of standings across all bands.
    pub fn len(&self) -> usize {
        self.s.len() + self.a.len() + self.b.len() + self.c.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tier of a team, if present.
    pub fn tier_of(&self, team_id: &TeamId) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .find(|&t| self.band(t).iter().any(|s| &s.team_id == team_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_display() {
        assert_eq!(format!("{}", Tier::S), "S");
        assert_eq!(format!("{}", Tier::C), "C");
    }

    #[test]
    fn test_season_filter_parse() {
        assert_eq!(SeasonFilter::parse(None), SeasonFilter::AllTime);
        assert_eq!(SeasonFilter::parse(Some("")), SeasonFilter::AllTime);
        assert_eq!(SeasonFilter::parse(Some("ALL")), SeasonFilter::AllTime);
        assert_eq!(SeasonFilter::parse(Some("all time")), SeasonFilter::AllTime);
        assert_eq!(
            SeasonFilter::parse(Some(" 2024-25 ")),
            SeasonFilter::Season("2024-25".to_string())
        );
    }

    #[test]
    fn test_season_filter_matches() {
        let f = SeasonFilter::Season("2024-25".to_string());
        assert!(f.matches("2024-25"));
        assert!(!f.matches("2023-24"));
        assert!(SeasonFilter::AllTime.matches("anything"));
    }

    #[test]
    fn test_tier_bands_serialize_with_letter_keys() {
        let bands = TierBands::default();
        let json = serde_json::to_value(&bands).unwrap();
        assert!(json["S"].is_array());
        assert!(json["C"].is_array());
        assert!(bands.is_empty());
    }
}
