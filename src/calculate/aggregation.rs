//! Season profile aggregation.
//!
//! Sums are kept as integers and only divided at the end, so aggregating
//! the same lines always gives bit-identical output regardless of order.

use crate::models::{BoxScore, GameStatLine, PlayerSeasonProfile};

use super::formulas::{
    assist_turnover_ratio, efficiency_per_game, efficiency_total, per_game, shooting_percentage,
    EfficiencyInputs,
};

/// Summed counting stats over a set of stat lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatTotals {
    pub games: u32,
    pub points: u64,
    pub rebounds: u64,
    pub assists: u64,
    pub steals: u64,
    pub blocks: u64,
    pub turnovers: u64,
    pub fouls: u64,
    pub minutes: u64,
    pub field_goals_made: u64,
    pub field_goals_attempted: u64,
    pub three_pointers_made: u64,
    pub three_pointers_attempted: u64,
    pub free_throws_made: u64,
    pub free_throws_attempted: u64,
}

impl StatTotals {
    pub fn add(&mut self, s: &BoxScore) {
        self.games += 1;
        self.points += u64::from(s.points);
        self.rebounds += u64::from(s.rebounds);
        self.assists += u64::from(s.assists);
        self.steals += u64::from(s.steals);
        self.blocks += u64::from(s.blocks);
        self.turnovers += u64::from(s.turnovers);
        self.fouls += u64::from(s.fouls);
        self.minutes += u64::from(s.minutes);
        self.field_goals_made += u64::from(s.field_goals_made);
        self.field_goals_attempted += u64::from(s.field_goals_attempted);
        self.three_pointers_made += u64::from(s.three_pointers_made);
        self.three_pointers_attempted += u64::from(s.three_pointers_attempted);
        self.free_throws_made += u64::from(s.free_throws_made);
        self.free_throws_attempted += u64::from(s.free_throws_attempted);
    }

    fn efficiency_inputs(&self) -> EfficiencyInputs {
        EfficiencyInputs {
            points: self.points,
            rebounds: self.rebounds,
            assists: self.assists,
            steals: self.steals,
            blocks: self.blocks,
            turnovers: self.turnovers,
            field_goals_made: self.field_goals_made,
            field_goals_attempted: self.field_goals_attempted,
            free_throws_made: self.free_throws_made,
            free_throws_attempted: self.free_throws_attempted,
        }
    }

    /// Derive the profile. `assist_percentage` is left at zero; it is not
    /// computable from box scores.
    pub fn to_profile(&self) -> PlayerSeasonProfile {
        let n = self.games;
        if n == 0 {
            return PlayerSeasonProfile::default();
        }

        let total_efficiency = efficiency_total(&self.efficiency_inputs());

        PlayerSeasonProfile {
            games_played: n,
            points: per_game(self.points, n),
            rebounds: per_game(self.rebounds, n),
            assists: per_game(self.assists, n),
            steals: per_game(self.steals, n),
            blocks: per_game(self.blocks, n),
            turnovers: per_game(self.turnovers, n),
            fouls: per_game(self.fouls, n),
            minutes: per_game(self.minutes, n),
            field_goals_made: per_game(self.field_goals_made, n),
            field_goals_attempted: per_game(self.field_goals_attempted, n),
            three_pointers_made: per_game(self.three_pointers_made, n),
            three_pointers_attempted: per_game(self.three_pointers_attempted, n),
            free_throws_made: per_game(self.free_throws_made, n),
            free_throws_attempted: per_game(self.free_throws_attempted, n),
            field_goal_percentage: shooting_percentage(
                self.field_goals_made,
                self.field_goals_attempted,
            ),
            three_point_percentage: shooting_percentage(
                self.three_pointers_made,
                self.three_pointers_attempted,
            ),
            free_throw_percentage: shooting_percentage(
                self.free_throws_made,
                self.free_throws_attempted,
            ),
            assist_turnover_ratio: assist_turnover_ratio(self.assists, self.turnovers, n),
            assist_percentage: 0.0,
            efficiency: efficiency_per_game(total_efficiency, n),
            total_efficiency,
        }
    }
}

/// Sum a set of stat lines.
pub fn sum_lines<'a, I>(lines: I) -> StatTotals
where
    I: IntoIterator<Item = &'a GameStatLine>,
{
    let mut totals = StatTotals::default();
    for line in lines {
        totals.add(&line.stats);
    }
    totals
}

/// Aggregate a player's stat lines into a season profile.
pub fn aggregate<'a, I>(lines: I) -> PlayerSeasonProfile
where
    I: IntoIterator<Item = &'a GameStatLine>,
{
    sum_lines(lines).to_profile()
}
