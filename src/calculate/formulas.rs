//! Stat-derivation formulas.
//!
//! Every percentage, ratio and efficiency figure in the crate goes through
//! these functions. A zero denominator always yields `0.0`.

/// `numerator / denominator`, or 0.0 when the denominator is zero.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Per-game average of a summed stat.
pub fn per_game(total: u64, games: u32) -> f64 {
    safe_div(total as f64, games as f64)
}

/// Shooting percentage on a 0-100 scale.
pub fn shooting_percentage(made: u64, attempted: u64) -> f64 {
    safe_div(made as f64, attempted as f64) * 100.0
}

/// Assist/turnover ratio. With no turnovers the ratio is the per-game
/// assist average rather than infinity.
pub fn assist_turnover_ratio(total_assists: u64, total_turnovers: u64, games: u32) -> f64 {
    if total_turnovers == 0 {
        per_game(total_assists, games)
    } else {
        total_assists as f64 / total_turnovers as f64
    }
}

/// Summed counting stats that feed the efficiency numerator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EfficiencyInputs {
    pub points: u64,
    pub rebounds: u64,
    pub assists: u64,
    pub steals: u64,
    pub blocks: u64,
    pub turnovers: u64,
    pub field_goals_made: u64,
    pub field_goals_attempted: u64,
    pub free_throws_made: u64,
    pub free_throws_attempted: u64,
}

/// PTS + REB + AST + STL + BLK - missed FG - missed FT - TOV, over totals.
pub fn efficiency_total(t: &EfficiencyInputs) -> i64 {
    let positive = t.points + t.rebounds + t.assists + t.steals + t.blocks;
    let missed_fg = t.field_goals_attempted.saturating_sub(t.field_goals_made);
    let missed_ft = t.free_throws_attempted.saturating_sub(t.free_throws_made);
    positive as i64 - missed_fg as i64 - missed_ft as i64 - t.turnovers as i64
}

/// Efficiency per game, dividing the summed numerator once.
pub fn efficiency_per_game(total: i64, games: u32) -> f64 {
    safe_div(total as f64, games as f64)
}

/// Fraction of decided games won, 0.0 to 1.0.
pub fn win_percentage(wins: u32, losses: u32) -> f64 {
    safe_div(wins as f64, (wins + losses) as f64)
}
