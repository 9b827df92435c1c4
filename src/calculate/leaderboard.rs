//! Category leaderboards.

use std::collections::HashMap;

use crate::models::{
    Game, GameId, GameStatLine, LeaderboardEntry, LeaderboardMode, Player, PlayerId,
    PlayerSeasonProfile, SeasonFilter, StatKey,
};

use super::aggregation::aggregate;

/// Per-game value of `stat` from a profile.
pub fn average_value(profile: &PlayerSeasonProfile, stat: StatKey) -> f64 {
    match stat {
        StatKey::Points => profile.points,
        StatKey::Rebounds => profile.rebounds,
        StatKey::Assists => profile.assists,
        StatKey::Steals => profile.steals,
        StatKey::Blocks => profile.blocks,
        StatKey::Turnovers => profile.turnovers,
        StatKey::Fouls => profile.fouls,
        StatKey::Minutes => profile.minutes,
        StatKey::FieldGoalsMade => profile.field_goals_made,
        StatKey::FieldGoalsAttempted => profile.field_goals_attempted,
        StatKey::ThreePointersMade => profile.three_pointers_made,
        StatKey::ThreePointersAttempted => profile.three_pointers_attempted,
        StatKey::FreeThrowsMade => profile.free_throws_made,
        StatKey::FreeThrowsAttempted => profile.free_throws_attempted,
        StatKey::FieldGoalPercentage => profile.field_goal_percentage,
        StatKey::ThreePointPercentage => profile.three_point_percentage,
        StatKey::FreeThrowPercentage => profile.free_throw_percentage,
        StatKey::AssistTurnoverRatio => profile.assist_turnover_ratio,
        StatKey::Efficiency => profile.efficiency,
    }
}

/// Value used for ranking and display.
///
/// Totals are reconstructed as `average * games`, except efficiency, which
/// uses the summed numerator directly. Rates are the same in both modes.
pub fn leaderboard_value(
    profile: &PlayerSeasonProfile,
    stat: StatKey,
    mode: LeaderboardMode,
) -> f64 {
    match mode {
        LeaderboardMode::Averages => average_value(profile, stat),
        LeaderboardMode::Totals if stat.is_rate() => average_value(profile, stat),
        LeaderboardMode::Totals if stat == StatKey::Efficiency => profile.total_efficiency as f64,
        LeaderboardMode::Totals => average_value(profile, stat) * profile.games_played as f64,
    }
}

/// Rank players by `stat` for the given season and mode.
///
/// All-time reads each player's stored profile. A season filter re-aggregates
/// only lines whose game carries that season; manual entries without a game
/// never qualify. Players with no qualifying games are left out. Ties keep
/// the order of `players`.
pub fn compute_leaderboard(
    players: &[Player],
    lines: &[GameStatLine],
    games: &[Game],
    stat: StatKey,
    season: &SeasonFilter,
    mode: LeaderboardMode,
) -> Vec<LeaderboardEntry> {
    let mut scoped: Vec<(&Player, PlayerSeasonProfile)> = match season {
        SeasonFilter::AllTime => players.iter().map(|p| (p, p.profile)).collect(),
        SeasonFilter::Season(_) => {
            let game_seasons: HashMap<&GameId, &str> =
                games.iter().map(|g| (&g.id, g.season.as_str())).collect();

            let mut by_player: HashMap<&PlayerId, Vec<&GameStatLine>> = HashMap::new();
            for line in lines {
                if line.is_manual_entry() {
                    continue;
                }
                let in_season = line
                    .game_id
                    .as_ref()
                    .and_then(|id| game_seasons.get(id))
                    .is_some_and(|s| season.matches(s));
                if in_season {
                    by_player.entry(&line.player_id).or_default().push(line);
                }
            }

            players
                .iter()
                .map(|p| {
                    let profile = by_player
                        .get(&p.id)
                        .map(|ls| aggregate(ls.iter().copied()))
                        .unwrap_or_default();
                    (p, profile)
                })
                .collect()
        }
    };

    scoped.retain(|(_, profile)| profile.games_played > 0);

    let mut entries: Vec<LeaderboardEntry> = scoped
        .into_iter()
        .map(|(player, profile)| LeaderboardEntry {
            rank: 0,
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            value: leaderboard_value(&profile, stat, mode),
            games_played: profile.games_played,
        })
        .collect();

    // Stable sort keeps discovery order for ties.
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i as u32 + 1;
    }
    entries
}
