//! Team standings.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{Game, SeasonFilter, Standing, Team, TeamId};

use super::formulas::win_percentage;

/// Ranking order: wins desc, losses asc, point differential desc.
pub fn rank_order(a: &Standing, b: &Standing) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| a.losses.cmp(&b.losses))
        .then_with(|| b.point_differential.cmp(&a.point_differential))
}

/// Format the current run of identical results, most recent last in
/// `results`.
pub fn format_streak(results: &[bool]) -> String {
    let Some(&last) = results.last() else {
        return "-".to_string();
    };
    let run = results.iter().rev().take_while(|&&r| r == last).count();
    format!("{}{}", if last { "W" } else { "L" }, run)
}

/// Compute standings for every team, returned in ranking order.
///
/// Only completed games count. `conference` keeps games whose opponent is in
/// that conference; the team's own conference is not consulted. Fully tied
/// teams keep their order in `teams`.
pub fn compute_standings(
    teams: &[Team],
    games: &[Game],
    season: &SeasonFilter,
    conference: Option<&str>,
) -> Vec<Standing> {
    let teams_by_id: HashMap<&TeamId, &Team> = teams.iter().map(|t| (&t.id, t)).collect();

    let mut ordered: Vec<&Game> = games
        .iter()
        .filter(|g| g.is_completed() && season.matches(&g.season))
        .collect();
    // Stable: same-day games keep input order.
    ordered.sort_by_key(|g| g.date);

    let mut standings: Vec<Standing> = teams
        .iter()
        .map(|team| standing_for(team, &ordered, &teams_by_id, conference))
        .collect();

    standings.sort_by(rank_order);
    standings
}

fn standing_for(
    team: &Team,
    games: &[&Game],
    teams_by_id: &HashMap<&TeamId, &Team>,
    conference: Option<&str>,
) -> Standing {
    let mut wins = 0u32;
    let mut losses = 0u32;
    let mut points_for = 0u64;
    let mut points_against = 0u64;
    let mut results = Vec::new();

    for game in games {
        let Some(side) = game.side_of(&team.id) else {
            continue;
        };

        if let Some(conf) = conference {
            let opponent_in_conf = teams_by_id
                .get(game.opponent_of(side))
                .is_some_and(|opp| opp.in_conference(conf));
            if !opponent_in_conf {
                continue;
            }
        }

        let (team_score, opponent_score) = game.scores_for(side);
        points_for += u64::from(team_score);
        points_against += u64::from(opponent_score);

        let won = game.is_win_for(side);
        if won {
            wins += 1;
        } else {
            losses += 1;
        }
        results.push(won);
    }

    Standing {
        team_id: team.id.clone(),
        team_name: team.name.clone(),
        conference: team.conference.clone(),
        games_played: wins + losses,
        wins,
        losses,
        points_for,
        points_against,
        point_differential: points_for as i64 - points_against as i64,
        win_percentage: win_percentage(wins, losses),
        streak: format_streak(&results),
    }
}
