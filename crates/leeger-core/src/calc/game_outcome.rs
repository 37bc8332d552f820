// Wins, losses, ties and games played, decided by direct score comparison.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use super::{per_game, prepare, zeroed, TeamMap};
use crate::config::StatOptions;
use crate::error::StatsError;
use crate::filter::YearFilter;
use crate::model::Year;

pub fn wins(year: &Year, options: &StatOptions) -> Result<TeamMap<u32>, StatsError> {
    let filter = prepare(year, options)?;
    Ok(wins_in(year, &filter))
}

pub fn losses(year: &Year, options: &StatOptions) -> Result<TeamMap<u32>, StatsError> {
    let filter = prepare(year, options)?;
    Ok(losses_in(year, &filter))
}

pub fn ties(year: &Year, options: &StatOptions) -> Result<TeamMap<u32>, StatsError> {
    let filter = prepare(year, options)?;
    Ok(ties_in(year, &filter))
}

pub fn games_played(year: &Year, options: &StatOptions) -> Result<TeamMap<u32>, StatsError> {
    let filter = prepare(year, options)?;
    Ok(games_played_in(year, &filter))
}

/// Wins over games played, unrounded. Ties count as games but not wins.
pub fn win_percentage(year: &Year, options: &StatOptions) -> Result<TeamMap<Decimal>, StatsError> {
    let filter = prepare(year, options)?;
    win_percentage_in(year, &filter)
}

// ---------------------------------------------------------------------------
// Trusted forms
// ---------------------------------------------------------------------------

pub fn wins_in(year: &Year, filter: &YearFilter) -> TeamMap<u32> {
    tally(year, filter, Ordering::Greater)
}

pub fn losses_in(year: &Year, filter: &YearFilter) -> TeamMap<u32> {
    tally(year, filter, Ordering::Less)
}

pub fn ties_in(year: &Year, filter: &YearFilter) -> TeamMap<u32> {
    tally(year, filter, Ordering::Equal)
}

pub fn games_played_in(year: &Year, filter: &YearFilter) -> TeamMap<u32> {
    let mut games = zeroed(year);
    for (_, matchup) in filter.matchups(year) {
        for (team_id, _, _) in matchup.sides() {
            *games.entry(team_id.clone()).or_default() += 1;
        }
    }
    games
}

pub fn win_percentage_in(year: &Year, filter: &YearFilter) -> Result<TeamMap<Decimal>, StatsError> {
    let wins: TeamMap<Decimal> = wins_in(year, filter)
        .into_iter()
        .map(|(id, n)| (id, Decimal::from(n)))
        .collect();
    let games = games_played_in(year, filter);
    Ok(per_game(year, "win percentage", &wins, &games)?)
}

/// Count, per team, the included matchups whose own-vs-opponent comparison
/// came out as `outcome`.
fn tally(year: &Year, filter: &YearFilter, outcome: Ordering) -> TeamMap<u32> {
    let mut counts = zeroed(year);
    for (_, matchup) in filter.matchups(year) {
        for (team_id, own, opponent) in matchup.sides() {
            if own.cmp(&opponent) == outcome {
                *counts.entry(team_id.clone()).or_default() += 1;
            }
        }
    }
    counts
}
