// Adjusted Wins Against the League (AWAL).
//
// Each included week, every team is compared against every other score in
// that week's field:
//
//     AWAL += outscored * (1 / L) + tied * (0.5 / L)
//
// where L = opponents in the week = 2 * included matchups - 1. A team that
// outscores the whole field earns 1.0 for the week; the weekly total across
// teams equals the number of included matchups.

use rust_decimal::Decimal;
use tracing::trace;

use super::game_outcome::games_played_in;
use super::{per_game, prepare, zeroed, TeamMap};
use crate::config::StatOptions;
use crate::error::StatsError;
use crate::filter::YearFilter;
use crate::model::{TeamId, Year};

pub fn awal(year: &Year, options: &StatOptions) -> Result<TeamMap<Decimal>, StatsError> {
    let filter = prepare(year, options)?;
    Ok(awal_in(year, &filter))
}

pub fn awal_per_game(year: &Year, options: &StatOptions) -> Result<TeamMap<Decimal>, StatsError> {
    let filter = prepare(year, options)?;
    awal_per_game_in(year, &filter)
}

/// AWAL earned by each team's opponents, a strength-of-schedule measure.
pub fn opponent_awal(year: &Year, options: &StatOptions) -> Result<TeamMap<Decimal>, StatsError> {
    let filter = prepare(year, options)?;
    Ok(opponent_awal_in(year, &filter))
}

pub fn opponent_awal_per_game(
    year: &Year,
    options: &StatOptions,
) -> Result<TeamMap<Decimal>, StatsError> {
    let filter = prepare(year, options)?;
    opponent_awal_per_game_in(year, &filter)
}

// ---------------------------------------------------------------------------
// Trusted forms
// ---------------------------------------------------------------------------

pub fn awal_in(year: &Year, filter: &YearFilter) -> TeamMap<Decimal> {
    adjusted_wins(year, filter, Subject::Own)
}

pub fn opponent_awal_in(year: &Year, filter: &YearFilter) -> TeamMap<Decimal> {
    adjusted_wins(year, filter, Subject::Opponent)
}

pub fn awal_per_game_in(year: &Year, filter: &YearFilter) -> Result<TeamMap<Decimal>, StatsError> {
    let awal = awal_in(year, filter);
    let games = games_played_in(year, filter);
    Ok(per_game(year, "AWAL per game", &awal, &games)?)
}

pub fn opponent_awal_per_game_in(
    year: &Year,
    filter: &YearFilter,
) -> Result<TeamMap<Decimal>, StatsError> {
    let awal = opponent_awal_in(year, filter);
    let games = games_played_in(year, filter);
    Ok(per_game(year, "opponent AWAL per game", &awal, &games)?)
}

// ---------------------------------------------------------------------------
// Pairwise comparison
// ---------------------------------------------------------------------------

/// Whose score a team is credited with in the comparison.
#[derive(Debug, Clone, Copy)]
enum Subject {
    Own,
    Opponent,
}

fn adjusted_wins(year: &Year, filter: &YearFilter, subject: Subject) -> TeamMap<Decimal> {
    let half = Decimal::new(5, 1);
    let mut totals = zeroed(year);

    for week in filter.weeks(year) {
        let entries: Vec<(&TeamId, Decimal)> = filter
            .matchups_in(week)
            .flat_map(|m| m.sides())
            .map(|(team_id, own, opponent)| match subject {
                Subject::Own => (team_id, own),
                Subject::Opponent => (team_id, opponent),
            })
            .collect();
        if entries.is_empty() {
            continue;
        }

        // Each included matchup puts two scores in the field.
        let opponents = Decimal::from(entries.len() - 1);
        let mut field: Vec<Decimal> = entries.iter().map(|(_, score)| *score).collect();
        field.sort_unstable();
        trace!(
            "year {} week {}: {} scores in field",
            year.year_number,
            week.week_number,
            field.len()
        );

        for (team_id, score) in entries {
            let outscored = field.partition_point(|s| *s < score);
            let tied = field.partition_point(|s| *s <= score) - outscored - 1;
            let earned = (Decimal::from(outscored) + Decimal::from(tied) * half) / opponents;
            *totals.entry(team_id.clone()).or_default() += earned;
        }
    }
    totals
}
