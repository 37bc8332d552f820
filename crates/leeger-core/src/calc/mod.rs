// Season calculators and their league-scoped counterparts.
//
// Every season statistic comes in two forms: a public entry point taking raw
// `StatOptions` (validate, resolve, compute) and a trusted `*_in` form taking
// an already resolved `YearFilter`, used by the combinators.

pub mod all_time;
pub mod awal;
pub mod game_outcome;
pub mod points;
pub mod year_outcome;

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::config::StatOptions;
use crate::error::{StatsError, UndefinedResultError};
use crate::filter::{resolve_year, YearFilter};
use crate::model::{OwnerId, TeamId, Year};
use crate::validate::validate_year;

/// Per-season result, keyed by every team of the season.
pub type TeamMap<V> = HashMap<TeamId, V>;

/// Cross-season result, keyed by every owner of the league.
pub type OwnerMap<V> = HashMap<OwnerId, V>;

/// Validate the season, then resolve the caller's options against it.
pub(crate) fn prepare(year: &Year, options: &StatOptions) -> Result<YearFilter, StatsError> {
    validate_year(year)?;
    Ok(resolve_year(year, options)?)
}

/// A map with every team of `year` at the zero value.
pub(crate) fn zeroed<V: Default>(year: &Year) -> TeamMap<V> {
    year.team_ids().map(|id| (id.clone(), V::default())).collect()
}

/// `numerator / games` for every team, failing on the first team (in roster
/// order) that played no games.
pub(crate) fn per_game(
    year: &Year,
    statistic: &'static str,
    numerators: &TeamMap<Decimal>,
    games: &TeamMap<u32>,
) -> Result<TeamMap<Decimal>, UndefinedResultError> {
    let mut rates = TeamMap::with_capacity(year.teams.len());
    for team in &year.teams {
        let played = games.get(&team.id).copied().unwrap_or(0);
        if played == 0 {
            return Err(UndefinedResultError {
                statistic,
                subject: format!("team '{}' in {}", team.name, year.year_number),
            });
        }
        let numerator = numerators.get(&team.id).copied().unwrap_or_default();
        rates.insert(team.id.clone(), numerator / Decimal::from(played));
    }
    Ok(rates)
}
