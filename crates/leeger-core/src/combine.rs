// Cross-season combinators: merge per-season team results into per-owner
// results, either by summation or by a games-weighted average.

use std::collections::HashMap;
use std::ops::AddAssign;

use rust_decimal::Decimal;
use tracing::debug;

use crate::calc::game_outcome::games_played_in;
use crate::calc::{OwnerMap, TeamMap};
use crate::error::UndefinedResultError;
use crate::filter::{LeagueFilter, YearFilter};
use crate::model::{Owner, TeamOwnership, Year};

/// A per-season rate expressed as `numerator / games played`.
///
/// Combining seasons uses the numerator directly, so the all-time rate is
/// `sum(numerator) / sum(games)`, the games-weighted mean of the season rates.
#[derive(Clone, Copy)]
pub struct RateStat {
    pub name: &'static str,
    pub numerator: fn(&Year, &YearFilter) -> TeamMap<Decimal>,
}

impl std::fmt::Debug for RateStat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateStat").field("name", &self.name).finish()
    }
}

/// Sum a season statistic per owner across every season in `filter`.
///
/// Owners without a team in a season contribute nothing for it; every owner
/// of `owners` is present in the result.
pub fn add_and_combine<V, F>(filter: &LeagueFilter<'_>, owners: &[Owner], stat_in: F) -> OwnerMap<V>
where
    V: Default + AddAssign,
    F: Fn(&Year, &YearFilter) -> TeamMap<V>,
{
    let mut totals: OwnerMap<V> = owners.iter().map(|o| (o.id.clone(), V::default())).collect();

    for season in &filter.seasons {
        let ownership = TeamOwnership::for_year(season.year);
        let season_values = stat_in(season.year, &season.filter);
        for (team_id, value) in season_values {
            let Some(owner_id) = ownership.owner_of(&team_id) else {
                continue;
            };
            if let Some(total) = totals.get_mut(owner_id) {
                *total += value;
            }
        }
        debug!("added season {} into owner totals", season.year.year_number);
    }
    totals
}

/// Games-weighted average of a rate per owner across every season in
/// `filter`.
///
/// Seasons where the owner's team played no games carry no weight. An owner
/// with no games at all has no defined rate.
pub fn average_and_combine(
    filter: &LeagueFilter<'_>,
    owners: &[Owner],
    rate: &RateStat,
) -> Result<OwnerMap<Decimal>, UndefinedResultError> {
    let mut sums: HashMap<_, (Decimal, u32)> = owners.iter().map(|o| (&o.id, (Decimal::ZERO, 0))).collect();

    for season in &filter.seasons {
        let ownership = TeamOwnership::for_year(season.year);
        let numerators = (rate.numerator)(season.year, &season.filter);
        let games = games_played_in(season.year, &season.filter);
        for team in &season.year.teams {
            let Some(owner_id) = ownership.owner_of(&team.id) else {
                continue;
            };
            let Some((numerator, weight)) = sums.get_mut(owner_id) else {
                continue;
            };
            *numerator += numerators.get(&team.id).copied().unwrap_or_default();
            *weight += games.get(&team.id).copied().unwrap_or(0);
        }
        debug!(
            "weighted season {} into owner {} averages",
            season.year.year_number, rate.name
        );
    }

    let mut averages = OwnerMap::with_capacity(owners.len());
    for owner in owners {
        let (numerator, weight) = sums.get(&owner.id).copied().unwrap_or_default();
        if weight == 0 {
            return Err(UndefinedResultError {
                statistic: rate.name,
                subject: format!("owner '{}'", owner.name),
            });
        }
        averages.insert(owner.id.clone(), numerator / Decimal::from(weight));
    }
    Ok(averages)
}
