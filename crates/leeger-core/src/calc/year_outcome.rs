// Season outcomes decided by championship games.

use super::{prepare, zeroed, TeamMap};
use crate::config::StatOptions;
use crate::error::StatsError;
use crate::filter::YearFilter;
use crate::model::{MatchupType, Year};

/// 1 for the winner of the season's championship matchup, 0 for everyone
/// else. A tied championship awards nothing.
pub fn championship_count(year: &Year, options: &StatOptions) -> Result<TeamMap<u32>, StatsError> {
    let filter = prepare(year, options)?;
    Ok(championship_count_in(year, &filter))
}

pub fn championship_count_in(year: &Year, filter: &YearFilter) -> TeamMap<u32> {
    let mut counts = zeroed(year);
    for (week, matchup) in filter.matchups(year) {
        if matchup.effective_type(week) != MatchupType::Championship {
            continue;
        }
        if let Some(winner) = matchup.winner() {
            *counts.entry(winner.clone()).or_default() += 1;
        }
    }
    counts
}
