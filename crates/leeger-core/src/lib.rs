// Library root: filtered statistics over a multi-season league record.
//
// Pipeline: validate the record, resolve the caller's options into an
// execution window, run season calculators, combine seasons per owner.

pub mod calc;
pub mod combine;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ConfigError, StatOptions};
pub use error::{RecordKind, StatsError, StructuralError, UndefinedResultError};
pub use filter::{LeagueFilter, Season, Segment, YearFilter};
pub use model::{League, Matchup, MatchupType, Owner, OwnerId, Team, TeamId, Week, Year};
