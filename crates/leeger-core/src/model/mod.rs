// Record model: league -> year -> week -> matchup, plus owners and teams.

pub mod import;
mod league;
mod ownership;

pub use league::{League, Matchup, MatchupType, Owner, OwnerId, Team, TeamId, Week, Year};
pub use ownership::TeamOwnership;
