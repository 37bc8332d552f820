// Error types shared by the validator, resolver and calculators.

use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;

// ---------------------------------------------------------------------------
// Structural errors (record shape)
// ---------------------------------------------------------------------------

/// Which level of the league record a structural error was found at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    League,
    Owner,
    Year,
    Team,
    Week,
    Matchup,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::League => "league",
            RecordKind::Owner => "owner",
            RecordKind::Year => "year",
            RecordKind::Team => "team",
            RecordKind::Week => "week",
            RecordKind::Matchup => "matchup",
        };
        f.write_str(label)
    }
}

/// A league record that violates a shape or type rule.
///
/// The message names the offending year/week and the exact rule, e.g.
/// `Year 2000 has duplicate week numbers.`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StructuralError {
    pub kind: RecordKind,
    pub message: String,
}

impl StructuralError {
    pub fn new(kind: RecordKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Undefined results (division by zero inherent to a statistic)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{statistic} is undefined for {subject}: no games played in range")]
pub struct UndefinedResultError {
    pub statistic: &'static str,
    pub subject: String,
}

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("invalid league record: {0}")]
    Structural(#[from] StructuralError),

    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    UndefinedResult(#[from] UndefinedResultError),
}
