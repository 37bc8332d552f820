// Statistic options: parsing, loading from TOML files, and static validation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::Segment;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("options file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse options file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Unparseable text or an unknown option key.
    #[error("malformed options: {0}")]
    Malformed(String),

    #[error("validation error for option `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// StatOptions
// ---------------------------------------------------------------------------

/// Caller-supplied filter options for a statistic. Every option is optional.
///
/// Keys are camelCase on the wire (`yearNumberStart`, `onlyPostSeason`, ...)
/// and unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct StatOptions {
    /// First season counted (inclusive). Defaults to the earliest season.
    pub year_number_start: Option<i32>,
    /// Last season counted (inclusive). Defaults to the latest season.
    pub year_number_end: Option<i32>,
    /// First week counted in the first season of the range.
    pub week_number_start: Option<u32>,
    /// Last week counted in the last season of the range.
    pub week_number_end: Option<u32>,
    #[serde(default)]
    pub only_regular_season: bool,
    #[serde(default)]
    pub only_post_season: bool,
    #[serde(default)]
    pub only_championship: bool,
}

impl StatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year_start(mut self, year_number: i32) -> Self {
        self.year_number_start = Some(year_number);
        self
    }

    pub fn year_end(mut self, year_number: i32) -> Self {
        self.year_number_end = Some(year_number);
        self
    }

    pub fn week_start(mut self, week_number: u32) -> Self {
        self.week_number_start = Some(week_number);
        self
    }

    pub fn week_end(mut self, week_number: u32) -> Self {
        self.week_number_end = Some(week_number);
        self
    }

    pub fn regular_season_only(mut self) -> Self {
        self.only_regular_season = true;
        self
    }

    pub fn post_season_only(mut self) -> Self {
        self.only_post_season = true;
        self
    }

    pub fn championship_only(mut self) -> Self {
        self.only_championship = true;
        self
    }

    pub fn has_year_bounds(&self) -> bool {
        self.year_number_start.is_some() || self.year_number_end.is_some()
    }

    /// The segment selector, rejecting more than one `only*` flag.
    pub fn segment(&self) -> Result<Segment, ConfigError> {
        let selected: Vec<(&str, Segment)> = [
            ("onlyRegularSeason", self.only_regular_season, Segment::RegularSeason),
            ("onlyPostSeason", self.only_post_season, Segment::PostSeason),
            ("onlyChampionship", self.only_championship, Segment::Championship),
        ]
        .into_iter()
        .filter(|(_, on, _)| *on)
        .map(|(name, _, segment)| (name, segment))
        .collect();

        match selected.as_slice() {
            [] => Ok(Segment::All),
            [(_, segment)] => Ok(*segment),
            [(first, _), (second, _), ..] => Err(ConfigError::invalid(
                second,
                format!("cannot be combined with `{first}`; at most one segment selector may be set"),
            )),
        }
    }

    /// Checks that need no league: segment exclusivity, 1-based weeks, and
    /// ordered year bounds.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.segment()?;

        for (field, value) in [
            ("weekNumberStart", self.week_number_start),
            ("weekNumberEnd", self.week_number_end),
        ] {
            if value == Some(0) {
                return Err(ConfigError::invalid(field, "week numbers start at 1"));
            }
        }

        if let (Some(start), Some(end)) = (self.year_number_start, self.year_number_end) {
            if start > end {
                return Err(ConfigError::invalid(
                    "yearNumberStart",
                    format!("must not be after yearNumberEnd ({start} > {end})"),
                ));
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let options: StatOptions =
            toml::from_str(text).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        options.check()?;
        Ok(options)
    }

    /// Accepts a JSON object such as `{"yearNumberStart": 2001, "onlyPostSeason": true}`.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, ConfigError> {
        let options = StatOptions::deserialize(value).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        options.check()?;
        Ok(options)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate options from a TOML file.
pub fn load_options(path: &Path) -> Result<StatOptions, ConfigError> {
    let text = read_file(path)?;
    let options: StatOptions = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    options.check()?;
    Ok(options)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
