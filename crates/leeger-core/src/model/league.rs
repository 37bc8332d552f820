// League record value objects.
//
// Everything here is plain data. Shape rules (contiguous weeks, unique owners
// per year, ...) are enforced by `crate::validate`, not by the constructors.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// A fresh random (v4) identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

record_id!(
    /// Stable identity of a person across every season of a league.
    OwnerId
);
record_id!(
    /// Identity of one owner's entry in one season.
    TeamId
);

// ---------------------------------------------------------------------------
// Owner / Team
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
}

impl Owner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: OwnerId::generate(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    /// The owner controlling this team for its season.
    pub owner_id: OwnerId,
    pub name: String,
}

impl Team {
    pub fn new(owner_id: OwnerId, name: impl Into<String>) -> Self {
        Self {
            id: TeamId::generate(),
            owner_id,
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Matchup
// ---------------------------------------------------------------------------

/// How a matchup counts toward statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchupType {
    #[default]
    Regular,
    Playoff,
    Championship,
    /// Excluded from every statistic.
    Ignore,
}

impl MatchupType {
    /// Playoff and championship games both count as post-season.
    pub fn is_post_season(&self) -> bool {
        matches!(self, MatchupType::Playoff | MatchupType::Championship)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchupType::Regular => "REGULAR",
            MatchupType::Playoff => "PLAYOFF",
            MatchupType::Championship => "CHAMPIONSHIP",
            MatchupType::Ignore => "IGNORE",
        }
    }
}

impl FromStr for MatchupType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "REGULAR" => Ok(MatchupType::Regular),
            "PLAYOFF" => Ok(MatchupType::Playoff),
            "CHAMPIONSHIP" => Ok(MatchupType::Championship),
            "IGNORE" => Ok(MatchupType::Ignore),
            other => Err(format!("unknown matchup type '{other}'")),
        }
    }
}

/// One game between two teams in one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    pub team_a_id: TeamId,
    pub team_b_id: TeamId,
    pub team_a_score: Decimal,
    pub team_b_score: Decimal,
    pub matchup_type: MatchupType,
}

impl Matchup {
    pub fn new(
        team_a_id: TeamId,
        team_b_id: TeamId,
        team_a_score: Decimal,
        team_b_score: Decimal,
    ) -> Self {
        Self {
            team_a_id,
            team_b_id,
            team_a_score,
            team_b_score,
            matchup_type: MatchupType::Regular,
        }
    }

    pub fn with_type(mut self, matchup_type: MatchupType) -> Self {
        self.matchup_type = matchup_type;
        self
    }

    /// The segment this matchup counts toward inside `week`.
    ///
    /// An explicit tag wins. A matchup left at the default `Regular` tag
    /// inherits its week's flags.
    pub fn effective_type(&self, week: &Week) -> MatchupType {
        match self.matchup_type {
            MatchupType::Regular if week.is_championship_week => MatchupType::Championship,
            MatchupType::Regular if week.is_playoff_week => MatchupType::Playoff,
            other => other,
        }
    }

    pub fn involves(&self, team_id: &TeamId) -> bool {
        &self.team_a_id == team_id || &self.team_b_id == team_id
    }

    /// Both sides as `(team, own score, opponent score)`.
    pub fn sides(&self) -> [(&TeamId, Decimal, Decimal); 2] {
        [
            (&self.team_a_id, self.team_a_score, self.team_b_score),
            (&self.team_b_id, self.team_b_score, self.team_a_score),
        ]
    }

    /// The winning team, or `None` on a tie.
    pub fn winner(&self) -> Option<&TeamId> {
        if self.team_a_score > self.team_b_score {
            Some(&self.team_a_id)
        } else if self.team_b_score > self.team_a_score {
            Some(&self.team_b_id)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Week / Year / League
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    /// 1-based position of the week inside its year.
    pub week_number: u32,
    pub is_playoff_week: bool,
    pub is_championship_week: bool,
    pub matchups: Vec<Matchup>,
}

impl Week {
    /// A regular-season week.
    pub fn new(week_number: u32, matchups: Vec<Matchup>) -> Self {
        Self {
            week_number,
            is_playoff_week: false,
            is_championship_week: false,
            matchups,
        }
    }

    pub fn playoff(week_number: u32, matchups: Vec<Matchup>) -> Self {
        Self {
            is_playoff_week: true,
            ..Self::new(week_number, matchups)
        }
    }

    /// A championship week is always a playoff week too.
    pub fn championship(week_number: u32, matchups: Vec<Matchup>) -> Self {
        Self {
            is_playoff_week: true,
            is_championship_week: true,
            ..Self::new(week_number, matchups)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Year {
    pub year_number: i32,
    pub teams: Vec<Team>,
    pub weeks: Vec<Week>,
}

impl Year {
    pub fn new(year_number: i32, teams: Vec<Team>, weeks: Vec<Week>) -> Self {
        Self {
            year_number,
            teams,
            weeks,
        }
    }

    pub fn team_ids(&self) -> impl Iterator<Item = &TeamId> {
        self.teams.iter().map(|t| &t.id)
    }

    pub fn team(&self, team_id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| &t.id == team_id)
    }

    pub fn has_week(&self, week_number: u32) -> bool {
        self.weeks.iter().any(|w| w.week_number == week_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub name: String,
    pub owners: Vec<Owner>,
    pub years: Vec<Year>,
}

impl League {
    pub fn new(name: impl Into<String>, owners: Vec<Owner>, years: Vec<Year>) -> Self {
        Self {
            name: name.into(),
            owners,
            years,
        }
    }

    pub fn year(&self, year_number: i32) -> Option<&Year> {
        self.years.iter().find(|y| y.year_number == year_number)
    }
}
