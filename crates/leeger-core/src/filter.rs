// Filter resolution: turns sparse `StatOptions` into concrete execution windows.
//
// A `YearFilter` says which weeks of one season count and which matchups
// inside those weeks count. A `LeagueFilter` is the ordered list of seasons in
// range, each with its own `YearFilter`; week bounds only narrow the first
// and last season.

use tracing::debug;

use crate::config::{ConfigError, StatOptions};
use crate::model::{League, Matchup, MatchupType, Week, Year};

// ---------------------------------------------------------------------------
// Segment selector
// ---------------------------------------------------------------------------

/// Which part of a season is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Segment {
    /// Every matchup not tagged `Ignore`.
    #[default]
    All,
    RegularSeason,
    /// Playoff and championship matchups.
    PostSeason,
    Championship,
}

impl Segment {
    /// Whether `matchup`, played in `week`, counts under this selector.
    pub fn includes(&self, week: &Week, matchup: &Matchup) -> bool {
        let effective = matchup.effective_type(week);
        if effective == MatchupType::Ignore {
            return false;
        }
        match self {
            Segment::All => true,
            Segment::RegularSeason => effective == MatchupType::Regular,
            Segment::PostSeason => effective.is_post_season(),
            Segment::Championship => effective == MatchupType::Championship,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved windows
// ---------------------------------------------------------------------------

/// Inclusive week window plus segment selector for one season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearFilter {
    pub week_start: u32,
    pub week_end: u32,
    pub segment: Segment,
}

impl YearFilter {
    /// Every week of `year` under `segment`.
    pub fn full(year: &Year, segment: Segment) -> Self {
        Self {
            week_start: 1,
            week_end: year.weeks.len() as u32,
            segment,
        }
    }

    /// The weeks inside the window. Relies on validated 1..N week numbering.
    pub fn weeks<'y>(&self, year: &'y Year) -> &'y [Week] {
        let start = self.week_start.saturating_sub(1) as usize;
        let end = (self.week_end as usize).min(year.weeks.len());
        year.weeks.get(start..end).unwrap_or(&[])
    }

    /// The matchups of `week` that count under the segment selector.
    pub fn matchups_in<'w>(&self, week: &'w Week) -> impl Iterator<Item = &'w Matchup> + 'w {
        let segment = self.segment;
        week.matchups
            .iter()
            .filter(move |m| segment.includes(week, m))
    }

    /// Every counted matchup in the window, in week order.
    pub fn matchups<'y>(&self, year: &'y Year) -> impl Iterator<Item = (&'y Week, &'y Matchup)> + 'y {
        let filter = *self;
        self.weeks(year)
            .iter()
            .flat_map(move |week| filter.matchups_in(week).map(move |m| (week, m)))
    }
}

/// One season of a league-wide window.
#[derive(Debug, Clone, Copy)]
pub struct Season<'a> {
    pub year: &'a Year,
    pub filter: YearFilter,
}

/// The seasons in range, ascending, each with its own window.
#[derive(Debug, Clone)]
pub struct LeagueFilter<'a> {
    pub seasons: Vec<Season<'a>>,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve options for a single-season calculation.
///
/// Year bounds make no sense here and are rejected. Week bounds default to
/// the whole season and must name existing weeks.
pub fn resolve_year(year: &Year, options: &StatOptions) -> Result<YearFilter, ConfigError> {
    options.check()?;
    let segment = options.segment()?;

    if options.has_year_bounds() {
        let field = if options.year_number_start.is_some() {
            "yearNumberStart"
        } else {
            "yearNumberEnd"
        };
        return Err(ConfigError::invalid(
            field,
            "only applies to league-wide statistics, not a single season",
        ));
    }

    let week_start = options.week_number_start.unwrap_or(1);
    let week_end = options
        .week_number_end
        .unwrap_or(year.weeks.len() as u32);
    require_week(year, "weekNumberStart", week_start)?;
    require_week(year, "weekNumberEnd", week_end)?;
    require_ordered_weeks(week_start, week_end)?;

    let filter = YearFilter {
        week_start,
        week_end,
        segment,
    };
    debug!(
        "resolved year {} window: weeks {}-{}, {:?}",
        year.year_number, week_start, week_end, segment
    );
    Ok(filter)
}

/// Resolve options for a league-wide calculation.
///
/// Year bounds default to the first and last season. `weekNumberStart`
/// narrows only the first season in range and `weekNumberEnd` only the last;
/// seasons in between always count every week.
pub fn resolve_league<'a>(league: &'a League, options: &StatOptions) -> Result<LeagueFilter<'a>, ConfigError> {
    options.check()?;
    let segment = options.segment()?;

    let (Some(first), Some(last)) = (league.years.first(), league.years.last()) else {
        return Err(ConfigError::invalid("yearNumberStart", "league has no seasons"));
    };
    let year_start = options.year_number_start.unwrap_or(first.year_number);
    let year_end = options.year_number_end.unwrap_or(last.year_number);

    let start_year = league.year(year_start).ok_or_else(|| {
        ConfigError::invalid(
            "yearNumberStart",
            format!("year {year_start} does not exist in league"),
        )
    })?;
    let end_year = league.year(year_end).ok_or_else(|| {
        ConfigError::invalid(
            "yearNumberEnd",
            format!("year {year_end} does not exist in league"),
        )
    })?;
    if year_start > year_end {
        return Err(ConfigError::invalid(
            "yearNumberStart",
            format!("must not be after yearNumberEnd ({year_start} > {year_end})"),
        ));
    }

    if let Some(week) = options.week_number_start {
        require_week(start_year, "weekNumberStart", week)?;
    }
    if let Some(week) = options.week_number_end {
        require_week(end_year, "weekNumberEnd", week)?;
    }

    let seasons: Vec<Season<'a>> = league
        .years
        .iter()
        .filter(|y| (year_start..=year_end).contains(&y.year_number))
        .map(|year| {
            let mut filter = YearFilter::full(year, segment);
            if year.year_number == year_start {
                filter.week_start = options.week_number_start.unwrap_or(1);
            }
            if year.year_number == year_end {
                filter.week_end = options.week_number_end.unwrap_or(filter.week_end);
            }
            Season { year, filter }
        })
        .collect();

    if let Some(only) = seasons.first().filter(|_| year_start == year_end) {
        require_ordered_weeks(only.filter.week_start, only.filter.week_end)?;
    }

    debug!(
        "resolved league '{}' window: years {}-{} ({} seasons), {:?}",
        league.name,
        year_start,
        year_end,
        seasons.len(),
        segment
    );
    Ok(LeagueFilter { seasons })
}

fn require_week(year: &Year, field: &str, week_number: u32) -> Result<(), ConfigError> {
    if year.has_week(week_number) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!(
                "week {week_number} does not exist in year {}",
                year.year_number
            ),
        ))
    }
}

fn require_ordered_weeks(week_start: u32, week_end: u32) -> Result<(), ConfigError> {
    if week_start > week_end {
        return Err(ConfigError::invalid(
            "weekNumberStart",
            format!("must not be after weekNumberEnd ({week_start} > {week_end})"),
        ));
    }
    Ok(())
}
