// Integrity validation for league records.
//
// Walks the record top-down and stops at the first violated rule. Calculators
// rely on these invariants (contiguous weeks, one appearance per team per
// week, known owners) and never re-check them.

use std::collections::HashSet;

use crate::error::{RecordKind, StructuralError};
use crate::model::{League, OwnerId, Week, Year};

/// Earliest season a league record may contain.
pub const MIN_YEAR_NUMBER: i32 = 1920;
/// Latest season a league record may contain.
pub const MAX_YEAR_NUMBER: i32 = 2999;

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validate a whole league: league-level rules, then every year and week.
pub fn validate_league(league: &League) -> Result<(), StructuralError> {
    check_league(league)?;
    let owner_ids: HashSet<&OwnerId> = league.owners.iter().map(|o| &o.id).collect();
    for year in &league.years {
        check_year(year, Some(&owner_ids))?;
    }
    Ok(())
}

/// Validate a single season on its own.
///
/// Owner references cannot be checked without the league, so only the
/// year-local rules apply.
pub fn validate_year(year: &Year) -> Result<(), StructuralError> {
    check_year(year, None)
}

// ---------------------------------------------------------------------------
// League
// ---------------------------------------------------------------------------

fn check_league(league: &League) -> Result<(), StructuralError> {
    let err = |msg: &str| Err(StructuralError::new(RecordKind::League, msg));

    if league.years.is_empty() {
        return err("League must have at least 1 year.");
    }
    if !all_unique(league.owners.iter().map(|o| &o.id)) {
        return err("League has owners with duplicate IDs.");
    }
    if !all_unique(league.owners.iter().map(|o| o.name.as_str())) {
        return err("League has owners with duplicate names.");
    }
    if !all_unique(league.years.iter().map(|y| y.year_number)) {
        return err("League has years with duplicate year numbers.");
    }
    if league
        .years
        .windows(2)
        .any(|pair| pair[0].year_number > pair[1].year_number)
    {
        return err("League years must be in ascending order.");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Year
// ---------------------------------------------------------------------------

fn check_year(year: &Year, league_owners: Option<&HashSet<&OwnerId>>) -> Result<(), StructuralError> {
    let n = year.year_number;
    let err = |msg: String| Err(StructuralError::new(RecordKind::Year, msg));

    if year.weeks.is_empty() {
        return err(format!("Year {n} does not have at least 1 week."));
    }
    if year.teams.len() < 2 {
        return err(format!("Year {n} needs at least 2 teams."));
    }
    if !all_unique(year.teams.iter().map(|t| &t.id)) {
        return err(format!("Year {n} has teams with duplicate IDs."));
    }
    if !all_unique(year.teams.iter().map(|t| &t.owner_id)) {
        return err(format!("Year {n} has teams with the same owner IDs."));
    }
    if !all_unique(year.teams.iter().map(|t| t.name.as_str())) {
        return err(format!("Year {n} has teams with duplicate names."));
    }
    if let Some(owners) = league_owners {
        if let Some(team) = year.teams.iter().find(|t| !owners.contains(&t.owner_id)) {
            return Err(StructuralError::new(
                RecordKind::Team,
                format!("Team '{}' in year {n} references an unknown owner.", team.name),
            ));
        }
    }

    check_week_order(year)?;

    if !(MIN_YEAR_NUMBER..=MAX_YEAR_NUMBER).contains(&n) {
        return err(format!(
            "Year {n} is not in range {MIN_YEAR_NUMBER}-{MAX_YEAR_NUMBER}."
        ));
    }

    for week in &year.weeks {
        check_week(year, week)?;
    }
    Ok(())
}

/// Week numbering and segment ordering within one year.
fn check_week_order(year: &Year) -> Result<(), StructuralError> {
    let n = year.year_number;
    let err = |msg: String| Err(StructuralError::new(RecordKind::Year, msg));

    if !all_unique(year.weeks.iter().map(|w| w.week_number)) {
        return err(format!("Year {n} has duplicate week numbers."));
    }
    let first = year.weeks.iter().map(|w| w.week_number).min().unwrap_or(1);
    if first != 1 {
        return err(format!("First week in year {n} must be 1, not {first}."));
    }
    if year
        .weeks
        .iter()
        .enumerate()
        .any(|(i, w)| w.week_number as usize != i + 1)
    {
        return err(format!("Year {n} does not have week numbers in order (1-n)."));
    }

    let mut seen_playoff = false;
    let mut seen_championship = false;
    for week in &year.weeks {
        if seen_playoff && !week.is_playoff_week {
            return err(format!("Year {n} has a non-playoff week after a playoff week."));
        }
        if seen_championship && !week.is_championship_week {
            return err(format!(
                "Year {n} has a non-championship week after a championship week."
            ));
        }
        seen_playoff |= week.is_playoff_week;
        seen_championship |= week.is_championship_week;
    }

    if year.weeks.iter().filter(|w| w.is_championship_week).count() > 1 {
        return err(format!("Year {n} has more than 1 championship week."));
    }
    if let Some(week) = year
        .weeks
        .iter()
        .find(|w| w.is_championship_week && !w.is_playoff_week)
    {
        return Err(StructuralError::new(
            RecordKind::Week,
            format!(
                "Week {} in year {n} is a championship week but not a playoff week.",
                week.week_number
            ),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Week / matchups
// ---------------------------------------------------------------------------

fn check_week(year: &Year, week: &Week) -> Result<(), StructuralError> {
    let (n, w) = (year.year_number, week.week_number);

    if week.matchups.is_empty() {
        return Err(StructuralError::new(
            RecordKind::Week,
            format!("Week {w} in year {n} must have at least 1 matchup."),
        ));
    }

    let year_teams: HashSet<_> = year.team_ids().collect();
    let mut playing = HashSet::new();
    for matchup in &week.matchups {
        let err = |msg: String| Err(StructuralError::new(RecordKind::Matchup, msg));

        for team_id in [&matchup.team_a_id, &matchup.team_b_id] {
            if !year_teams.contains(team_id) {
                return err(format!(
                    "Matchup in week {w} of year {n} references team '{team_id}' that is not in that year."
                ));
            }
        }
        if matchup.team_a_id == matchup.team_b_id {
            return err(format!(
                "Matchup in week {w} of year {n} has team '{}' playing itself.",
                matchup.team_a_id
            ));
        }
        for team_id in [&matchup.team_a_id, &matchup.team_b_id] {
            if !playing.insert(team_id) {
                return err(format!(
                    "Team '{team_id}' plays more than once in week {w} of year {n}."
                ));
            }
        }
    }
    Ok(())
}

fn all_unique<T: Eq + std::hash::Hash>(items: impl IntoIterator<Item = T>) -> bool {
    let mut seen = HashSet::new();
    items.into_iter().all(|item| seen.insert(item))
}
