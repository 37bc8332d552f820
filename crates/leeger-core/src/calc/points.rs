// Scoring aggregates: points for, points against, points per game.

use rust_decimal::Decimal;

use super::game_outcome::games_played_in;
use super::{per_game, prepare, zeroed, TeamMap};
use crate::config::StatOptions;
use crate::error::StatsError;
use crate::filter::YearFilter;
use crate::model::Year;

pub fn points_scored(year: &Year, options: &StatOptions) -> Result<TeamMap<Decimal>, StatsError> {
    let filter = prepare(year, options)?;
    Ok(points_scored_in(year, &filter))
}

pub fn opponent_points_scored(
    year: &Year,
    options: &StatOptions,
) -> Result<TeamMap<Decimal>, StatsError> {
    let filter = prepare(year, options)?;
    Ok(opponent_points_scored_in(year, &filter))
}

pub fn points_scored_per_game(
    year: &Year,
    options: &StatOptions,
) -> Result<TeamMap<Decimal>, StatsError> {
    let filter = prepare(year, options)?;
    points_scored_per_game_in(year, &filter)
}

pub fn points_scored_in(year: &Year, filter: &YearFilter) -> TeamMap<Decimal> {
    let mut totals = zeroed(year);
    for (_, matchup) in filter.matchups(year) {
        for (team_id, own, _) in matchup.sides() {
            *totals.entry(team_id.clone()).or_default() += own;
        }
    }
    totals
}

pub fn opponent_points_scored_in(year: &Year, filter: &YearFilter) -> TeamMap<Decimal> {
    let mut totals = zeroed(year);
    for (_, matchup) in filter.matchups(year) {
        for (team_id, _, opponent) in matchup.sides() {
            *totals.entry(team_id.clone()).or_default() += opponent;
        }
    }
    totals
}

pub fn points_scored_per_game_in(
    year: &Year,
    filter: &YearFilter,
) -> Result<TeamMap<Decimal>, StatsError> {
    let points = points_scored_in(year, filter);
    let games = games_played_in(year, filter);
    Ok(per_game(year, "points scored per game", &points, &games)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Week;
    use crate::test_support::{owners_and_teams, score_matchup};
    use rust_decimal_macros::dec;

    fn two_week_year() -> (Year, Vec<crate::model::Team>) {
        let (_, teams) = owners_and_teams(2);
        let weeks = vec![
            Week::new(1, vec![score_matchup(&teams, 0, 1, dec!(100.5), dec!(90.25))]),
            Week::playoff(2, vec![score_matchup(&teams, 0, 1, dec!(80), dec!(110.75))]),
        ];
        (Year::new(2000, teams.clone(), weeks), teams)
    }

    #[test]
    fn sums_points_for_and_against() {
        let (year, teams) = two_week_year();
        let scored = points_scored(&year, &StatOptions::default()).unwrap();
        let against = opponent_points_scored(&year, &StatOptions::default()).unwrap();

        assert_eq!(scored[&teams[0].id], dec!(180.5));
        assert_eq!(scored[&teams[1].id], dec!(201.0));
        assert_eq!(against[&teams[0].id], scored[&teams[1].id]);
        assert_eq!(against[&teams[1].id], scored[&teams[0].id]);
    }

    #[test]
    fn points_respect_segment() {
        let (year, teams) = two_week_year();
        let regular = points_scored(&year, &StatOptions::new().regular_season_only()).unwrap();
        assert_eq!(regular[&teams[0].id], dec!(100.5));
        assert_eq!(regular[&teams[1].id], dec!(90.25));
    }

    #[test]
    fn points_per_game() {
        let (year, teams) = two_week_year();
        let ppg = points_scored_per_game(&year, &StatOptions::default()).unwrap();
        assert_eq!(ppg[&teams[0].id], dec!(90.25));
        assert_eq!(ppg[&teams[1].id], dec!(100.5));

        let err = points_scored_per_game(&year, &StatOptions::new().championship_only()).unwrap_err();
        assert!(matches!(err, StatsError::UndefinedResult(_)));
    }
}
