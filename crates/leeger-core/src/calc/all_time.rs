// League-scoped statistics keyed by owner.
//
// Each entry point validates the league once, resolves the options into a
// per-season window, then hands the trusted season calculator to a
// combinator. Counting statistics are summed; rates are games-weighted.

use rust_decimal::Decimal;

use super::{awal, game_outcome, points, year_outcome, OwnerMap, TeamMap};
use crate::combine::{add_and_combine, average_and_combine, RateStat};
use crate::config::StatOptions;
use crate::error::StatsError;
use crate::filter::{resolve_league, LeagueFilter, YearFilter};
use crate::model::{League, Year};
use crate::validate::validate_league;

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

fn wins_as_decimal(year: &Year, filter: &YearFilter) -> TeamMap<Decimal> {
    game_outcome::wins_in(year, filter)
        .into_iter()
        .map(|(id, n)| (id, Decimal::from(n)))
        .collect()
}

pub const WIN_PERCENTAGE: RateStat = RateStat {
    name: "win percentage",
    numerator: wins_as_decimal,
};

pub const AWAL_PER_GAME: RateStat = RateStat {
    name: "AWAL per game",
    numerator: awal::awal_in,
};

pub const OPPONENT_AWAL_PER_GAME: RateStat = RateStat {
    name: "opponent AWAL per game",
    numerator: awal::opponent_awal_in,
};

pub const POINTS_SCORED_PER_GAME: RateStat = RateStat {
    name: "points scored per game",
    numerator: points::points_scored_in,
};

fn prepare<'a>(league: &'a League, options: &StatOptions) -> Result<LeagueFilter<'a>, StatsError> {
    validate_league(league)?;
    Ok(resolve_league(league, options)?)
}

fn averaged(league: &League, options: &StatOptions, rate: &RateStat) -> Result<OwnerMap<Decimal>, StatsError> {
    let filter = prepare(league, options)?;
    Ok(average_and_combine(&filter, &league.owners, rate)?)
}

// ---------------------------------------------------------------------------
// Game outcomes
// ---------------------------------------------------------------------------

pub fn wins(league: &League, options: &StatOptions) -> Result<OwnerMap<u32>, StatsError> {
    let filter = prepare(league, options)?;
    Ok(add_and_combine(&filter, &league.owners, game_outcome::wins_in))
}

pub fn losses(league: &League, options: &StatOptions) -> Result<OwnerMap<u32>, StatsError> {
    let filter = prepare(league, options)?;
    Ok(add_and_combine(&filter, &league.owners, game_outcome::losses_in))
}

pub fn ties(league: &League, options: &StatOptions) -> Result<OwnerMap<u32>, StatsError> {
    let filter = prepare(league, options)?;
    Ok(add_and_combine(&filter, &league.owners, game_outcome::ties_in))
}

pub fn games_played(league: &League, options: &StatOptions) -> Result<OwnerMap<u32>, StatsError> {
    let filter = prepare(league, options)?;
    Ok(add_and_combine(&filter, &league.owners, game_outcome::games_played_in))
}

pub fn win_percentage(league: &League, options: &StatOptions) -> Result<OwnerMap<Decimal>, StatsError> {
    averaged(league, options, &WIN_PERCENTAGE)
}

// ---------------------------------------------------------------------------
// AWAL
// ---------------------------------------------------------------------------

pub fn awal(league: &League, options: &StatOptions) -> Result<OwnerMap<Decimal>, StatsError> {
    let filter = prepare(league, options)?;
    Ok(add_and_combine(&filter, &league.owners, awal::awal_in))
}

pub fn awal_per_game(league: &League, options: &StatOptions) -> Result<OwnerMap<Decimal>, StatsError> {
    averaged(league, options, &AWAL_PER_GAME)
}

pub fn opponent_awal(league: &League, options: &StatOptions) -> Result<OwnerMap<Decimal>, StatsError> {
    let filter = prepare(league, options)?;
    Ok(add_and_combine(&filter, &league.owners, awal::opponent_awal_in))
}

pub fn opponent_awal_per_game(
    league: &League,
    options: &StatOptions,
) -> Result<OwnerMap<Decimal>, StatsError> {
    averaged(league, options, &OPPONENT_AWAL_PER_GAME)
}

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

pub fn points_scored(league: &League, options: &StatOptions) -> Result<OwnerMap<Decimal>, StatsError> {
    let filter = prepare(league, options)?;
    Ok(add_and_combine(&filter, &league.owners, points::points_scored_in))
}

pub fn opponent_points_scored(
    league: &League,
    options: &StatOptions,
) -> Result<OwnerMap<Decimal>, StatsError> {
    let filter = prepare(league, options)?;
    Ok(add_and_combine(&filter, &league.owners, points::opponent_points_scored_in))
}

pub fn points_scored_per_game(
    league: &League,
    options: &StatOptions,
) -> Result<OwnerMap<Decimal>, StatsError> {
    averaged(league, options, &POINTS_SCORED_PER_GAME)
}

// ---------------------------------------------------------------------------
// Year outcomes
// ---------------------------------------------------------------------------

pub fn championship_count(league: &League, options: &StatOptions) -> Result<OwnerMap<u32>, StatsError> {
    let filter = prepare(league, options)?;
    Ok(add_and_combine(&filter, &league.owners, year_outcome::championship_count_in))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Matchup, MatchupType, Owner, Team, Week};
    use crate::test_support::{owners_and_teams, score_matchup, teams_for};
    use rust_decimal_macros::dec;

    // -----------------------------------------------------------------------
    // Championship scenarios
    // -----------------------------------------------------------------------

    /// Six owners over 2000-2002. Owner 6 wins the tagged championship in 2000
    /// and 2002; 2001 has two untagged weeks.
    fn championship_league() -> League {
        let (owners, teams_a) = owners_and_teams(6);
        let teams_b = teams_for(&owners);
        let teams_c = teams_for(&owners);

        let year_a = Year::new(
            2000,
            teams_a.clone(),
            vec![Week::new(1, vec![
                score_matchup(&teams_a, 0, 1, dec!(1.1), dec!(2.1)).with_type(MatchupType::Ignore),
                score_matchup(&teams_a, 2, 3, dec!(3.1), dec!(4.1)).with_type(MatchupType::Playoff),
                score_matchup(&teams_a, 4, 5, dec!(4.1), dec!(5.1)).with_type(MatchupType::Championship),
            ])],
        );

        fn untagged(teams: &[Team]) -> Vec<Matchup> {
            vec![
                score_matchup(teams, 0, 1, dec!(1.2), dec!(2.2)),
                score_matchup(teams, 2, 3, dec!(3.2), dec!(4.2)),
                score_matchup(teams, 4, 5, dec!(4.2), dec!(5.2)),
            ]
        }
        let year_b = Year::new(
            2001,
            teams_b.clone(),
            vec![Week::new(1, untagged(&teams_b)), Week::new(2, untagged(&teams_b))],
        );

        let year_c = Year::new(
            2002,
            teams_c.clone(),
            vec![Week::new(1, vec![
                score_matchup(&teams_c, 0, 1, dec!(1.3), dec!(2.3)).with_type(MatchupType::Playoff),
                score_matchup(&teams_c, 2, 3, dec!(3.3), dec!(4.3)).with_type(MatchupType::Playoff),
                score_matchup(&teams_c, 4, 5, dec!(4.3), dec!(5.3)).with_type(MatchupType::Championship),
            ])],
        );

        League::new("TEST", owners, vec![year_a, year_b, year_c])
    }

    fn counts_by_owner(league: &League, counts: &OwnerMap<u32>) -> Vec<u32> {
        league.owners.iter().map(|o| counts[&o.id]).collect()
    }

    #[test]
    fn championship_count_under_each_segment() {
        let league = championship_league();
        let cases = [
            (StatOptions::default(), 2),
            (StatOptions::new().post_season_only(), 2),
            (StatOptions::new().regular_season_only(), 0),
            (StatOptions::new().championship_only(), 2),
        ];
        for (options, expected) in cases {
            let counts = championship_count(&league, &options).unwrap();
            assert_eq!(counts.len(), 6);
            assert_eq!(counts_by_owner(&league, &counts), vec![0, 0, 0, 0, 0, expected]);
        }
    }

    #[test]
    fn championship_count_with_year_and_week_bounds() {
        let league = championship_league();
        let cases = [
            (StatOptions::new().year_start(2001).week_start(2), 1),
            (StatOptions::new().year_end(2001).week_end(2), 1),
            (
                StatOptions::new()
                    .year_start(2001)
                    .week_start(1)
                    .year_end(2001)
                    .week_end(2),
                0,
            ),
        ];
        for (options, expected) in cases {
            let counts = championship_count(&league, &options).unwrap();
            assert_eq!(counts_by_owner(&league, &counts), vec![0, 0, 0, 0, 0, expected]);
        }
    }

    // -----------------------------------------------------------------------
    // Combination properties
    // -----------------------------------------------------------------------

    /// Four owners over three seasons; owner "4" only plays in 2001.
    fn mixed_league() -> (League, Vec<Owner>) {
        let (owners, _) = owners_and_teams(4);
        let regulars = &owners[..3];
        let years = [2000, 2001, 2002]
            .into_iter()
            .map(|year_number| {
                if year_number == 2001 {
                    let teams = teams_for(&owners);
                    let weeks = vec![
                        Week::new(1, vec![
                            score_matchup(&teams, 0, 1, dec!(100), dec!(90)),
                            score_matchup(&teams, 2, 3, dec!(80), dec!(110)),
                        ]),
                        Week::playoff(2, vec![
                            score_matchup(&teams, 0, 3, dec!(95), dec!(105)),
                            score_matchup(&teams, 1, 2, dec!(70), dec!(70)),
                        ]),
                    ];
                    Year::new(year_number, teams, weeks)
                } else {
                    let teams = teams_for(regulars);
                    let weeks = vec![
                        Week::new(1, vec![score_matchup(&teams, 0, 1, dec!(120), dec!(60))]),
                        Week::new(2, vec![score_matchup(&teams, 1, 2, dec!(75), dec!(76))]),
                        Week::new(3, vec![score_matchup(&teams, 2, 0, dec!(88), dec!(87))]),
                    ];
                    Year::new(year_number, teams, weeks)
                }
            })
            .collect();
        (League::new("MIXED", owners.clone(), years), owners)
    }

    #[test]
    fn additive_total_is_sum_of_seasons() {
        let (league, owners) = mixed_league();
        let options = StatOptions::default();
        let all_time = points_scored(&league, &options).unwrap();

        for owner in &owners {
            let manual: Decimal = league
                .years
                .iter()
                .filter_map(|year| {
                    let team = year.teams.iter().find(|t| t.owner_id == owner.id)?;
                    let season = points::points_scored(year, &options).ok()?;
                    season.get(&team.id).copied()
                })
                .sum();
            assert_eq!(all_time[&owner.id], manual, "owner {}", owner.name);
        }
    }

    #[test]
    fn owner_in_one_season_matches_that_season() {
        let (league, owners) = mixed_league();
        let options = StatOptions::default();
        let only_season = league.year(2001).unwrap();
        let team_id = &only_season.teams[3].id;
        let late = &owners[3].id;

        let wins_all_time = wins(&league, &options).unwrap();
        let wins_season = game_outcome::wins(only_season, &options).unwrap();
        assert_eq!(wins_all_time[late], wins_season[team_id]);

        let awal_all_time = awal_per_game(&league, &options).unwrap();
        let awal_season = awal::awal_per_game(only_season, &options).unwrap();
        assert_eq!(awal_all_time[late], awal_season[team_id]);

        let pct_all_time = win_percentage(&league, &options).unwrap();
        assert_eq!(pct_all_time[late], dec!(1));
    }

    #[test]
    fn weighted_average_lies_between_season_rates() {
        let (league, owners) = mixed_league();
        let options = StatOptions::default();
        let all_time = points_scored_per_game(&league, &options).unwrap();

        for owner in &owners {
            let season_rates: Vec<Decimal> = league
                .years
                .iter()
                .filter_map(|year| {
                    let team = year.teams.iter().find(|t| t.owner_id == owner.id)?;
                    let season = points::points_scored_per_game(year, &options).ok()?;
                    season.get(&team.id).copied()
                })
                .collect();
            let min = season_rates.iter().min().copied().unwrap();
            let max = season_rates.iter().max().copied().unwrap();
            let rate = all_time[&owner.id];
            assert!(min <= rate && rate <= max, "owner {}: {rate} not in {min}..{max}", owner.name);
        }
    }

    #[test]
    fn regular_plus_post_season_equals_total() {
        let (league, _) = mixed_league();
        let total = wins(&league, &StatOptions::default()).unwrap();
        let regular = wins(&league, &StatOptions::new().regular_season_only()).unwrap();
        let post = wins(&league, &StatOptions::new().post_season_only()).unwrap();
        for (owner_id, n) in &total {
            assert_eq!(regular[owner_id] + post[owner_id], *n);
        }

        let total = points_scored(&league, &StatOptions::default()).unwrap();
        let regular = points_scored(&league, &StatOptions::new().regular_season_only()).unwrap();
        let post = points_scored(&league, &StatOptions::new().post_season_only()).unwrap();
        for (owner_id, value) in &total {
            assert_eq!(regular[owner_id] + post[owner_id], *value);
        }
    }

    #[test]
    fn single_week_window_reproduces_week_contribution() {
        let (league, owners) = mixed_league();
        let options = StatOptions::new()
            .year_start(2001)
            .year_end(2001)
            .week_start(2)
            .week_end(2);
        let league_awal = opponent_awal(&league, &options).unwrap();

        let year = league.year(2001).unwrap();
        let season_awal =
            awal::opponent_awal(year, &StatOptions::new().week_start(2).week_end(2)).unwrap();
        for (owner, team) in owners.iter().zip(&year.teams) {
            assert_eq!(league_awal[&owner.id], season_awal[&team.id]);
        }
    }

    #[test]
    fn rate_without_games_is_undefined_for_owner() {
        let (league, _) = mixed_league();
        // Owner "4" has no team in 2002.
        let options = StatOptions::new().year_start(2002);
        let err = win_percentage(&league, &options).unwrap_err();
        match err {
            StatsError::UndefinedResult(e) => assert!(e.subject.contains("'4'")),
            other => panic!("expected UndefinedResult, got: {other}"),
        }
        // Counting statistics stay defined.
        let games = games_played(&league, &options).unwrap();
        assert_eq!(games[&league.owners[3].id], 0);
    }

    #[test]
    fn invalid_league_is_rejected() {
        let (mut league, _) = mixed_league();
        league.years.swap(0, 1);
        let err = wins(&league, &StatOptions::default()).unwrap_err();
        assert!(matches!(err, StatsError::Structural(_)));
    }
}
