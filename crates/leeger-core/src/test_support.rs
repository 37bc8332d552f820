// Record builders shared by the unit tests.

use rust_decimal::Decimal;

use crate::model::{Matchup, Owner, Team};

/// `n` owners named "1".."n", each with one team of the same name.
pub fn owners_and_teams(n: usize) -> (Vec<Owner>, Vec<Team>) {
    let owners: Vec<Owner> = (1..=n).map(|i| Owner::new(i.to_string())).collect();
    let teams = teams_for(&owners);
    (owners, teams)
}

/// A fresh set of teams (new ids) for the same owners, as in a new season.
pub fn teams_for(owners: &[Owner]) -> Vec<Team> {
    owners
        .iter()
        .map(|o| Team::new(o.id.clone(), o.name.clone()))
        .collect()
}

/// A regular matchup between `teams[a]` and `teams[b]`.
pub fn score_matchup(teams: &[Team], a: usize, b: usize, a_score: Decimal, b_score: Decimal) -> Matchup {
    Matchup::new(teams[a].id.clone(), teams[b].id.clone(), a_score, b_score)
}
