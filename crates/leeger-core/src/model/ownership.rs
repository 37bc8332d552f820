// Per-year join between teams and the owners controlling them.

use std::collections::HashMap;

use super::{OwnerId, TeamId, Year};

/// Team -> owner (and owner -> team) lookup for a single year.
///
/// Built once per year and reused for every owner, instead of scanning the
/// team list per owner.
#[derive(Debug, Clone)]
pub struct TeamOwnership<'a> {
    owner_by_team: HashMap<&'a TeamId, &'a OwnerId>,
    team_by_owner: HashMap<&'a OwnerId, &'a TeamId>,
}

impl<'a> TeamOwnership<'a> {
    pub fn for_year(year: &'a Year) -> Self {
        let mut owner_by_team = HashMap::with_capacity(year.teams.len());
        let mut team_by_owner = HashMap::with_capacity(year.teams.len());
        for team in &year.teams {
            owner_by_team.insert(&team.id, &team.owner_id);
            team_by_owner.insert(&team.owner_id, &team.id);
        }
        Self {
            owner_by_team,
            team_by_owner,
        }
    }

    pub fn owner_of(&self, team_id: &TeamId) -> Option<&'a OwnerId> {
        self.owner_by_team.get(team_id).copied()
    }

    /// The owner's team this year, if they had one.
    pub fn team_of(&self, owner_id: &OwnerId) -> Option<&'a TeamId> {
        self.team_by_owner.get(owner_id).copied()
    }
}
