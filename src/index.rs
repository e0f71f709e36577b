//! Lookup structures built from the flat lists returned by the service.
//!
//! Everything here is rebuilt per command and thrown away after rendering.

use std::collections::{HashMap, HashSet};

use crate::error::{OrgError, OrgResult};
use crate::models::{Id, Membership, Team};

/// Teams and human memberships of one org, keyed for merging.
#[derive(Debug, Default)]
pub struct OrgIndex {
    team_by_id: HashMap<Id, Team>,
    team_ids_by_user: HashMap<Id, Vec<Id>>,
    member_user_ids: Vec<Id>,
}

impl OrgIndex {
    /// Index `teams` and fold `memberships` into per-user team lists.
    ///
    /// Memberships of machine-owned teams are left out entirely. A membership
    /// that names a team missing from `teams` means the two lists disagree,
    /// which is reported as [`OrgError::Consistency`].
    pub fn build(teams: Vec<Team>, memberships: &[Membership]) -> OrgResult<Self> {
        let team_by_id: HashMap<Id, Team> =
            teams.into_iter().map(|team| (team.id.clone(), team)).collect();

        let mut team_ids_by_user: HashMap<Id, Vec<Id>> = HashMap::new();
        let mut seen = HashSet::new();
        let mut member_user_ids = Vec::new();

        for membership in memberships {
            let team = team_by_id.get(&membership.team_id).ok_or_else(|| {
                OrgError::Consistency(format!(
                    "membership {} references unknown team {}",
                    membership.id, membership.team_id
                ))
            })?;

            if team.is_machine_owned() {
                continue;
            }

            if seen.insert(membership.owner_id.clone()) {
                member_user_ids.push(membership.owner_id.clone());
            }
            team_ids_by_user
                .entry(membership.owner_id.clone())
                .or_default()
                .push(membership.team_id.clone());
        }

        Ok(Self {
            team_by_id,
            team_ids_by_user,
            member_user_ids,
        })
    }

    pub fn team(&self, id: &Id) -> Option<&Team> {
        self.team_by_id.get(id)
    }

    pub fn team_count(&self) -> usize {
        self.team_by_id.len()
    }

    /// Distinct users with at least one human membership, in the order they
    /// were first seen.
    pub fn member_user_ids(&self) -> &[Id] {
        &self.member_user_ids
    }

    pub fn team_ids_of(&self, user_id: &Id) -> &[Id] {
        self.team_ids_by_user
            .get(user_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Teams of a user in membership order.
    pub fn teams_of(&self, user_id: &Id) -> Vec<&Team> {
        self.team_ids_of(user_id)
            .iter()
            .filter_map(|id| self.team_by_id.get(id))
            .collect()
    }
}

/// Team ids the current actor belongs to.
pub fn current_user_teams(memberships: &[Membership]) -> HashSet<Id> {
    memberships.iter().map(|m| m.team_id.clone()).collect()
}
