//! In-memory implementation of [`ResourceClient`].
//!
//! Holds orgs, teams, memberships and profiles in plain vectors, records every
//! call it receives, and can be told to fail or stall specific operations.
//! Tests use it to observe exactly which remote calls a view performed.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::time::{sleep, Duration};

use super::ResourceClient;
use crate::error::{OrgError, OrgResult};
use crate::models::*;

/// Operation names as recorded in the call log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    WhoAmI,
    ListOrgs,
    GetOrgByName,
    CreateOrg,
    RemoveOrgMember,
    ListTeams,
    GetTeamsByName,
    CreateTeam,
    ListMemberships,
    CreateMembership,
    DeleteMembership,
    ListProfilesById,
    GetProfileByUsername,
}

/// One recorded call with its arguments rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: Op,
    pub args: Vec<String>,
}

#[derive(Debug, Default)]
struct MemoryState {
    session: Option<Session>,
    orgs: Vec<Org>,
    teams: Vec<Team>,
    memberships: Vec<Membership>,
    profiles: Vec<Profile>,
    calls: Vec<Call>,
    failures: HashMap<Op, FailWith>,
    latency: HashMap<Op, u64>,
    next_id: u64,
}

#[derive(Debug, Clone)]
enum FailWith {
    NotFound(String),
    Conflict(String),
    PermissionDenied(String),
    Api(String),
}

impl FailWith {
    fn to_error(&self) -> OrgError {
        match self {
            FailWith::NotFound(m) => OrgError::NotFound(m.clone()),
            FailWith::Conflict(m) => OrgError::Conflict(m.clone()),
            FailWith::PermissionDenied(m) => OrgError::PermissionDenied(m.clone()),
            FailWith::Api(m) => OrgError::ApiError(m.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryClient {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        // A poisoned lock only happens after a panicking test; keep going.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn with_session(self, id: &str, username: &str, kind: SessionKind) -> Self {
        self.state().session = Some(Session {
            id: Id::new(id),
            username: username.to_string(),
            kind,
        });
        self
    }

    pub fn with_org(self, id: &str, name: &str) -> Self {
        self.state().orgs.push(Org {
            id: Id::new(id),
            name: name.to_string(),
        });
        self
    }

    pub fn with_team(self, id: &str, org_id: &str, name: &str, team_type: TeamType) -> Self {
        self.state().teams.push(Team {
            id: Id::new(id),
            org_id: Id::new(org_id),
            name: name.to_string(),
            team_type,
        });
        self
    }

    pub fn with_membership(self, id: &str, owner_id: &str, org_id: &str, team_id: &str) -> Self {
        self.state().memberships.push(Membership {
            id: Id::new(id),
            owner_id: Id::new(owner_id),
            org_id: Id::new(org_id),
            team_id: Id::new(team_id),
        });
        self
    }

    pub fn with_profile(self, id: &str, username: &str, name: &str) -> Self {
        self.state().profiles.push(Profile {
            id: Id::new(id),
            username: username.to_string(),
            name: name.to_string(),
        });
        self
    }

    /// Make every call to `op` fail with a generic API error.
    pub fn fail(self, op: Op, message: &str) -> Self {
        self.state().failures.insert(op, FailWith::Api(message.to_string()));
        self
    }

    pub fn fail_not_found(self, op: Op, message: &str) -> Self {
        self.state().failures.insert(op, FailWith::NotFound(message.to_string()));
        self
    }

    pub fn fail_conflict(self, op: Op, message: &str) -> Self {
        self.state().failures.insert(op, FailWith::Conflict(message.to_string()));
        self
    }

    pub fn fail_permission(self, op: Op, message: &str) -> Self {
        self.state()
            .failures
            .insert(op, FailWith::PermissionDenied(message.to_string()));
        self
    }

    /// Delay every call to `op` by `millis` before answering.
    pub fn delay(self, op: Op, millis: u64) -> Self {
        self.state().latency.insert(op, millis);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn calls_to(&self, op: Op) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.op == op).collect()
    }

    pub fn memberships(&self) -> Vec<Membership> {
        self.state().memberships.clone()
    }

    pub fn teams(&self) -> Vec<Team> {
        self.state().teams.clone()
    }

    pub fn orgs(&self) -> Vec<Org> {
        self.state().orgs.clone()
    }

    /// Record the call, wait out any configured latency, then report an
    /// injected failure if there is one.
    async fn enter(&self, op: Op, args: Vec<String>) -> OrgResult<()> {
        let (latency, failure) = {
            let mut state = self.state();
            state.calls.push(Call { op, args });
            (state.latency.get(&op).copied(), state.failures.get(&op).cloned())
        };

        if let Some(millis) = latency {
            sleep(Duration::from_millis(millis)).await;
        }

        match failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    fn next_id(&self, prefix: &str) -> Id {
        let mut state = self.state();
        state.next_id += 1;
        Id::new(format!("{}-{}", prefix, state.next_id))
    }
}

#[async_trait]
impl ResourceClient for MemoryClient {
    async fn who_am_i(&self) -> OrgResult<Session> {
        self.enter(Op::WhoAmI, vec![]).await?;
        self.state()
            .session
            .clone()
            .ok_or_else(|| OrgError::Unauthorized("no active session".to_string()))
    }

    async fn list_orgs(&self) -> OrgResult<Vec<Org>> {
        self.enter(Op::ListOrgs, vec![]).await?;
        Ok(self.state().orgs.clone())
    }

    async fn get_org_by_name(&self, name: &str) -> OrgResult<Option<Org>> {
        self.enter(Op::GetOrgByName, vec![name.to_string()]).await?;
        Ok(self.state().orgs.iter().find(|o| o.name == name).cloned())
    }

    async fn create_org(&self, name: &str) -> OrgResult<Org> {
        self.enter(Op::CreateOrg, vec![name.to_string()]).await?;
        if self.state().orgs.iter().any(|o| o.name == name) {
            return Err(OrgError::Conflict("resource exists".to_string()));
        }
        let org = Org {
            id: self.next_id("org"),
            name: name.to_string(),
        };
        self.state().orgs.push(org.clone());
        Ok(org)
    }

    async fn remove_org_member(&self, org_id: &Id, user_id: &Id) -> OrgResult<()> {
        self.enter(Op::RemoveOrgMember, vec![org_id.to_string(), user_id.to_string()])
            .await?;
        let mut state = self.state();
        let before = state.memberships.len();
        state
            .memberships
            .retain(|m| !(m.org_id == *org_id && m.owner_id == *user_id));
        if state.memberships.len() == before {
            return Err(OrgError::NotFound("membership not found".to_string()));
        }
        Ok(())
    }

    async fn list_teams(&self, org_id: &Id) -> OrgResult<Vec<Team>> {
        self.enter(Op::ListTeams, vec![org_id.to_string()]).await?;
        Ok(self
            .state()
            .teams
            .iter()
            .filter(|t| t.org_id == *org_id)
            .cloned()
            .collect())
    }

    async fn get_teams_by_name(&self, org_id: &Id, name: &str) -> OrgResult<Vec<Team>> {
        self.enter(Op::GetTeamsByName, vec![org_id.to_string(), name.to_string()])
            .await?;
        Ok(self
            .state()
            .teams
            .iter()
            .filter(|t| t.org_id == *org_id && t.name == name)
            .cloned()
            .collect())
    }

    async fn create_team(&self, org_id: &Id, name: &str, team_type: TeamType) -> OrgResult<Team> {
        self.enter(Op::CreateTeam, vec![org_id.to_string(), name.to_string()])
            .await?;
        if self
            .state()
            .teams
            .iter()
            .any(|t| t.org_id == *org_id && t.name == name)
        {
            return Err(OrgError::Conflict("resource exists".to_string()));
        }
        let team = Team {
            id: self.next_id("team"),
            org_id: org_id.clone(),
            name: name.to_string(),
            team_type,
        };
        self.state().teams.push(team.clone());
        Ok(team)
    }

    async fn list_memberships(
        &self,
        org_id: &Id,
        team_id: Option<&Id>,
        owner_id: Option<&Id>,
    ) -> OrgResult<Vec<Membership>> {
        let args = vec![
            org_id.to_string(),
            team_id.map(|t| t.to_string()).unwrap_or_default(),
            owner_id.map(|o| o.to_string()).unwrap_or_default(),
        ];
        self.enter(Op::ListMemberships, args).await?;
        Ok(self
            .state()
            .memberships
            .iter()
            .filter(|m| m.org_id == *org_id)
            .filter(|m| team_id.map_or(true, |t| m.team_id == *t))
            .filter(|m| owner_id.map_or(true, |o| m.owner_id == *o))
            .cloned()
            .collect())
    }

    async fn create_membership(&self, owner_id: &Id, org_id: &Id, team_id: &Id) -> OrgResult<()> {
        let args = vec![owner_id.to_string(), org_id.to_string(), team_id.to_string()];
        self.enter(Op::CreateMembership, args).await?;
        let id = self.next_id("membership");
        let mut state = self.state();
        if state
            .memberships
            .iter()
            .any(|m| m.owner_id == *owner_id && m.team_id == *team_id)
        {
            return Err(OrgError::Conflict("resource exists".to_string()));
        }
        state.memberships.push(Membership {
            id,
            owner_id: owner_id.clone(),
            org_id: org_id.clone(),
            team_id: team_id.clone(),
        });
        Ok(())
    }

    async fn delete_membership(&self, membership_id: &Id) -> OrgResult<()> {
        self.enter(Op::DeleteMembership, vec![membership_id.to_string()])
            .await?;
        let mut state = self.state();
        let before = state.memberships.len();
        state.memberships.retain(|m| m.id != *membership_id);
        if state.memberships.len() == before {
            return Err(OrgError::NotFound("membership not found".to_string()));
        }
        Ok(())
    }

    async fn list_profiles_by_id(&self, ids: &[Id]) -> OrgResult<Vec<Profile>> {
        self.enter(Op::ListProfilesById, ids.iter().map(|id| id.to_string()).collect())
            .await?;
        let wanted: HashSet<&Id> = ids.iter().collect();
        Ok(self
            .state()
            .profiles
            .iter()
            .filter(|p| wanted.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn get_profile_by_username(&self, username: &str) -> OrgResult<Option<Profile>> {
        self.enter(Op::GetProfileByUsername, vec![username.to_string()])
            .await?;
        Ok(self
            .state()
            .profiles
            .iter()
            .find(|p| p.username == username)
            .cloned())
    }
}
