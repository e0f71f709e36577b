pub mod http_client;
pub mod memory;

pub use http_client::HttpClient;
pub use memory::MemoryClient;

use async_trait::async_trait;

use crate::error::OrgResult;
use crate::models::{Id, Membership, Org, Profile, Session, Team, TeamType};

/// Request/response operations against the remote service.
///
/// Every call is a single attempt. Implementations must be usable from
/// several concurrently polled futures, hence `Send + Sync`.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn who_am_i(&self) -> OrgResult<Session>;

    async fn list_orgs(&self) -> OrgResult<Vec<Org>>;
    async fn get_org_by_name(&self, name: &str) -> OrgResult<Option<Org>>;
    async fn create_org(&self, name: &str) -> OrgResult<Org>;
    async fn remove_org_member(&self, org_id: &Id, user_id: &Id) -> OrgResult<()>;

    async fn list_teams(&self, org_id: &Id) -> OrgResult<Vec<Team>>;
    async fn get_teams_by_name(&self, org_id: &Id, name: &str) -> OrgResult<Vec<Team>>;
    async fn create_team(&self, org_id: &Id, name: &str, team_type: TeamType) -> OrgResult<Team>;

    async fn list_memberships(
        &self,
        org_id: &Id,
        team_id: Option<&Id>,
        owner_id: Option<&Id>,
    ) -> OrgResult<Vec<Membership>>;
    async fn create_membership(&self, owner_id: &Id, org_id: &Id, team_id: &Id) -> OrgResult<()>;
    async fn delete_membership(&self, membership_id: &Id) -> OrgResult<()>;

    async fn list_profiles_by_id(&self, ids: &[Id]) -> OrgResult<Vec<Profile>>;
    async fn get_profile_by_username(&self, username: &str) -> OrgResult<Option<Profile>>;
}
