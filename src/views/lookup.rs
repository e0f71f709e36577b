use tracing::info;

use crate::client::ResourceClient;
use crate::error::{OrgError, OrgResult};
use crate::fetch::FetchPlan;
use crate::models::{Id, Org, Profile, Team};
use crate::org_error;

pub const ORG_NOT_FOUND: &str = "Org not found.";
pub const TEAM_NOT_FOUND: &str = "Team not found.";
pub const USER_NOT_FOUND: &str = "User not found.";
pub const MISSING_ORG: &str = "an org is required, pass --org or set a default org";

/// Look up an org by name. `None` means no org was given on the command line
/// or in the config.
pub async fn resolve_org(client: &dyn ResourceClient, name: Option<&str>) -> OrgResult<Org> {
    let name = name.ok_or_else(|| org_error!(InvalidInput, MISSING_ORG))?;
    find_org(client, name).await
}

pub(crate) async fn find_org(client: &dyn ResourceClient, name: &str) -> OrgResult<Org> {
    match client.get_org_by_name(name).await {
        Ok(Some(org)) => Ok(org),
        Ok(None) => Err(OrgError::NotFound(ORG_NOT_FOUND.to_string())),
        Err(e) if e.is_not_found() => Err(OrgError::NotFound(ORG_NOT_FOUND.to_string())),
        Err(e) => Err(e),
    }
}

/// Exactly one team with that name must exist in the org.
pub async fn find_team(client: &dyn ResourceClient, org_id: &Id, name: &str) -> OrgResult<Team> {
    let mut teams = match client.get_teams_by_name(org_id, name).await {
        Err(e) if e.is_not_found() => Vec::new(),
        other => other?,
    };
    if teams.len() != 1 {
        return Err(OrgError::NotFound(TEAM_NOT_FOUND.to_string()));
    }
    Ok(teams.remove(0))
}

pub(crate) async fn find_user(client: &dyn ResourceClient, username: &str) -> OrgResult<Profile> {
    match client.get_profile_by_username(username).await {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => Err(OrgError::NotFound(USER_NOT_FOUND.to_string())),
        Err(e) if e.is_not_found() => Err(OrgError::NotFound(USER_NOT_FOUND.to_string())),
        Err(e) => Err(e),
    }
}

/// Everything a team membership mutation needs.
#[derive(Debug, Clone)]
pub struct MembershipTarget {
    pub org: Org,
    pub team: Team,
    pub user: Profile,
}

/// Resolve org, team and user for `teams add` / `teams remove`.
///
/// The team lookup needs the org id, so it waits for the org lookup; the
/// user lookup runs alongside both. Failures are reported together in the
/// order org, user, team.
pub async fn resolve_membership_target(
    client: &dyn ResourceClient,
    org_name: &str,
    username: &str,
    team_name: &str,
) -> OrgResult<MembershipTarget> {
    let mut plan = FetchPlan::new();
    let org = plan.independent("org", || find_org(client, org_name));
    let user = plan.independent("user", || find_user(client, username));
    let team = plan.dependent("team", &org, move |org: Org| async move {
        find_team(client, &org.id, team_name).await
    });

    let fetched = plan.join().await.into_result()?;
    let target = MembershipTarget {
        org: fetched.take(org)?,
        team: fetched.take(team)?,
        user: fetched.take(user)?,
    };
    info!(
        org = %target.org.id,
        team = %target.team.id,
        user = %target.user.id,
        "resolved membership target"
    );
    Ok(target)
}

/// Org and user for `orgs remove`, fetched concurrently.
pub async fn resolve_org_member(
    client: &dyn ResourceClient,
    org_name: &str,
    username: &str,
) -> OrgResult<(Org, Profile)> {
    let mut plan = FetchPlan::new();
    let org = plan.independent("org", || find_org(client, org_name));
    let user = plan.independent("user", || find_user(client, username));

    let fetched = plan.join().await.into_result()?;
    Ok((fetched.take(org)?, fetched.take(user)?))
}
