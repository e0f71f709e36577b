use std::collections::{HashMap, HashSet};
use tracing::info;

use crate::client::ResourceClient;
use crate::error::{OrgError, OrgResult};
use crate::fetch::FetchPlan;
use crate::index::OrgIndex;
use crate::models::{Id, Org, Profile, Team};
use crate::presentation::{current_actor_row, sort_by_precedence, Summary, TeamPrecedence};

#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow {
    pub profile: Profile,
    /// Teams of this user, ordered by precedence. Empty for team listings.
    pub teams: Vec<Team>,
    pub is_me: bool,
}

#[derive(Debug, Clone)]
pub struct TeamMemberListing {
    pub org: Org,
    pub team: Team,
    pub rows: Vec<MemberRow>,
    pub summary: Summary,
}

#[derive(Debug, Clone)]
pub struct OrgMemberListing {
    pub org: Org,
    pub rows: Vec<MemberRow>,
    pub summary: Summary,
}

/// Members of one team.
///
/// An empty team is not an error: the listing simply has no rows.
pub async fn list_team_members(
    client: &dyn ResourceClient,
    org: &Org,
    team: &Team,
) -> OrgResult<TeamMemberListing> {
    let mut plan = FetchPlan::new();
    let memberships = plan.independent("team memberships", || {
        client.list_memberships(&org.id, Some(&team.id), None)
    });
    let session = plan.independent("session", || client.who_am_i());

    let fetched = plan.join().await.into_result()?;
    let memberships = fetched.take(memberships)?;
    let session = fetched.take(session)?;

    let summary = Summary::new(memberships.len(), "member");
    if memberships.is_empty() {
        return Ok(TeamMemberListing {
            org: org.clone(),
            team: team.clone(),
            rows: Vec::new(),
            summary,
        });
    }

    let user_ids = distinct(memberships.iter().map(|m| &m.owner_id));
    let profiles = fetch_profiles(client, &user_ids).await?;
    let rows = member_rows(profiles, &session.id, |_| Vec::new());

    info!(org = %org.id, team = %team.id, members = rows.len(), "listed team members");
    Ok(TeamMemberListing {
        org: org.clone(),
        team: team.clone(),
        rows,
        summary,
    })
}

/// Every person in an org with the teams they belong to.
///
/// Teams, memberships and the session are fetched concurrently and merged
/// through an [`OrgIndex`]. Users whose only memberships are in machine
/// teams are left out, and their profiles are never requested.
pub async fn list_org_members(
    client: &dyn ResourceClient,
    org: &Org,
    precedence: &dyn TeamPrecedence,
) -> OrgResult<OrgMemberListing> {
    let mut plan = FetchPlan::new();
    let teams = plan.independent("teams", || client.list_teams(&org.id));
    let memberships = plan.independent("memberships", || {
        client.list_memberships(&org.id, None, None)
    });
    let session = plan.independent("session", || client.who_am_i());

    let fetched = plan.join().await.into_result()?;
    let teams = fetched.take(teams)?;
    let memberships = fetched.take(memberships)?;
    let session = fetched.take(session)?;

    if memberships.is_empty() {
        return Err(OrgError::NotFound(format!("{} has no members.", org.name)));
    }

    let index = OrgIndex::build(teams, &memberships)?;
    let profiles = fetch_profiles(client, index.member_user_ids()).await?;
    let rows = member_rows(profiles, &session.id, |profile| {
        let mut teams = index.teams_of(&profile.id);
        sort_by_precedence(&mut teams, precedence);
        teams.into_iter().cloned().collect()
    });

    info!(
        org = %org.id,
        teams = index.team_count(),
        members = rows.len(),
        "listed org members"
    );
    Ok(OrgMemberListing {
        org: org.clone(),
        summary: Summary::new(index.member_user_ids().len(), "member"),
        rows,
    })
}

/// Batch-fetch profiles and return them in the order of `ids`.
async fn fetch_profiles(client: &dyn ResourceClient, ids: &[Id]) -> OrgResult<Vec<Profile>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let profiles = client.list_profiles_by_id(ids).await?;
    if profiles.is_empty() {
        return Err(OrgError::NotFound("User not found.".to_string()));
    }

    let position: HashMap<&Id, usize> = ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
    let mut profiles = profiles;
    profiles.sort_by_key(|p| position.get(&p.id).copied().unwrap_or(usize::MAX));
    Ok(profiles)
}

fn member_rows<F>(profiles: Vec<Profile>, me: &Id, teams_of: F) -> Vec<MemberRow>
where
    F: Fn(&Profile) -> Vec<Team>,
{
    let current = current_actor_row(&profiles, |p| p.id == *me);
    profiles
        .into_iter()
        .enumerate()
        .map(|(i, profile)| MemberRow {
            teams: teams_of(&profile),
            is_me: current == Some(i),
            profile,
        })
        .collect()
}

/// Unique ids in first-seen order.
fn distinct<'a>(ids: impl Iterator<Item = &'a Id>) -> Vec<Id> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).cloned().collect()
}
