//! Single-shot writes. Each maps the service's failure onto the message an
//! operator should see.

use tracing::info;

use crate::client::ResourceClient;
use crate::error::{OrgError, OrgResult};
use crate::models::{Id, Org, Team, TeamType};
use crate::org_error;
use crate::views::MembershipTarget;

pub async fn create_org(client: &dyn ResourceClient, name: &str) -> OrgResult<Org> {
    validate_name("org", name)?;
    let org = client.create_org(name).await.map_err(|e| match e {
        OrgError::Conflict(_) => OrgError::Conflict("Org already exists".to_string()),
        other => other,
    })?;
    info!(org = %org.id, "created org");
    Ok(org)
}

pub async fn create_team(client: &dyn ResourceClient, org: &Org, name: &str) -> OrgResult<Team> {
    validate_name("team", name)?;
    let team = client
        .create_team(&org.id, name, TeamType::User)
        .await
        .map_err(|e| match e {
            OrgError::Conflict(_) => OrgError::Conflict("Team already exists".to_string()),
            other => other,
        })?;
    info!(org = %org.id, team = %team.id, "created team");
    Ok(team)
}

pub async fn add_member(client: &dyn ResourceClient, target: &MembershipTarget) -> OrgResult<()> {
    let MembershipTarget { org, team, user } = target;
    client
        .create_membership(&user.id, &org.id, &team.id)
        .await
        .map_err(|e| match e {
            // The members team is managed by the service itself
            e if e.to_string().contains("to the members team") => OrgError::PermissionDenied(
                format!("{} cannot be added to the {} team.", user.username, team.name),
            ),
            OrgError::PermissionDenied(_) => OrgError::PermissionDenied(
                "Must be a member of the admin team to add members.".to_string(),
            ),
            OrgError::Conflict(_) => OrgError::Conflict(format!(
                "{} is already a member of the {} team.",
                user.username, team.name
            )),
            other => other,
        })?;
    info!(team = %team.id, user = %user.id, "added member");
    Ok(())
}

/// Find the user's membership row in the team and delete it.
pub async fn remove_member(client: &dyn ResourceClient, target: &MembershipTarget) -> OrgResult<()> {
    let MembershipTarget { org, team, user } = target;
    let memberships = match client
        .list_memberships(&org.id, Some(&team.id), Some(&user.id))
        .await
    {
        Err(e) if e.is_not_found() => Vec::new(),
        other => other?,
    };
    let membership = memberships
        .first()
        .ok_or_else(|| OrgError::NotFound("Memberships not found.".to_string()))?;

    client
        .delete_membership(&membership.id)
        .await
        .map_err(|e| match e {
            OrgError::PermissionDenied(_) => OrgError::PermissionDenied(
                "Must be a member of the admin team to remove members".to_string(),
            ),
            OrgError::Conflict(_) => {
                OrgError::Conflict("Cannot remove members from the member team".to_string())
            }
            other => other,
        })?;
    info!(team = %team.id, user = %user.id, "removed member");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgMemberRemoval {
    Removed,
    NotAMember,
}

pub async fn remove_org_member(
    client: &dyn ResourceClient,
    org_id: &Id,
    user_id: &Id,
) -> OrgResult<OrgMemberRemoval> {
    match client.remove_org_member(org_id, user_id).await {
        Ok(()) => {
            info!(org = %org_id, user = %user_id, "removed org member");
            Ok(OrgMemberRemoval::Removed)
        }
        Err(e) if e.is_not_found() => Ok(OrgMemberRemoval::NotAMember),
        Err(e) => Err(e),
    }
}

fn validate_name(what: &str, name: &str) -> OrgResult<()> {
    let valid = !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(org_error!(
            InvalidInput,
            "{} names must be 1-64 characters of letters, digits, '-' or '_'",
            what
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("team", "core-devs_2").is_ok());
        assert!(validate_name("team", "").is_err());
        assert!(validate_name("team", "has space").is_err());
        assert!(validate_name("org", &"x".repeat(65)).is_err());
    }
}
