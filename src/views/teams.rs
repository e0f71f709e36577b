use tracing::info;

use crate::client::ResourceClient;
use crate::error::OrgResult;
use crate::fetch::FetchPlan;
use crate::index::current_user_teams;
use crate::models::{Org, Session, Team};
use crate::presentation::{present_teams, Summary, TeamPrecedence};

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRow {
    pub team: Team,
    /// The current actor belongs to this team.
    pub is_member: bool,
}

#[derive(Debug, Clone)]
pub struct TeamListing {
    pub org: Org,
    pub rows: Vec<TeamRow>,
    pub summary: Summary,
}

/// Human-facing teams of an org, flagged with the current actor's
/// memberships.
///
/// The session is needed before the actor's memberships can be listed, so
/// that fetch depends on it; the team list is fetched alongside both.
pub async fn list_teams(
    client: &dyn ResourceClient,
    org: &Org,
    precedence: &dyn TeamPrecedence,
) -> OrgResult<TeamListing> {
    let mut plan = FetchPlan::new();
    let session = plan.independent("session", || client.who_am_i());
    let teams = plan.independent("teams", || client.list_teams(&org.id));
    let mine = plan.dependent("session memberships", &session, move |session: Session| async move {
        client
            .list_memberships(&org.id, None, Some(&session.id))
            .await
    });

    let fetched = plan.join().await.into_result()?;
    let teams = fetched.take(teams)?;
    let member_of = current_user_teams(&fetched.take(mine)?);

    let rows: Vec<TeamRow> = present_teams(teams, precedence)
        .into_iter()
        .map(|team| TeamRow {
            is_member: member_of.contains(&team.id),
            team,
        })
        .collect();

    info!(org = %org.id, teams = rows.len(), "listed teams");
    Ok(TeamListing {
        org: org.clone(),
        summary: Summary::new(rows.len(), "team"),
        rows,
    })
}
