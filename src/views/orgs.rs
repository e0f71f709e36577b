use tracing::info;

use crate::client::ResourceClient;
use crate::error::OrgResult;
use crate::fetch::FetchPlan;
use crate::models::{Org, Session};
use crate::presentation::Summary;

#[derive(Debug, Clone, PartialEq)]
pub struct OrgRow {
    pub org: Org,
    /// The org named after the current user.
    pub personal: bool,
}

#[derive(Debug, Clone)]
pub struct OrgListing {
    pub rows: Vec<OrgRow>,
    pub summary: Summary,
}

/// Orgs the current actor belongs to, personal org first.
pub async fn list_orgs(client: &dyn ResourceClient) -> OrgResult<OrgListing> {
    let mut plan = FetchPlan::new();
    let orgs = plan.independent("orgs", || client.list_orgs());
    let session = plan.independent("session", || client.who_am_i());

    let fetched = plan.join().await.into_result()?;
    let orgs = fetched.take(orgs)?;
    let session = fetched.take(session)?;

    let summary = Summary::new(orgs.len(), "org");
    let rows = order_personal_first(orgs, &session);

    info!(orgs = rows.len(), "listed orgs");
    Ok(OrgListing { rows, summary })
}

/// One pass over the list: the personal org moves to the front, the rest
/// keep their order. Machine sessions have no personal org.
fn order_personal_first(orgs: Vec<Org>, session: &Session) -> Vec<OrgRow> {
    let (personal, others): (Vec<Org>, Vec<Org>) = orgs
        .into_iter()
        .partition(|org| session.is_user() && org.name == session.username);

    personal
        .into_iter()
        .map(|org| OrgRow { org, personal: true })
        .chain(others.into_iter().map(|org| OrgRow { org, personal: false }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Id, SessionKind};

    fn org(name: &str) -> Org {
        Org {
            id: Id::new(format!("id-{}", name)),
            name: name.to_string(),
        }
    }

    fn session(kind: SessionKind) -> Session {
        Session {
            id: Id::new("u1"),
            username: "alice".to_string(),
            kind,
        }
    }

    #[test]
    fn test_personal_org_moves_first() {
        let rows = order_personal_first(
            vec![org("acme"), org("alice"), org("globex")],
            &session(SessionKind::User),
        );
        let names: Vec<(&str, bool)> = rows.iter().map(|r| (r.org.name.as_str(), r.personal)).collect();
        assert_eq!(names, vec![("alice", true), ("acme", false), ("globex", false)]);
    }

    #[test]
    fn test_machine_session_has_no_personal_org() {
        let rows = order_personal_first(
            vec![org("acme"), org("alice")],
            &session(SessionKind::Machine),
        );
        assert!(rows.iter().all(|r| !r.personal));
        assert_eq!(rows[1].org.name, "alice");
    }
}
