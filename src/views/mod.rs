//! One entry point per listing. Each either returns a fully merged, filtered
//! and ordered row set, or a single (possibly aggregated) failure.

pub mod lookup;
pub mod members;
pub mod orgs;
pub mod teams;

pub use lookup::{find_team, resolve_membership_target, resolve_org, resolve_org_member, MembershipTarget};
pub use members::{list_org_members, list_team_members, MemberRow, OrgMemberListing, TeamMemberListing};
pub use orgs::{list_orgs, OrgListing, OrgRow};
pub use teams::{list_teams, TeamListing, TeamRow};
