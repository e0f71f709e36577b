pub mod api;
pub mod id;
pub mod org;
pub mod team;
pub mod user;

// Re-export commonly used types
pub use api::{ApiErrorBody, MembershipCreateInput, OrgCreateInput, TeamCreateInput};
pub use id::Id;
pub use org::Org;
pub use team::{Team, TeamType};
pub use user::{Membership, Profile, Session, SessionKind};
