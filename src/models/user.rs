use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Id,
    pub username: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    User,
    Machine,
}

/// The currently authenticated actor.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Id,
    pub username: String,
    #[serde(rename = "type")]
    pub kind: SessionKind,
}

impl Session {
    pub fn is_user(&self) -> bool {
        self.kind == SessionKind::User
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: Id,
    pub owner_id: Id,
    pub org_id: Id,
    pub team_id: Id,
}
