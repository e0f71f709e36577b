use serde::{Deserialize, Serialize};
use std::fmt;

use super::Id;
use crate::constants::MACHINE_TEAM_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamType {
    System,
    Machine,
    User,
}

impl TeamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamType::System => "system",
            TeamType::Machine => "machine",
            TeamType::User => "user",
        }
    }
}

impl fmt::Display for TeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: Id,
    pub org_id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub team_type: TeamType,
}

impl Team {
    /// Whether the team represents machine roles rather than people.
    ///
    /// Machine teams never show up in human-facing listings, and neither do
    /// memberships that point at them.
    pub fn is_machine_owned(&self) -> bool {
        self.team_type == TeamType::Machine
            || (self.team_type == TeamType::System && self.name == MACHINE_TEAM_NAME)
    }
}
