use serde::{Deserialize, Serialize};

use super::{Id, TeamType};

/// Error body returned by the service on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

// Request bodies
#[derive(Debug, Serialize)]
pub struct OrgCreateInput<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TeamCreateInput<'a> {
    pub org_id: &'a Id,
    pub name: &'a str,
    #[serde(rename = "type")]
    pub team_type: TeamType,
}

#[derive(Debug, Serialize)]
pub struct MembershipCreateInput<'a> {
    pub owner_id: &'a Id,
    pub org_id: &'a Id,
    pub team_id: &'a Id,
}
