use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Org {
    pub id: Id,
    pub name: String,
}
