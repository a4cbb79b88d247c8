use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type BoardId = String;

/// The board whose columns and tasks are loaded into a [`crate::BoardState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl Board {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            project_id: None,
        }
    }
}
