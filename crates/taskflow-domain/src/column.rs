use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ColumnId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<u32>,
}

impl Column {
    pub fn new(name: String, color: String, position: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            color,
            position,
            wip_limit: None,
        }
    }

    /// A limit of zero means "no limit".
    pub fn set_wip_limit(&mut self, limit: Option<u32>) {
        self.wip_limit = limit.filter(|l| *l > 0);
    }

    pub fn update_position(&mut self, position: i32) {
        self.position = position;
    }

    /// Advisory only: nothing stops a column from holding more tasks.
    pub fn is_over_wip_limit(&self, task_count: usize) -> bool {
        self.wip_limit
            .is_some_and(|limit| task_count > limit as usize)
    }
}
