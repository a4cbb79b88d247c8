//! Point-in-time capture of one board.
//!
//! A `BoardSnapshot` is what the persistence layer hands in when a board is
//! opened and what it gets back after every committed mutation. The store
//! never keeps a reference to it; it is a plain value.

use serde::{Deserialize, Serialize};

use crate::{Board, Column, Task, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board: Board,

    #[serde(default)]
    pub columns: Vec<Column>,

    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Known users, for resolving assignee ids.
    #[serde(default)]
    pub users: Vec<User>,
}

impl BoardSnapshot {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            columns: Vec::new(),
            tasks: Vec::new(),
            users: Vec::new(),
        }
    }

    pub fn from_data(board: Board, columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self {
            board,
            columns,
            tasks,
            users: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.tasks.is_empty()
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
