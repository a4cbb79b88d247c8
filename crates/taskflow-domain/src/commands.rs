use serde::{Deserialize, Serialize};

use crate::{BoardState, ColumnId, TaskId, TaskUpdate};

/// A board mutation expressed as data.
///
/// Commands are what the drag controller reports after a drop and what the
/// CLI reads from a batch file. Executing one is the same as calling the
/// matching `BoardState` method.
pub trait Command {
    /// Apply to `state`. Returns whether anything changed.
    fn execute(&self, state: &mut BoardState) -> bool;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardCommand {
    #[serde(rename_all = "camelCase")]
    AddColumn {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    RenameColumn { column_id: ColumnId, name: String },
    #[serde(rename_all = "camelCase")]
    SetColumnColor { column_id: ColumnId, color: String },
    #[serde(rename_all = "camelCase")]
    SetColumnWipLimit {
        column_id: ColumnId,
        #[serde(default)]
        limit: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    DeleteColumn { column_id: ColumnId },
    #[serde(rename_all = "camelCase")]
    MoveColumn {
        column_id: ColumnId,
        target_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    AddTask { column_id: ColumnId, title: String },
    #[serde(rename_all = "camelCase")]
    MoveTask {
        task_id: TaskId,
        target_column_id: ColumnId,
        target_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    UpdateTask { task_id: TaskId, update: TaskUpdate },
    #[serde(rename_all = "camelCase")]
    DeleteTask { task_id: TaskId },
    #[serde(rename_all = "camelCase")]
    ToggleSubtask { task_id: TaskId, subtask_id: String },
}

impl Command for BoardCommand {
    fn execute(&self, state: &mut BoardState) -> bool {
        match self {
            BoardCommand::AddColumn { name } => {
                let id = state.add_column();
                if let Some(name) = name {
                    state.rename_column(&id, name.clone());
                }
                true
            }
            BoardCommand::RenameColumn { column_id, name } => {
                state.rename_column(column_id, name.clone())
            }
            BoardCommand::SetColumnColor { column_id, color } => {
                state.set_column_color(column_id, color.clone())
            }
            BoardCommand::SetColumnWipLimit { column_id, limit } => {
                state.set_column_wip_limit(column_id, *limit)
            }
            BoardCommand::DeleteColumn { column_id } => state.delete_column(column_id),
            BoardCommand::MoveColumn {
                column_id,
                target_index,
            } => state.move_column(column_id, *target_index),
            BoardCommand::AddTask { column_id, title } => {
                state.add_task(column_id, title.clone()).is_some()
            }
            BoardCommand::MoveTask {
                task_id,
                target_column_id,
                target_index,
            } => state.move_task(task_id, target_column_id, *target_index),
            BoardCommand::UpdateTask { task_id, update } => {
                state.update_task(task_id, update.clone())
            }
            BoardCommand::DeleteTask { task_id } => state.delete_task(task_id),
            BoardCommand::ToggleSubtask {
                task_id,
                subtask_id,
            } => state.toggle_subtask(task_id, subtask_id),
        }
    }

    fn description(&self) -> String {
        match self {
            BoardCommand::AddColumn { name: Some(name) } => format!("Add column '{}'", name),
            BoardCommand::AddColumn { name: None } => "Add column".to_string(),
            BoardCommand::RenameColumn { column_id, name } => {
                format!("Rename column {} to '{}'", column_id, name)
            }
            BoardCommand::SetColumnColor { column_id, color } => {
                format!("Set color of column {} to {}", column_id, color)
            }
            BoardCommand::SetColumnWipLimit {
                column_id,
                limit: Some(limit),
            } => format!("Set WIP limit of column {} to {}", column_id, limit),
            BoardCommand::SetColumnWipLimit {
                column_id,
                limit: None,
            } => format!("Clear WIP limit of column {}", column_id),
            BoardCommand::DeleteColumn { column_id } => format!("Delete column {}", column_id),
            BoardCommand::MoveColumn {
                column_id,
                target_index,
            } => format!("Move column {} to index {}", column_id, target_index),
            BoardCommand::AddTask { column_id, title } => {
                format!("Add task '{}' to column {}", title, column_id)
            }
            BoardCommand::MoveTask {
                task_id,
                target_column_id,
                target_index,
            } => format!(
                "Move task {} to column {} at index {}",
                task_id, target_column_id, target_index
            ),
            BoardCommand::UpdateTask { task_id, .. } => format!("Update task {}", task_id),
            BoardCommand::DeleteTask { task_id } => format!("Delete task {}", task_id),
            BoardCommand::ToggleSubtask {
                task_id,
                subtask_id,
            } => format!("Toggle subtask {} of task {}", subtask_id, task_id),
        }
    }
}
