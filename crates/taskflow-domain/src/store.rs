//! Board state store.
//!
//! `BoardState` owns the authoritative columns and tasks of one board. Every
//! mutation goes through it so that ordering invariants hold afterwards:
//!
//! - columns are kept sorted by `position`, and no two share a position;
//! - inside every column, task positions are `0..n` with no gaps;
//! - a task is listed by exactly the column its `column_id` names.
//!
//! Mutations never fail. A request naming an unknown task or column is
//! ignored and reported by a `false` return, out-of-range indices are
//! clamped. Every mutation that changes something bumps [`BoardState::revision`]
//! and appends an activity log entry.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use taskflow_core::{BoardConfig, LogEntry, Loggable, TaskflowError, TaskflowResult};

use crate::filter::{apply_filters, TaskFilters};
use crate::sort::{sorted, SortKey};
use crate::{
    Board, BoardSnapshot, Column, ColumnId, Task, TaskId, TaskUpdate, UserDirectory,
};

/// What the pointer was over when a task was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum DropTarget {
    /// Insert before this task, in its column.
    Task(TaskId),
    /// Append to the end of this column.
    Column(ColumnId),
}

#[derive(Debug, Clone)]
pub struct BoardState {
    board: Board,
    columns: Vec<Column>,
    tasks: Vec<Task>,
    users: UserDirectory,
    defaults: BoardConfig,
    revision: u64,
    activity: Vec<LogEntry>,
}

impl BoardState {
    pub fn new(board: Board, defaults: BoardConfig) -> Self {
        Self {
            board,
            columns: Vec::new(),
            tasks: Vec::new(),
            users: UserDirectory::default(),
            defaults,
            revision: 0,
            activity: Vec::new(),
        }
    }

    /// Load a board snapshot.
    ///
    /// Rejects duplicate ids and tasks pointing at columns that are not part
    /// of the snapshot. Positions are normalized to contiguous sequences,
    /// ties keeping snapshot order.
    pub fn from_snapshot(snapshot: BoardSnapshot, defaults: BoardConfig) -> TaskflowResult<Self> {
        let BoardSnapshot {
            board,
            mut columns,
            tasks,
            users,
        } = snapshot;

        let mut column_ids = HashSet::new();
        for column in &columns {
            if !column_ids.insert(column.id.as_str()) {
                tracing::warn!(board = %board.id, column = %column.id, "duplicate column id in snapshot");
                return Err(TaskflowError::validation(format!(
                    "duplicate column id '{}'",
                    column.id
                )));
            }
        }

        let mut task_ids = HashSet::new();
        for task in &tasks {
            if !task_ids.insert(task.id.as_str()) {
                tracing::warn!(board = %board.id, task = %task.id, "duplicate task id in snapshot");
                return Err(TaskflowError::validation(format!(
                    "duplicate task id '{}'",
                    task.id
                )));
            }
            if !column_ids.contains(task.column_id.as_str()) {
                tracing::warn!(board = %board.id, task = %task.id, "task references unknown column");
                return Err(TaskflowError::validation(format!(
                    "task '{}' references unknown column '{}'",
                    task.id, task.column_id
                )));
            }
        }

        columns.sort_by_key(|c| c.position);
        for (index, column) in columns.iter_mut().enumerate() {
            column.update_position(index as i32);
            column.set_wip_limit(column.wip_limit);
        }

        let mut state = Self {
            board,
            columns,
            tasks,
            users: UserDirectory::new(users),
            defaults,
            revision: 0,
            activity: Vec::new(),
        };
        let ids: Vec<ColumnId> = state.columns.iter().map(|c| c.id.clone()).collect();
        for id in &ids {
            state.compact_column(id);
        }

        tracing::debug!(
            board = %state.board.id,
            columns = state.columns.len(),
            tasks = state.tasks.len(),
            "loaded board snapshot"
        );
        Ok(state)
    }

    /// The canonical state, for the caller to persist.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            board: self.board.clone(),
            columns: self.columns.clone(),
            tasks: self.tasks.clone(),
            users: self.users.users().to_vec(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Columns in board order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// Counts committed mutations since the board was loaded.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn has_column(&self, column_id: &str) -> bool {
        self.column(column_id).is_some()
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    /// A column's tasks in stored position order, ignoring filters.
    pub fn column_tasks(&self, column_id: &str) -> Vec<&Task> {
        self.column_order(column_id)
            .into_iter()
            .map(|i| &self.tasks[i])
            .collect()
    }

    pub fn column_task_ids(&self, column_id: &str) -> Vec<TaskId> {
        self.column_order(column_id)
            .into_iter()
            .map(|i| self.tasks[i].id.clone())
            .collect()
    }

    pub fn column_task_count(&self, column_id: &str) -> usize {
        self.tasks.iter().filter(|t| t.column_id == column_id).count()
    }

    /// Advisory WIP state; never consulted by any mutation.
    pub fn is_over_wip_limit(&self, column_id: &str) -> bool {
        self.column(column_id)
            .is_some_and(|c| c.is_over_wip_limit(self.column_task_count(column_id)))
    }

    /// Column and index of a task in its column's ordered list.
    pub fn task_location(&self, task_id: &str) -> Option<(ColumnId, usize)> {
        let task = self.task(task_id)?;
        let index = self
            .column_order(&task.column_id)
            .into_iter()
            .position(|i| self.tasks[i].id == task_id)?;
        Some((task.column_id.clone(), index))
    }

    /// Derived read for the view: this column's tasks passing `filters`,
    /// ordered by `sort`. Computed fresh on every call.
    pub fn tasks_for_column(
        &self,
        column_id: &str,
        filters: &TaskFilters,
        sort: SortKey,
    ) -> Vec<&Task> {
        let visible = apply_filters(self.column_tasks(column_id), filters);
        sorted(&visible, sort)
    }

    /// Turn a drop target into `(column, index)` against the current order.
    ///
    /// Over a task: that task's column and its index before the dragged task
    /// is removed. Over a column: the end of that column.
    pub fn resolve_drop(&self, target: &DropTarget) -> Option<(ColumnId, usize)> {
        match target {
            DropTarget::Task(over) => self.task_location(over),
            DropTarget::Column(column_id) => self
                .has_column(column_id)
                .then(|| (column_id.clone(), self.column_task_count(column_id))),
        }
    }

    // --- columns ---

    /// Append a column with the configured default name and color.
    pub fn add_column(&mut self) -> ColumnId {
        let position = self
            .columns
            .iter()
            .map(|c| c.position)
            .max()
            .map_or(0, |p| p + 1);
        let column = Column::new(
            self.defaults.effective_column_name().to_string(),
            self.defaults.effective_column_color().to_string(),
            position,
        );
        let id = column.id.clone();
        self.columns.push(column);
        self.commit(format!("Add column {}", id));
        id
    }

    pub fn rename_column(&mut self, column_id: &str, name: impl Into<String>) -> bool {
        let name = name.into();
        let Some(column) = self.columns.iter_mut().find(|c| c.id == column_id) else {
            return self.ignore("rename_column", column_id);
        };
        column.name = name;
        self.commit(format!("Rename column {}", column_id));
        true
    }

    pub fn set_column_color(&mut self, column_id: &str, color: impl Into<String>) -> bool {
        let color = color.into();
        let Some(column) = self.columns.iter_mut().find(|c| c.id == column_id) else {
            return self.ignore("set_column_color", column_id);
        };
        column.color = color;
        self.commit(format!("Set color of column {}", column_id));
        true
    }

    /// Store an advisory WIP limit; `None` or `Some(0)` removes it.
    pub fn set_column_wip_limit(&mut self, column_id: &str, limit: Option<u32>) -> bool {
        let Some(column) = self.columns.iter_mut().find(|c| c.id == column_id) else {
            return self.ignore("set_column_wip_limit", column_id);
        };
        column.set_wip_limit(limit);
        self.commit(format!("Set WIP limit of column {} to {:?}", column_id, limit));
        true
    }

    /// Remove a column together with every task in it.
    ///
    /// Remaining columns keep their positions.
    pub fn delete_column(&mut self, column_id: &str) -> bool {
        let Some(index) = self.column_index(column_id) else {
            return self.ignore("delete_column", column_id);
        };
        self.columns.remove(index);
        let before = self.tasks.len();
        self.tasks.retain(|t| t.column_id != column_id);
        let removed = before - self.tasks.len();
        self.commit(format!(
            "Delete column {} and {} task(s)",
            column_id, removed
        ));
        true
    }

    /// Move a column to `target_index` (clamped) and renumber all columns
    /// `0..n` in the new order.
    pub fn move_column(&mut self, column_id: &str, target_index: usize) -> bool {
        let Some(from) = self.column_index(column_id) else {
            return self.ignore("move_column", column_id);
        };
        let was_contiguous = self
            .columns
            .iter()
            .enumerate()
            .all(|(i, c)| c.position == i as i32);

        let column = self.columns.remove(from);
        let to = target_index.min(self.columns.len());
        self.columns.insert(to, column);
        for (index, column) in self.columns.iter_mut().enumerate() {
            column.update_position(index as i32);
        }

        if from == to && was_contiguous {
            return false;
        }
        self.commit(format!("Move column {} to {}", column_id, to));
        true
    }

    // --- tasks ---

    /// Append an empty task to the end of a column.
    pub fn add_task(&mut self, column_id: &str, title: impl Into<String>) -> Option<TaskId> {
        if !self.has_column(column_id) {
            self.ignore("add_task", column_id);
            return None;
        }
        let position = self.column_task_count(column_id) as i32;
        let task = Task::new(
            self.board.id.clone(),
            column_id.to_string(),
            title.into(),
            position,
        );
        let id = task.id.clone();
        self.tasks.push(task);
        self.commit(format!("Add task {} to column {}", id, column_id));
        Some(id)
    }

    /// Move a task to `target_index` of `target_column_id`.
    ///
    /// The task is removed from its column first, then inserted at the index
    /// clamped to the target list. Both affected columns are renumbered.
    /// Returns false when nothing changed: unknown ids, or the task would
    /// land exactly where it already is.
    pub fn move_task(&mut self, task_id: &str, target_column_id: &str, target_index: usize) -> bool {
        let Some((source_column, source_index)) = self.task_location(task_id) else {
            return self.ignore("move_task", task_id);
        };
        if !self.has_column(target_column_id) {
            return self.ignore("move_task", target_column_id);
        }

        let mut source_ids = self.column_task_ids(&source_column);
        source_ids.remove(source_index);

        let index = if source_column == target_column_id {
            let index = target_index.min(source_ids.len());
            if index == source_index {
                return false;
            }
            source_ids.insert(index, task_id.to_string());
            self.renumber(&source_ids);
            index
        } else {
            let mut target_ids = self.column_task_ids(target_column_id);
            let index = target_index.min(target_ids.len());
            target_ids.insert(index, task_id.to_string());
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
                task.move_to_column(target_column_id.to_string(), index as i32);
            }
            self.renumber(&source_ids);
            self.renumber(&target_ids);
            index
        };

        self.commit(format!(
            "Move task {} to column {} at {}",
            task_id, target_column_id, index
        ));
        true
    }

    /// Resolve `target` with [`BoardState::resolve_drop`] and move there.
    pub fn move_task_to(&mut self, task_id: &str, target: &DropTarget) -> bool {
        match self.resolve_drop(target) {
            Some((column_id, index)) => self.move_task(task_id, &column_id, index),
            None => false,
        }
    }

    pub fn update_task(&mut self, task_id: &str, update: TaskUpdate) -> bool {
        if update.is_empty() {
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return self.ignore("update_task", task_id);
        };
        task.apply(update);
        self.commit(format!("Update task {}", task_id));
        true
    }

    pub fn delete_task(&mut self, task_id: &str) -> bool {
        let Some(index) = self.tasks.iter().position(|t| t.id == task_id) else {
            return self.ignore("delete_task", task_id);
        };
        let task = self.tasks.remove(index);
        self.compact_column(&task.column_id);
        self.commit(format!("Delete task {}", task_id));
        true
    }

    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) -> bool {
        let toggled = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .is_some_and(|t| t.toggle_subtask(subtask_id));
        if !toggled {
            return self.ignore("toggle_subtask", task_id);
        }
        self.commit(format!("Toggle subtask {} of task {}", subtask_id, task_id));
        true
    }

    // --- internals ---

    /// Indices into `tasks` for one column, by position then storage order.
    fn column_order(&self, column_id: &str) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.column_id == column_id)
            .map(|(i, _)| i)
            .collect();
        indices.sort_by_key(|&i| self.tasks[i].position);
        indices
    }

    /// Give the listed tasks positions `0..n` in list order.
    fn renumber(&mut self, ordered: &[TaskId]) {
        let positions: HashMap<&str, i32> = ordered
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i as i32))
            .collect();
        for task in &mut self.tasks {
            if let Some(position) = positions.get(task.id.as_str()) {
                task.position = *position;
            }
        }
    }

    fn compact_column(&mut self, column_id: &str) {
        let ordered = self.column_task_ids(column_id);
        self.renumber(&ordered);
    }

    fn ignore(&self, operation: &str, id: &str) -> bool {
        tracing::debug!(board = %self.board.id, operation, id, "ignoring request for unknown id");
        false
    }

    fn commit(&mut self, message: String) {
        self.revision += 1;
        tracing::debug!(board = %self.board.id, revision = self.revision, "{}", message);
        self.add_log(message);
    }
}

impl Loggable for BoardState {
    fn add_log(&mut self, message: String) {
        self.activity.push(LogEntry::new(self.revision, message));
    }

    fn get_logs(&self) -> &[LogEntry] {
        &self.activity
    }
}
