use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{BoardId, ColumnId, FieldUpdate, Label, UserId};

pub type TaskId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Urgent,
        TaskPriority::High,
        TaskPriority::Medium,
        TaskPriority::Low,
    ];

    /// Sort rank, most pressing first.
    pub fn rank(self) -> u8 {
        match self {
            TaskPriority::Urgent => 0,
            TaskPriority::High => 1,
            TaskPriority::Medium => 2,
            TaskPriority::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Backlog,
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Backlog,
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Backlog => "backlog",
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Backlog => "Backlog",
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "backlog" => Ok(TaskStatus::Backlog),
            "todo" | "to_do" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// A unit of work on the board.
///
/// `column_id` is the only thing deciding which column lists the task, and
/// `position` orders it inside that column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TaskRecord")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignees: Vec<UserId>,
    pub due_date: Option<DateTime<Utc>>,
    pub labels: Vec<Label>,
    pub subtasks: Vec<Subtask>,
    pub attachment_count: u32,
    pub comment_count: u32,
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Assignee as found in stored rows: a bare id or an embedded user record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AssigneeRef {
    Id(UserId),
    User { id: UserId },
}

impl AssigneeRef {
    fn into_id(self) -> UserId {
        match self {
            AssigneeRef::Id(id) => id,
            AssigneeRef::User { id } => id,
        }
    }
}

/// Lenient wire shape of a task row.
///
/// Rows come with a single `assigneeId`, an `assignees` list, or both; nulls
/// show up where lists or strings are expected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: TaskId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    priority: TaskPriority,
    #[serde(default)]
    assignee_id: Option<UserId>,
    #[serde(default)]
    assignees: Option<Vec<AssigneeRef>>,
    #[serde(default)]
    due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    labels: Option<Vec<Label>>,
    #[serde(default)]
    subtasks: Option<Vec<Subtask>>,
    #[serde(default)]
    attachment_count: u32,
    #[serde(default)]
    comment_count: u32,
    #[serde(default)]
    board_id: BoardId,
    column_id: ColumnId,
    #[serde(default)]
    position: i32,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let mut assignees: Vec<UserId> = Vec::new();
        let listed = record
            .assignees
            .unwrap_or_default()
            .into_iter()
            .map(AssigneeRef::into_id);
        for id in record.assignee_id.into_iter().chain(listed) {
            if !assignees.contains(&id) {
                assignees.push(id);
            }
        }

        Self {
            id: record.id,
            title: record.title,
            description: record.description.unwrap_or_default(),
            status: record.status,
            priority: record.priority,
            assignees,
            due_date: record.due_date,
            labels: record.labels.unwrap_or_default(),
            subtasks: record.subtasks.unwrap_or_default(),
            attachment_count: record.attachment_count,
            comment_count: record.comment_count,
            board_id: record.board_id,
            column_id: record.column_id,
            position: record.position,
            created_at: record.created_at,
        }
    }
}

impl Task {
    /// An empty task shell: status `todo`, priority `Medium`, nothing else set.
    pub fn new(board_id: BoardId, column_id: ColumnId, title: String, position: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            assignees: Vec::new(),
            due_date: None,
            labels: Vec::new(),
            subtasks: Vec::new(),
            attachment_count: 0,
            comment_count: 0,
            board_id,
            column_id,
            position,
            created_at: Utc::now(),
        }
    }

    pub fn move_to_column(&mut self, column_id: ColumnId, position: i32) {
        self.column_id = column_id;
        self.position = position;
    }

    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(Label::display_name)
    }

    /// `(completed, total)` subtask counts.
    pub fn subtask_progress(&self) -> (usize, usize) {
        let completed = self.subtasks.iter().filter(|s| s.completed).count();
        (completed, self.subtasks.len())
    }

    /// Flip a subtask's completed flag. Returns false for an unknown subtask.
    pub fn toggle_subtask(&mut self, subtask_id: &str) -> bool {
        match self.subtasks.iter_mut().find(|s| s.id == subtask_id) {
            Some(subtask) => {
                subtask.completed = !subtask.completed;
                true
            }
            None => false,
        }
    }

    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(assignees) = update.assignees {
            self.assignees = assignees;
        }
        if let Some(labels) = update.labels {
            self.labels = labels;
        }
        update.due_date.apply_to(&mut self.due_date);
    }
}

/// Partial edit of a task's user-facing fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<UserId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_no_change")]
    pub due_date: FieldUpdate<DateTime<Utc>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignees.is_none()
            && self.labels.is_none()
            && self.due_date.is_no_change()
    }
}
