//! Task filter predicates.
//!
//! Each filter answers one question about a task. [`CompositeFilter`] combines
//! them with AND logic and is what the board store runs per render.

use std::collections::BTreeSet;

use super::TaskFilters;
use crate::{Task, TaskPriority, TaskStatus, UserId};

/// Trait for filtering tasks by various criteria.
pub trait TaskFilter {
    /// Returns true if the task matches the filter criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Case-insensitive substring match on the title.
pub struct TitleSearchFilter {
    query: String,
}

impl TitleSearchFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }
}

impl TaskFilter for TitleSearchFilter {
    fn matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        task.title.to_lowercase().contains(&self.query)
    }
}

pub struct StatusFilter {
    statuses: BTreeSet<TaskStatus>,
}

impl StatusFilter {
    pub fn new(statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        Self {
            statuses: statuses.into_iter().collect(),
        }
    }
}

impl TaskFilter for StatusFilter {
    fn matches(&self, task: &Task) -> bool {
        self.statuses.contains(&task.status)
    }
}

pub struct PriorityFilter {
    priorities: BTreeSet<TaskPriority>,
}

impl PriorityFilter {
    pub fn new(priorities: impl IntoIterator<Item = TaskPriority>) -> Self {
        Self {
            priorities: priorities.into_iter().collect(),
        }
    }
}

impl TaskFilter for PriorityFilter {
    fn matches(&self, task: &Task) -> bool {
        self.priorities.contains(&task.priority)
    }
}

/// Passes when any of the task's assignees is selected.
pub struct AssigneeFilter {
    user_ids: BTreeSet<UserId>,
}

impl AssigneeFilter {
    pub fn new(user_ids: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            user_ids: user_ids.into_iter().collect(),
        }
    }
}

impl TaskFilter for AssigneeFilter {
    fn matches(&self, task: &Task) -> bool {
        task.assignees.iter().any(|id| self.user_ids.contains(id))
    }
}

/// Passes when any of the task's labels, by display name, is selected.
pub struct LabelFilter {
    names: BTreeSet<String>,
}

impl LabelFilter {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }
}

impl TaskFilter for LabelFilter {
    fn matches(&self, task: &Task) -> bool {
        task.label_names().any(|name| self.names.contains(name))
    }
}

/// Combine multiple filters with AND logic.
pub struct CompositeFilter {
    filters: Vec<Box<dyn TaskFilter>>,
}

impl CompositeFilter {
    /// Create an empty composite filter (matches all tasks).
    pub fn new() -> Self {
        Self { filters: vec![] }
    }

    /// Build the filter for the active predicates of `filters`.
    pub fn from_filters(filters: &TaskFilters) -> Self {
        let mut composite = Self::new();
        if !filters.search.is_empty() {
            composite = composite.with_filter(Box::new(TitleSearchFilter::new(
                filters.search.as_str(),
            )));
        }
        if !filters.statuses.is_empty() {
            composite = composite.with_filter(Box::new(StatusFilter::new(
                filters.statuses.iter().copied(),
            )));
        }
        if !filters.priorities.is_empty() {
            composite = composite.with_filter(Box::new(PriorityFilter::new(
                filters.priorities.iter().copied(),
            )));
        }
        if !filters.assignees.is_empty() {
            composite = composite.with_filter(Box::new(AssigneeFilter::new(
                filters.assignees.iter().cloned(),
            )));
        }
        if !filters.labels.is_empty() {
            composite =
                composite.with_filter(Box::new(LabelFilter::new(filters.labels.iter().cloned())));
        }
        composite
    }

    /// Add a filter to the composite (builder pattern).
    pub fn with_filter(mut self, filter: Box<dyn TaskFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for CompositeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskFilter for CompositeFilter {
    fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|f| f.matches(task))
    }
}
