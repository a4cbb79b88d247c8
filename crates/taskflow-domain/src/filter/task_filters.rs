//! Filter bar state.

use std::collections::BTreeSet;

use crate::{TaskPriority, TaskStatus, UserId};

/// The predicates selected in the filter bar.
///
/// An empty search string or an empty set leaves that predicate inactive.
/// Ordered sets keep the value hashable so views can memoize on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TaskFilters {
    /// Case-insensitive substring of the task title.
    pub search: String,
    pub statuses: BTreeSet<TaskStatus>,
    pub priorities: BTreeSet<TaskPriority>,
    pub assignees: BTreeSet<UserId>,
    /// Label display names.
    pub labels: BTreeSet<String>,
}

impl TaskFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }

    /// Number of predicates currently narrowing the result.
    pub fn active_filter_count(&self) -> usize {
        [
            !self.search.is_empty(),
            !self.statuses.is_empty(),
            !self.priorities.is_empty(),
            !self.assignees.is_empty(),
            !self.labels.is_empty(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    pub fn clear(&mut self) {
        self.search.clear();
        self.statuses.clear();
        self.priorities.clear();
        self.assignees.clear();
        self.labels.clear();
    }

    pub fn toggle_status(&mut self, status: TaskStatus) {
        toggle(&mut self.statuses, status);
    }

    pub fn toggle_priority(&mut self, priority: TaskPriority) {
        toggle(&mut self.priorities, priority);
    }

    pub fn toggle_assignee(&mut self, user_id: UserId) {
        toggle(&mut self.assignees, user_id);
    }

    pub fn toggle_label(&mut self, label: String) {
        toggle(&mut self.labels, label);
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if set.contains(&value) {
        set.remove(&value);
    } else {
        set.insert(value);
    }
}
