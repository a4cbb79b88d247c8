use std::collections::HashSet;

use super::{apply_filters, TaskFilters};
use crate::{Task, TaskId};

/// Caches the set of task ids passing a filter for one board revision.
///
/// The key is `(revision, filters)`: any committed mutation bumps the
/// revision, so a stale result is never served after the board changes.
#[derive(Debug, Default)]
pub struct FilterMemo {
    key: Option<(u64, TaskFilters)>,
    visible: HashSet<TaskId>,
    recomputations: usize,
}

impl FilterMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible<'a, I>(&mut self, revision: u64, tasks: I, filters: &TaskFilters) -> &HashSet<TaskId>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let fresh = matches!(&self.key, Some((rev, cached)) if *rev == revision && cached == filters);
        if !fresh {
            self.visible = apply_filters(tasks, filters)
                .into_iter()
                .map(|t| t.id.clone())
                .collect();
            self.key = Some((revision, filters.clone()));
            self.recomputations += 1;
        }
        &self.visible
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// How many times the filter actually ran.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
