//! Task filtering.
//!
//! [`TaskFilters`] holds what the filter bar selected; [`TaskFilter`]
//! implementations decide whether a single task passes. All active predicates
//! are ANDed and relative order of the input is always preserved.

pub mod memo;
pub mod task_filter;
pub mod task_filters;

pub use memo::FilterMemo;
pub use task_filter::{
    AssigneeFilter, CompositeFilter, LabelFilter, PriorityFilter, StatusFilter,
    TaskFilter, TitleSearchFilter,
};
pub use task_filters::TaskFilters;

use crate::Task;

/// Keep the tasks that satisfy every active predicate in `filters`.
pub fn apply_filters<'a, I>(tasks: I, filters: &TaskFilters) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let filter = CompositeFilter::from_filters(filters);
    if filter.is_empty() {
        return tasks.into_iter().collect();
    }
    tasks.into_iter().filter(|t| filter.matches(t)).collect()
}
