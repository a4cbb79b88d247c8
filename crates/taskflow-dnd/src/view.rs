//! Board view composition.
//!
//! Combines the authoritative board, the filter bar, the sort selection and
//! an optional drag preview into what a renderer draws. Filter results are
//! memoized per board revision.

use serde::Serialize;
use taskflow_domain::{
    group_tasks, sort_tasks, Board, BoardState, Column, FilterMemo, GroupKey, SortKey, Task,
    TaskFilters, TaskGroup,
};

use crate::event::DragItem;
use crate::preview::DragPreview;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView<'a> {
    pub column: &'a Column,
    /// Visible tasks in display order.
    pub tasks: Vec<&'a Task>,
    /// All tasks in the column, filters ignored, preview applied.
    pub task_count: usize,
    pub over_wip_limit: bool,
    /// The column is being dragged.
    pub is_dragging: bool,
    /// A dragged task would land here.
    pub is_drop_target: bool,
}

impl<'a> ColumnView<'a> {
    pub fn groups(&self, key: GroupKey) -> Vec<TaskGroup<'a>> {
        group_tasks(&self.tasks, key)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView<'a> {
    pub board: &'a Board,
    pub columns: Vec<ColumnView<'a>>,
    pub sort: SortKey,
    pub active_filter_count: usize,
}

impl<'a> BoardView<'a> {
    pub fn visible_task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// Every visible task across columns, in board order.
    pub fn visible_tasks(&self) -> Vec<&'a Task> {
        self.columns
            .iter()
            .flat_map(|c| c.tasks.iter().copied())
            .collect()
    }

    /// Board-wide grouping of the visible tasks.
    pub fn groups(&self, key: GroupKey) -> Vec<TaskGroup<'a>> {
        group_tasks(&self.visible_tasks(), key)
    }
}

#[derive(Debug, Default)]
pub struct ViewComposer {
    memo: FilterMemo,
}

impl ViewComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_recomputations(&self) -> usize {
        self.memo.recomputations()
    }

    pub fn compose<'a>(
        &mut self,
        state: &'a BoardState,
        filters: &TaskFilters,
        sort: SortKey,
        preview: Option<&DragPreview>,
    ) -> BoardView<'a> {
        let visible = self.memo.visible(state.revision(), state.tasks(), filters);

        let column_ids = match preview {
            Some(preview) => preview.column_order(state),
            None => state.columns().iter().map(|c| c.id.clone()).collect(),
        };

        let columns = column_ids
            .iter()
            .filter_map(|column_id| state.column(column_id))
            .map(|column| {
                let task_ids = match preview {
                    Some(preview) => preview.task_order(state, &column.id),
                    None => state.column_task_ids(&column.id),
                };
                let mut tasks: Vec<&Task> = task_ids
                    .iter()
                    .filter(|id| visible.contains(id.as_str()))
                    .filter_map(|id| state.task(id))
                    .collect();
                sort_tasks(&mut tasks, sort);

                let dragged = preview.map(DragPreview::item);
                ColumnView {
                    column,
                    tasks,
                    task_count: task_ids.len(),
                    over_wip_limit: column.is_over_wip_limit(task_ids.len()),
                    is_dragging: dragged == Some(&DragItem::Column(column.id.clone())),
                    is_drop_target: preview.and_then(DragPreview::target_column)
                        == Some(column.id.as_str()),
                }
            })
            .collect();

        BoardView {
            board: state.board(),
            columns,
            sort,
            active_filter_count: filters.active_filter_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskflow_core::BoardConfig;
    use taskflow_domain::{BoardSnapshot, TaskPriority};

    fn state() -> BoardState {
        let board = Board::new("Test".into());
        let mut columns = Vec::new();
        let mut tasks = Vec::new();
        for (c, (column_id, task_ids)) in [("C1", vec!["a", "b", "c"]), ("C2", vec!["x"])]
            .into_iter()
            .enumerate()
        {
            let mut column = Column::new(column_id.into(), String::new(), c as i32);
            column.id = column_id.into();
            columns.push(column);
            for (p, task_id) in task_ids.into_iter().enumerate() {
                let mut task = Task::new(board.id.clone(), column_id.into(), task_id.into(), p as i32);
                task.id = task_id.into();
                tasks.push(task);
            }
        }
        tasks[1].priority = TaskPriority::Urgent;
        BoardState::from_snapshot(BoardSnapshot::from_data(board, columns, tasks), BoardConfig::default())
            .unwrap()
    }

    fn ids(view: &ColumnView<'_>) -> Vec<String> {
        view.tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_compose_plain_board() {
        let state = state();
        let mut composer = ViewComposer::new();
        let view = composer.compose(&state, &TaskFilters::default(), SortKey::Manual, None);

        assert_eq!(view.columns.len(), 2);
        assert_eq!(ids(&view.columns[0]), vec!["a", "b", "c"]);
        assert_eq!(view.visible_task_count(), 4);
        assert_eq!(view.active_filter_count, 0);
    }

    #[test]
    fn test_filter_and_sort_apply_per_column() {
        let state = state();
        let mut composer = ViewComposer::new();
        let mut filters = TaskFilters::new();
        filters.search = "a".into();

        let view = composer.compose(&state, &filters, SortKey::Manual, None);
        assert_eq!(ids(&view.columns[0]), vec!["a"]);
        assert_eq!(view.columns[0].task_count, 3);
        assert!(view.columns[1].tasks.is_empty());

        let view = composer.compose(&state, &TaskFilters::default(), SortKey::Priority, None);
        assert_eq!(ids(&view.columns[0]), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_memo_reuses_filter_until_revision_changes() {
        let mut state = state();
        let mut composer = ViewComposer::new();
        let filters = TaskFilters::default();

        composer.compose(&state, &filters, SortKey::Manual, None);
        composer.compose(&state, &filters, SortKey::Priority, None);
        assert_eq!(composer.filter_recomputations(), 1);

        state.add_task("C2", "new");
        let view = composer.compose(&state, &filters, SortKey::Manual, None);
        assert_eq!(composer.filter_recomputations(), 2);
        assert_eq!(view.columns[1].tasks.len(), 2);
    }

    #[test]
    fn test_preview_is_overlaid() {
        let mut state = state();
        state.set_column_wip_limit("C2", Some(1));
        let mut composer = ViewComposer::new();
        let mut preview = DragPreview::new(DragItem::Task("a".into()));
        preview.hover(&DragItem::Column("C2".into()), &state);

        let view = composer.compose(&state, &TaskFilters::default(), SortKey::Manual, Some(&preview));
        assert_eq!(ids(&view.columns[0]), vec!["b", "c"]);
        assert_eq!(ids(&view.columns[1]), vec!["x", "a"]);
        assert!(view.columns[1].is_drop_target);
        assert!(view.columns[1].over_wip_limit);
        assert!(!state.is_over_wip_limit("C2"));
    }

    #[test]
    fn test_column_drag_preview() {
        let state = state();
        let mut composer = ViewComposer::new();
        let mut preview = DragPreview::new(DragItem::Column("C2".into()));
        preview.hover(&DragItem::Column("C1".into()), &state);

        let view = composer.compose(&state, &TaskFilters::default(), SortKey::Manual, Some(&preview));
        assert_eq!(view.columns[0].column.id, "C2");
        assert!(view.columns[0].is_dragging);
        assert!(!view.columns[1].is_dragging);
    }

    #[test]
    fn test_board_wide_groups() {
        let state = state();
        let mut composer = ViewComposer::new();
        let view = composer.compose(&state, &TaskFilters::default(), SortKey::Manual, None);

        let groups = view.groups(GroupKey::Priority);
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Urgent", "Medium"]);
        assert_eq!(groups[1].tasks.len(), 3);
    }
}
