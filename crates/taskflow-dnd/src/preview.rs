//! Tentative placement of the dragged item.
//!
//! A `DragPreview` never touches the board. It describes where the dragged
//! item would land and can render the resulting orders on top of the
//! authoritative `BoardState`. The orders it shows are exactly what the
//! matching `BoardCommand` produces when committed.

use taskflow_domain::{BoardCommand, BoardState, ColumnId, DropTarget, TaskId};

use crate::event::{Direction, DragItem};

/// Where the dragged item would land if released now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Index into the target column's list with the dragged task removed.
    Task { column_id: ColumnId, index: usize },
    /// Index into the column list with the dragged column removed.
    Column { index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragPreview {
    item: DragItem,
    placement: Option<Placement>,
}

impl DragPreview {
    pub fn new(item: DragItem) -> Self {
        Self {
            item,
            placement: None,
        }
    }

    /// Preview starting at the item's current slot.
    pub fn at_origin(item: DragItem, state: &BoardState) -> Self {
        let placement = match &item {
            DragItem::Task(task_id) => state
                .task_location(task_id)
                .map(|(column_id, index)| Placement::Task { column_id, index }),
            DragItem::Column(column_id) => state
                .column_index(column_id)
                .map(|index| Placement::Column { index }),
        };
        Self { item, placement }
    }

    pub fn item(&self) -> &DragItem {
        &self.item
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn clear_placement(&mut self) {
        self.placement = None;
    }

    /// Point the preview at whatever the pointer is over.
    ///
    /// Over a task: immediately before that task. Over a column: the end of
    /// that column for a task drag, that column's slot for a column drag.
    /// A target that does not fit the dragged type clears the placement.
    pub fn hover(&mut self, over: &DragItem, state: &BoardState) {
        self.placement = match (&self.item, over) {
            (DragItem::Task(_), _) => state
                .resolve_drop(&DropTarget::from(over.clone()))
                .map(|(column_id, index)| Placement::Task { column_id, index }),
            (DragItem::Column(_), DragItem::Column(column_id)) => state
                .column_index(column_id)
                .map(|index| Placement::Column { index }),
            (DragItem::Column(_), DragItem::Task(_)) => None,
        };
    }

    /// Move the tentative slot one step from the keyboard.
    pub fn step(&mut self, direction: Direction, state: &BoardState) {
        let Some(placement) = self.placement.clone() else {
            return;
        };
        self.placement = match (&self.item, placement) {
            (DragItem::Task(task_id), Placement::Task { column_id, index }) => {
                let len = tasks_without(state, &column_id, task_id);
                match direction {
                    Direction::Up => Some(Placement::Task {
                        column_id,
                        index: index.min(len).saturating_sub(1),
                    }),
                    Direction::Down => Some(Placement::Task {
                        column_id,
                        index: (index + 1).min(len),
                    }),
                    Direction::Left | Direction::Right => {
                        let neighbour = state.column_index(&column_id).and_then(|i| {
                            let next = if direction == Direction::Left {
                                i.checked_sub(1)?
                            } else {
                                i + 1
                            };
                            state.columns().get(next)
                        });
                        match neighbour {
                            Some(column) => Some(Placement::Task {
                                index: tasks_without(state, &column.id, task_id),
                                column_id: column.id.clone(),
                            }),
                            None => Some(Placement::Task { column_id, index }),
                        }
                    }
                }
            }
            (DragItem::Column(_), Placement::Column { index }) => {
                let last = state.columns().len().saturating_sub(1);
                let index = match direction {
                    Direction::Left => index.saturating_sub(1),
                    Direction::Right => (index + 1).min(last),
                    Direction::Up | Direction::Down => index,
                };
                Some(Placement::Column { index })
            }
            (_, placement) => Some(placement),
        };
    }

    /// Task ids of `column_id` in the order the preview shows them.
    pub fn task_order(&self, state: &BoardState, column_id: &str) -> Vec<TaskId> {
        let mut ids = state.column_task_ids(column_id);
        if let (DragItem::Task(task_id), Some(Placement::Task { column_id: target, index })) =
            (&self.item, &self.placement)
        {
            if state.task(task_id).is_none() {
                return ids;
            }
            ids.retain(|id| id != task_id);
            if target == column_id {
                let index = (*index).min(ids.len());
                ids.insert(index, task_id.clone());
            }
        }
        ids
    }

    /// Column ids in the order the preview shows them.
    pub fn column_order(&self, state: &BoardState) -> Vec<ColumnId> {
        let mut ids: Vec<ColumnId> = state.columns().iter().map(|c| c.id.clone()).collect();
        if let (DragItem::Column(column_id), Some(Placement::Column { index })) =
            (&self.item, &self.placement)
        {
            if let Some(from) = ids.iter().position(|id| id == column_id) {
                let id = ids.remove(from);
                let index = (*index).min(ids.len());
                ids.insert(index, id);
            }
        }
        ids
    }

    /// Column the dragged task would land in.
    pub fn target_column(&self) -> Option<&str> {
        match &self.placement {
            Some(Placement::Task { column_id, .. }) => Some(column_id.as_str()),
            _ => None,
        }
    }

    /// The store command that commits this preview, if it has a placement.
    pub fn to_command(&self) -> Option<BoardCommand> {
        match (&self.item, self.placement.as_ref()?) {
            (DragItem::Task(task_id), Placement::Task { column_id, index }) => {
                Some(BoardCommand::MoveTask {
                    task_id: task_id.clone(),
                    target_column_id: column_id.clone(),
                    target_index: *index,
                })
            }
            (DragItem::Column(column_id), Placement::Column { index }) => {
                Some(BoardCommand::MoveColumn {
                    column_id: column_id.clone(),
                    target_index: *index,
                })
            }
            _ => None,
        }
    }
}

/// Number of tasks in `column_id` once `task_id` is taken out.
fn tasks_without(state: &BoardState, column_id: &str, task_id: &str) -> usize {
    state
        .column_task_ids(column_id)
        .iter()
        .filter(|id| *id != task_id)
        .count()
}
