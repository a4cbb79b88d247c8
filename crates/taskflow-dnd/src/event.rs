//! Gesture input.

use serde::{Deserialize, Serialize};
use taskflow_domain::{ColumnId, DropTarget, TaskId};

use crate::geometry::Point;

/// The thing being dragged, or a droppable region on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum DragItem {
    Task(TaskId),
    Column(ColumnId),
}

impl DragItem {
    pub fn id(&self) -> &str {
        match self {
            DragItem::Task(id) | DragItem::Column(id) => id,
        }
    }

    pub fn is_column(&self) -> bool {
        matches!(self, DragItem::Column(_))
    }
}

impl From<DragItem> for DropTarget {
    fn from(item: DragItem) -> Self {
        match item {
            DragItem::Task(id) => DropTarget::Task(id),
            DragItem::Column(id) => DropTarget::Column(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Raw pointer and keyboard events fed to the drag controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DragEvent {
    PointerDown { item: DragItem, point: Point },
    PointerMove { point: Point },
    PointerUp { point: Point },
    /// Grab the focused item from the keyboard.
    KeyActivate { item: DragItem },
    KeyMove { direction: Direction },
    KeyConfirm,
    /// Escape: abandons a pointer or keyboard drag alike.
    KeyCancel,
}
