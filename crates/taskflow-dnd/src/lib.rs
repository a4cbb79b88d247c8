//! Pointer and keyboard drag-and-drop for taskflow boards, plus the view
//! composition that renders a board with an in-flight drag on top.

pub mod collision;
pub mod controller;
pub mod event;
pub mod geometry;
pub mod preview;
pub mod view;

pub use collision::{closest_corners, Droppable};
pub use controller::{DragController, DragOutcome, InputMode};
pub use event::{Direction, DragEvent, DragItem};
pub use geometry::{Point, Rect};
pub use preview::{DragPreview, Placement};
pub use view::{BoardView, ColumnView, ViewComposer};
