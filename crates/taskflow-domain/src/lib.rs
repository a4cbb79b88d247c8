pub mod board;
pub mod column;
pub mod commands;
pub mod field_update;
pub mod filter;
pub mod group;
pub mod label;
pub mod snapshot;
pub mod sort;
pub mod store;
pub mod task;
pub mod user;

pub use board::{Board, BoardId};
pub use column::{Column, ColumnId};
pub use commands::{BoardCommand, Command};
pub use field_update::FieldUpdate;
pub use filter::{apply_filters, FilterMemo, TaskFilter, TaskFilters};
pub use group::{group_tasks, GroupKey, TaskGroup};
pub use label::Label;
pub use snapshot::BoardSnapshot;
pub use sort::{sort_tasks, sorted, SortKey};
pub use store::{BoardState, DropTarget};
pub use task::{Subtask, Task, TaskId, TaskPriority, TaskStatus, TaskUpdate};
pub use user::{User, UserDirectory, UserId};
