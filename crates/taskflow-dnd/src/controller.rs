//! Drag gesture state machine.
//!
//! ```text
//! Idle --pointer down--> Pressed --moved past threshold--> Dragging(pointer)
//!  ^                        |                                  |
//!  |                   pointer up: click              up / cancel
//!  +------------------------+----------------------------------+
//! Idle --key activate--> Dragging(keyboard) --confirm / cancel--> Idle
//! ```
//!
//! The controller only writes to the board when a drag ends over a valid
//! target. Everything before that lives in the [`DragPreview`].

use taskflow_core::DragConfig;
use taskflow_domain::{BoardCommand, BoardState, Command};

use crate::collision::{closest_corners, Droppable};
use crate::event::{DragEvent, DragItem};
use crate::geometry::Point;
use crate::preview::{DragPreview, Placement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Pointer,
    Keyboard,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Pressed { item: DragItem, origin: Point },
    Dragging { preview: DragPreview, mode: InputMode },
}

/// What a single event did.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Event does not apply in the current phase.
    Ignored,
    /// Pointer is down on an item but has not moved far enough yet.
    Pressed,
    /// Pointer released before the drag threshold.
    Clicked(DragItem),
    Started(DragItem),
    /// The tentative slot after a hover or keyboard step.
    Hover(Option<Placement>),
    /// Dropped on a valid target; the command has been applied to the board.
    Committed(BoardCommand),
    /// Dropped back where it started, or the target vanished meanwhile.
    Unchanged,
    /// Released outside every drop target, or cancelled.
    Abandoned,
}

#[derive(Debug, Clone)]
pub struct DragController {
    activation_distance: f64,
    droppables: Vec<Droppable>,
    phase: Phase,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(&DragConfig::default())
    }
}

impl DragController {
    pub fn new(config: &DragConfig) -> Self {
        Self {
            activation_distance: config.effective_activation_distance(),
            droppables: Vec::new(),
            phase: Phase::Idle,
        }
    }

    /// Replace the rendered drop regions. Called by the view after layout.
    pub fn set_layout(&mut self, droppables: Vec<Droppable>) {
        self.droppables = droppables;
    }

    pub fn activation_distance(&self) -> f64 {
        self.activation_distance
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn preview(&self) -> Option<&DragPreview> {
        match &self.phase {
            Phase::Dragging { preview, .. } => Some(preview),
            _ => None,
        }
    }

    pub fn handle(&mut self, event: DragEvent, state: &mut BoardState) -> DragOutcome {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let (next, outcome) = match (phase, event) {
            (Phase::Idle, DragEvent::PointerDown { item, point }) => {
                if exists(&item, state) {
                    (Phase::Pressed { item, origin: point }, DragOutcome::Pressed)
                } else {
                    (Phase::Idle, DragOutcome::Ignored)
                }
            }
            (Phase::Idle, DragEvent::KeyActivate { item }) => {
                if exists(&item, state) {
                    tracing::debug!(item = item.id(), "keyboard drag started");
                    let preview = DragPreview::at_origin(item.clone(), state);
                    (
                        Phase::Dragging {
                            preview,
                            mode: InputMode::Keyboard,
                        },
                        DragOutcome::Started(item),
                    )
                } else {
                    (Phase::Idle, DragOutcome::Ignored)
                }
            }

            (Phase::Pressed { item, origin }, DragEvent::PointerMove { point }) => {
                if origin.distance_to(point) > self.activation_distance {
                    tracing::debug!(item = item.id(), "pointer drag started");
                    let mut preview = DragPreview::new(item.clone());
                    self.hover(&mut preview, point, state);
                    (
                        Phase::Dragging {
                            preview,
                            mode: InputMode::Pointer,
                        },
                        DragOutcome::Started(item),
                    )
                } else {
                    (Phase::Pressed { item, origin }, DragOutcome::Pressed)
                }
            }
            (Phase::Pressed { item, .. }, DragEvent::PointerUp { .. }) => {
                (Phase::Idle, DragOutcome::Clicked(item))
            }
            (Phase::Pressed { .. }, DragEvent::KeyCancel) => (Phase::Idle, DragOutcome::Ignored),

            (
                Phase::Dragging {
                    mut preview,
                    mode: InputMode::Pointer,
                },
                DragEvent::PointerMove { point },
            ) => {
                self.hover(&mut preview, point, state);
                let placement = preview.placement().cloned();
                (
                    Phase::Dragging {
                        preview,
                        mode: InputMode::Pointer,
                    },
                    DragOutcome::Hover(placement),
                )
            }
            (
                Phase::Dragging {
                    mut preview,
                    mode: InputMode::Pointer,
                },
                DragEvent::PointerUp { point },
            ) => {
                self.hover(&mut preview, point, state);
                (Phase::Idle, commit(&preview, state))
            }
            (
                Phase::Dragging {
                    mut preview,
                    mode: InputMode::Keyboard,
                },
                DragEvent::KeyMove { direction },
            ) => {
                preview.step(direction, state);
                tracing::trace!(placement = ?preview.placement(), "keyboard step");
                let placement = preview.placement().cloned();
                (
                    Phase::Dragging {
                        preview,
                        mode: InputMode::Keyboard,
                    },
                    DragOutcome::Hover(placement),
                )
            }
            (
                Phase::Dragging {
                    preview,
                    mode: InputMode::Keyboard,
                },
                DragEvent::KeyConfirm,
            ) => (Phase::Idle, commit(&preview, state)),
            (Phase::Dragging { preview, .. }, DragEvent::KeyCancel) => {
                tracing::debug!(item = preview.item().id(), "drag cancelled");
                (Phase::Idle, DragOutcome::Abandoned)
            }

            (phase, _) => (phase, DragOutcome::Ignored),
        };
        self.phase = next;
        outcome
    }

    fn hover(&self, preview: &mut DragPreview, point: Point, state: &BoardState) {
        match closest_corners(&self.droppables, preview.item(), point) {
            Some(droppable) => preview.hover(&droppable.target, state),
            None => preview.clear_placement(),
        }
        tracing::trace!(x = point.x, y = point.y, placement = ?preview.placement(), "drag over");
    }
}

fn exists(item: &DragItem, state: &BoardState) -> bool {
    match item {
        DragItem::Task(id) => state.task(id).is_some(),
        DragItem::Column(id) => state.has_column(id),
    }
}

fn commit(preview: &DragPreview, state: &mut BoardState) -> DragOutcome {
    let Some(command) = preview.to_command() else {
        tracing::debug!(item = preview.item().id(), "drag abandoned without a target");
        return DragOutcome::Abandoned;
    };
    if command.execute(state) {
        tracing::debug!(item = preview.item().id(), "{}", command.description());
        DragOutcome::Committed(command)
    } else {
        DragOutcome::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Direction;
    use crate::geometry::Rect;
    use taskflow_core::BoardConfig;
    use taskflow_domain::{Board, BoardSnapshot, Column, Task};

    fn state() -> BoardState {
        let board = Board::new("Test".into());
        let mut columns = Vec::new();
        let mut tasks = Vec::new();
        for (c, (column_id, task_ids)) in [("C1", vec!["t1", "t2"]), ("C2", vec!["x"])]
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
        BoardState::from_snapshot(BoardSnapshot::from_data(board, columns, tasks), BoardConfig::default())
            .unwrap()
    }

    /// Two 200px tracks side by side with 50px cards stacked from y=40.
    fn controller(state: &BoardState) -> DragController {
        let mut droppables = Vec::new();
        for (c, column) in state.columns().iter().enumerate() {
            let x = c as f64 * 220.0;
            droppables.push(Droppable::new(
                DragItem::Column(column.id.clone()),
                Rect::new(x, 0.0, 200.0, 600.0),
            ));
            for (i, task) in state.column_tasks(&column.id).iter().enumerate() {
                droppables.push(Droppable::new(
                    DragItem::Task(task.id.clone()),
                    Rect::new(x + 10.0, 40.0 + i as f64 * 60.0, 180.0, 50.0),
                ));
            }
        }
        let mut controller = DragController::default();
        controller.set_layout(droppables);
        controller
    }

    fn down(id: &str, x: f64, y: f64) -> DragEvent {
        DragEvent::PointerDown {
            item: DragItem::Task(id.into()),
            point: Point::new(x, y),
        }
    }

    fn pointer_move(x: f64, y: f64) -> DragEvent {
        DragEvent::PointerMove {
            point: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> DragEvent {
        DragEvent::PointerUp {
            point: Point::new(x, y),
        }
    }

    #[test]
    fn test_small_movement_is_a_click() {
        let mut state = state();
        let mut controller = controller(&state);

        assert_eq!(controller.handle(down("t1", 50.0, 60.0), &mut state), DragOutcome::Pressed);
        assert_eq!(controller.handle(pointer_move(55.0, 63.0), &mut state), DragOutcome::Pressed);
        assert_eq!(
            controller.handle(up(55.0, 63.0), &mut state),
            DragOutcome::Clicked(DragItem::Task("t1".into()))
        );
        assert!(controller.is_idle());
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_pointer_drag_to_other_column_commits() {
        let mut state = state();
        let mut controller = controller(&state);

        controller.handle(down("t1", 50.0, 60.0), &mut state);
        assert_eq!(
            controller.handle(pointer_move(300.0, 300.0), &mut state),
            DragOutcome::Started(DragItem::Task("t1".into()))
        );
        assert_eq!(state.revision(), 0);

        let outcome = controller.handle(up(300.0, 300.0), &mut state);
        assert_eq!(
            outcome,
            DragOutcome::Committed(BoardCommand::MoveTask {
                task_id: "t1".into(),
                target_column_id: "C2".into(),
                target_index: 1,
            })
        );
        assert_eq!(state.column_task_ids("C2"), vec!["x", "t1"]);
        assert!(controller.is_idle());
    }

    #[test]
    fn test_hover_does_not_write_to_store() {
        let mut state = state();
        let mut controller = controller(&state);
        let before = state.snapshot();

        controller.handle(down("t1", 50.0, 60.0), &mut state);
        controller.handle(pointer_move(300.0, 60.0), &mut state);
        let outcome = controller.handle(pointer_move(100.0, 120.0), &mut state);

        assert_eq!(
            outcome,
            DragOutcome::Hover(Some(Placement::Task {
                column_id: "C1".into(),
                index: 1,
            }))
        );
        assert_eq!(state.snapshot(), before);
        assert!(controller.preview().is_some());
    }

    #[test]
    fn test_release_outside_restores_everything() {
        let mut state = state();
        let mut controller = controller(&state);
        let before = state.snapshot();

        controller.handle(down("t1", 50.0, 60.0), &mut state);
        controller.handle(pointer_move(300.0, 100.0), &mut state);
        assert_eq!(controller.handle(up(2000.0, 2000.0), &mut state), DragOutcome::Abandoned);

        assert_eq!(state.snapshot(), before);
        assert_eq!(state.revision(), 0);
        assert!(controller.is_idle());
    }

    #[test]
    fn test_cancel_during_pointer_drag() {
        let mut state = state();
        let mut controller = controller(&state);

        controller.handle(down("t1", 50.0, 60.0), &mut state);
        controller.handle(pointer_move(300.0, 100.0), &mut state);
        assert_eq!(controller.handle(DragEvent::KeyCancel, &mut state), DragOutcome::Abandoned);
        assert_eq!(controller.handle(up(300.0, 100.0), &mut state), DragOutcome::Ignored);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_drop_on_itself_is_unchanged() {
        let mut state = state();
        let mut controller = controller(&state);

        controller.handle(down("t2", 50.0, 120.0), &mut state);
        controller.handle(pointer_move(100.0, 300.0), &mut state);
        assert_eq!(controller.handle(up(100.0, 300.0), &mut state), DragOutcome::Unchanged);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_release_over_own_card_is_unchanged() {
        let mut state = state();
        let mut controller = controller(&state);

        controller.handle(down("t1", 50.0, 60.0), &mut state);
        assert_eq!(
            controller.handle(pointer_move(70.0, 75.0), &mut state),
            DragOutcome::Started(DragItem::Task("t1".into()))
        );
        assert_eq!(
            controller.preview().and_then(|p| p.placement()).cloned(),
            Some(Placement::Task {
                column_id: "C1".into(),
                index: 0,
            })
        );
        assert_eq!(controller.handle(up(70.0, 75.0), &mut state), DragOutcome::Unchanged);
        assert_eq!(state.column_task_ids("C1"), vec!["t1", "t2"]);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_column_drag_commits_move_column() {
        let mut state = state();
        let mut controller = controller(&state);

        controller.handle(
            DragEvent::PointerDown {
                item: DragItem::Column("C2".into()),
                point: Point::new(300.0, 10.0),
            },
            &mut state,
        );
        controller.handle(pointer_move(50.0, 60.0), &mut state);
        let outcome = controller.handle(up(50.0, 60.0), &mut state);

        assert!(matches!(outcome, DragOutcome::Committed(BoardCommand::MoveColumn { .. })));
        let order: Vec<_> = state.columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["C2", "C1"]);
    }

    #[test]
    fn test_keyboard_drag() {
        let mut state = state();
        let mut controller = controller(&state);

        assert_eq!(
            controller.handle(
                DragEvent::KeyActivate {
                    item: DragItem::Task("x".into())
                },
                &mut state
            ),
            DragOutcome::Started(DragItem::Task("x".into()))
        );
        controller.handle(DragEvent::KeyMove { direction: Direction::Left }, &mut state);
        controller.handle(DragEvent::KeyMove { direction: Direction::Up }, &mut state);

        let outcome = controller.handle(DragEvent::KeyConfirm, &mut state);
        assert!(matches!(outcome, DragOutcome::Committed(_)));
        assert_eq!(state.column_task_ids("C1"), vec!["t1", "x", "t2"]);
    }

    #[test]
    fn test_keyboard_cancel_leaves_board_alone() {
        let mut state = state();
        let mut controller = controller(&state);
        let before = state.snapshot();

        controller.handle(
            DragEvent::KeyActivate {
                item: DragItem::Task("t1".into()),
            },
            &mut state,
        );
        controller.handle(DragEvent::KeyMove { direction: Direction::Right }, &mut state);
        assert_eq!(controller.handle(DragEvent::KeyCancel, &mut state), DragOutcome::Abandoned);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_configured_activation_distance() {
        let mut state = state();
        let mut controller = DragController::new(&DragConfig {
            activation_distance: Some(20.0),
        });
        assert_eq!(controller.activation_distance(), 20.0);
        assert_eq!(DragController::default().activation_distance(), 8.0);

        controller.handle(down("t1", 50.0, 60.0), &mut state);
        assert_eq!(controller.handle(pointer_move(60.0, 70.0), &mut state), DragOutcome::Pressed);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_unknown_item_is_ignored() {
        let mut state = state();
        let mut controller = controller(&state);

        assert_eq!(controller.handle(down("ghost", 0.0, 0.0), &mut state), DragOutcome::Ignored);
        assert!(controller.is_idle());
    }

    #[test]
    fn test_task_deleted_mid_drag_is_unchanged() {
        let mut state = state();
        let mut controller = controller(&state);

        controller.handle(down("t1", 50.0, 60.0), &mut state);
        controller.handle(pointer_move(300.0, 300.0), &mut state);
        state.delete_task("t1");
        let revision = state.revision();

        assert_eq!(controller.handle(up(300.0, 300.0), &mut state), DragOutcome::Unchanged);
        assert_eq!(state.revision(), revision);
    }
}
