//! Property-based tests for the board state store and the filter/sort engines.

use proptest::prelude::*;
use std::collections::HashSet;
use taskflow_core::BoardConfig;
use taskflow_domain::{
    apply_filters, sorted, Board, BoardSnapshot, BoardState, Column, SortKey, Task, TaskFilters,
    TaskPriority, TaskStatus,
};

#[derive(Debug, Clone)]
enum Op {
    MoveTask { task: usize, column: usize, index: usize },
    AddTask { column: usize },
    DeleteColumn { column: usize },
    AddColumn,
    MoveColumn { column: usize, index: usize },
    DeleteTask { task: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (any::<usize>(), any::<usize>(), 0usize..12)
            .prop_map(|(task, column, index)| Op::MoveTask { task, column, index }),
        3 => any::<usize>().prop_map(|column| Op::AddTask { column }),
        1 => any::<usize>().prop_map(|column| Op::DeleteColumn { column }),
        1 => Just(Op::AddColumn),
        2 => (any::<usize>(), 0usize..8)
            .prop_map(|(column, index)| Op::MoveColumn { column, index }),
        1 => any::<usize>().prop_map(|task| Op::DeleteTask { task }),
    ]
}

fn priority() -> impl Strategy<Value = TaskPriority> {
    prop::sample::select(TaskPriority::ALL.to_vec())
}

fn status() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(TaskStatus::ALL.to_vec())
}

/// Column sizes for the starting board.
fn layout() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..5, 1..5)
}

fn build(sizes: &[usize]) -> BoardState {
    let board = Board::new("Props".into());
    let mut columns = Vec::new();
    let mut tasks = Vec::new();
    for (c, size) in sizes.iter().enumerate() {
        let column = Column::new(format!("C{}", c), String::new(), c as i32);
        for p in 0..*size {
            tasks.push(Task::new(
                board.id.clone(),
                column.id.clone(),
                format!("t{}-{}", c, p),
                p as i32,
            ));
        }
        columns.push(column);
    }
    BoardState::from_snapshot(
        BoardSnapshot::from_data(board, columns, tasks),
        BoardConfig::default(),
    )
    .unwrap()
}

fn run(state: &mut BoardState, op: &Op) {
    let column_ids: Vec<String> = state.columns().iter().map(|c| c.id.clone()).collect();
    let task_ids: Vec<String> = state.tasks().iter().map(|t| t.id.clone()).collect();
    let pick_column = |i: usize| column_ids.get(i % column_ids.len().max(1)).cloned();
    let pick_task = |i: usize| task_ids.get(i % task_ids.len().max(1)).cloned();

    match *op {
        Op::MoveTask { task, column, index } => {
            if let (Some(task), Some(column)) = (pick_task(task), pick_column(column)) {
                state.move_task(&task, &column, index);
            }
        }
        Op::AddTask { column } => {
            if let Some(column) = pick_column(column) {
                state.add_task(&column, "new");
            }
        }
        Op::DeleteColumn { column } => {
            if let Some(column) = pick_column(column) {
                state.delete_column(&column);
            }
        }
        Op::AddColumn => {
            state.add_column();
        }
        Op::MoveColumn { column, index } => {
            if let Some(column) = pick_column(column) {
                state.move_column(&column, index);
            }
        }
        Op::DeleteTask { task } => {
            if let Some(task) = pick_task(task) {
                state.delete_task(&task);
            }
        }
    }
}

fn assert_task_positions_contiguous(state: &BoardState) {
    for column in state.columns() {
        let positions: Vec<i32> = state
            .column_tasks(&column.id)
            .iter()
            .map(|t| t.position)
            .collect();
        let expected: Vec<i32> = (0..positions.len() as i32).collect();
        assert_eq!(positions, expected, "column {}", column.name);
    }
}

fn assert_single_ownership(state: &BoardState) {
    let mut seen = HashSet::new();
    for column in state.columns() {
        for id in state.column_task_ids(&column.id) {
            assert!(seen.insert(id.clone()), "task {} listed twice", id);
        }
    }
    assert_eq!(seen.len(), state.tasks().len(), "orphaned task");
}

proptest! {
    /// Task positions stay 0..n per column under any mutation sequence.
    #[test]
    fn prop_task_positions_stay_contiguous(
        sizes in layout(),
        ops in prop::collection::vec(op(), 0..40)
    ) {
        let mut state = build(&sizes);
        for op in &ops {
            run(&mut state, op);
            assert_task_positions_contiguous(&state);
        }
    }

    /// Column positions form a permutation of 0..n after column moves.
    #[test]
    fn prop_column_moves_keep_total_order(
        sizes in layout(),
        moves in prop::collection::vec((any::<usize>(), 0usize..8), 0..20)
    ) {
        let mut state = build(&sizes);
        for (column, index) in moves {
            run(&mut state, &Op::MoveColumn { column, index });
        }
        let positions: Vec<i32> = state.columns().iter().map(|c| c.position).collect();
        let expected: Vec<i32> = (0..sizes.len() as i32).collect();
        prop_assert_eq!(positions, expected);
    }

    /// Every task is listed by exactly one column.
    #[test]
    fn prop_single_ownership(
        sizes in layout(),
        ops in prop::collection::vec(op(), 0..40)
    ) {
        let mut state = build(&sizes);
        for op in &ops {
            run(&mut state, op);
        }
        assert_single_ownership(&state);
        for task in state.tasks() {
            prop_assert!(state.has_column(&task.column_id));
        }
    }

    /// Moves never create or lose tasks.
    #[test]
    fn prop_moves_conserve_tasks(
        sizes in layout(),
        moves in prop::collection::vec((any::<usize>(), any::<usize>(), 0usize..12), 0..30)
    ) {
        let mut state = build(&sizes);
        let before: HashSet<String> = state.tasks().iter().map(|t| t.id.clone()).collect();
        for (task, column, index) in moves {
            run(&mut state, &Op::MoveTask { task, column, index });
        }
        let after: HashSet<String> = state.tasks().iter().map(|t| t.id.clone()).collect();
        prop_assert_eq!(before, after);
    }

    /// Filtering twice equals filtering once; empty filters are the identity.
    #[test]
    fn prop_filter_idempotent(
        attrs in prop::collection::vec((priority(), status()), 0..20),
        wanted in prop::collection::btree_set(priority(), 0..3),
        wanted_status in prop::collection::btree_set(status(), 0..3),
    ) {
        let tasks: Vec<Task> = attrs
            .iter()
            .enumerate()
            .map(|(i, (priority, status))| {
                let mut task = Task::new("b".into(), "c".into(), format!("task {}", i), i as i32);
                task.priority = *priority;
                task.status = *status;
                task
            })
            .collect();

        let identity = apply_filters(&tasks, &TaskFilters::default());
        prop_assert_eq!(identity.len(), tasks.len());
        prop_assert!(identity.iter().zip(&tasks).all(|(a, b)| a.id == b.id));

        let filters = TaskFilters {
            priorities: wanted,
            statuses: wanted_status,
            ..TaskFilters::default()
        };
        let once = apply_filters(&tasks, &filters);
        let twice = apply_filters(once.iter().copied(), &filters);
        prop_assert_eq!(&once, &twice);
    }

    /// Tasks equal under the sort key keep their relative order.
    #[test]
    fn prop_sort_is_stable(priorities in prop::collection::vec(priority(), 0..30)) {
        let tasks: Vec<Task> = priorities
            .iter()
            .enumerate()
            .map(|(i, priority)| {
                let mut task = Task::new("b".into(), "c".into(), format!("{}", i), i as i32);
                task.priority = *priority;
                task
            })
            .collect();
        let refs: Vec<&Task> = tasks.iter().collect();

        let result = sorted(&refs, SortKey::Priority);
        prop_assert_eq!(result.len(), tasks.len());
        for pair in result.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.priority.rank() <= b.priority.rank());
            if a.priority == b.priority {
                prop_assert!(a.position < b.position);
            }
        }
    }
}

#[test]
fn delete_column_removes_its_tasks_only() {
    let mut state = build(&[1, 3, 2]);
    let doomed = state.columns()[1].id.clone();
    let survivors: Vec<(String, i32)> = state
        .columns()
        .iter()
        .filter(|c| c.id != doomed)
        .map(|c| (c.id.clone(), c.position))
        .collect();

    assert!(state.delete_column(&doomed));

    assert_eq!(state.tasks().len(), 3);
    assert!(state.column(&doomed).is_none());
    for (id, position) in survivors {
        assert_eq!(state.column(&id).unwrap().position, position);
    }
}
