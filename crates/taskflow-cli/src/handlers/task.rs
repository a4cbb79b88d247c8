use serde::Serialize;
use taskflow_domain::{
    BoardCommand, DropTarget, FieldUpdate, Label, Task, TaskPriority, TaskStatus, TaskUpdate, User,
};

use super::{parse_datetime, parse_value};
use crate::cli::{TaskAction, TaskAddArgs, TaskUpdateArgs};
use crate::context::CliContext;
use crate::output;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskDetail<'a> {
    task: &'a Task,
    assignees: Vec<&'a User>,
    subtasks_completed: usize,
    subtasks_total: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveResult<'a> {
    task: &'a Task,
    changed: bool,
    column_order: Vec<String>,
}

pub fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Add(args) => {
            require_column(ctx, &args.column_id)?;
            let update = build_task_update_from_add(&args)?;
            let id = ctx.mutate(|state| {
                let id = state.add_task(&args.column_id, args.title.clone());
                if let Some(id) = &id {
                    state.update_task(id, update);
                }
                id
            })?;
            let id = id.ok_or_else(|| anyhow::anyhow!("Column not found: {}", args.column_id))?;
            output_task(ctx, &id)
        }
        TaskAction::Get { id } => {
            let task = find_task(ctx, &id)?;
            let (completed, total) = task.subtask_progress();
            output::output_success(TaskDetail {
                task,
                assignees: ctx.state.users().assignees_of(task),
                subtasks_completed: completed,
                subtasks_total: total,
            })
        }
        TaskAction::Move {
            id,
            column_id,
            index,
        } => {
            find_task(ctx, &id)?;
            require_column(ctx, &column_id)?;
            let target_index = index.unwrap_or_else(|| ctx.state.column_task_count(&column_id));
            let changed = ctx.execute(&BoardCommand::MoveTask {
                task_id: id.clone(),
                target_column_id: column_id,
                target_index,
            })?;
            output_move(ctx, &id, changed)
        }
        TaskAction::Drop {
            id,
            over_task,
            over_column,
        } => {
            find_task(ctx, &id)?;
            let target = match (over_task, over_column) {
                (Some(task_id), _) => DropTarget::Task(task_id),
                (None, Some(column_id)) => DropTarget::Column(column_id),
                (None, None) => anyhow::bail!("--over-task or --over-column is required"),
            };
            if ctx.state.resolve_drop(&target).is_none() {
                anyhow::bail!("Drop target not found: {:?}", target);
            }
            let changed = ctx.mutate(|state| state.move_task_to(&id, &target))?;
            output_move(ctx, &id, changed)
        }
        TaskAction::Update(args) => {
            find_task(ctx, &args.id)?;
            let update = build_task_update(&args)?;
            if update.is_empty() {
                anyhow::bail!("No fields to update");
            }
            ctx.execute(&BoardCommand::UpdateTask {
                task_id: args.id.clone(),
                update,
            })?;
            output_task(ctx, &args.id)
        }
        TaskAction::Delete { id } => {
            find_task(ctx, &id)?;
            ctx.execute(&BoardCommand::DeleteTask {
                task_id: id.clone(),
            })?;
            output::output_success(serde_json::json!({ "deleted": id }))
        }
        TaskAction::ToggleSubtask { id, subtask_id } => {
            find_task(ctx, &id)?;
            let changed = ctx.execute(&BoardCommand::ToggleSubtask {
                task_id: id.clone(),
                subtask_id: subtask_id.clone(),
            })?;
            if !changed {
                anyhow::bail!("Subtask not found: {}", subtask_id);
            }
            output_task(ctx, &id)
        }
    }
}

fn find_task<'a>(ctx: &'a CliContext, id: &str) -> anyhow::Result<&'a Task> {
    ctx.state
        .task(id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))
}

fn require_column(ctx: &CliContext, id: &str) -> anyhow::Result<()> {
    if ctx.state.has_column(id) {
        Ok(())
    } else {
        anyhow::bail!("Column not found: {}", id)
    }
}

fn output_task(ctx: &CliContext, id: &str) -> anyhow::Result<()> {
    output::output_success(find_task(ctx, id)?)
}

fn output_move(ctx: &CliContext, id: &str, changed: bool) -> anyhow::Result<()> {
    let task = find_task(ctx, id)?;
    output::output_success(MoveResult {
        task,
        changed,
        column_order: ctx.state.column_task_ids(&task.column_id),
    })
}

fn build_task_update_from_add(args: &TaskAddArgs) -> anyhow::Result<TaskUpdate> {
    Ok(TaskUpdate {
        title: None,
        description: args.description.clone(),
        status: parse_optional("status", args.status.as_deref())?,
        priority: parse_optional("priority", args.priority.as_deref())?,
        assignees: non_empty(&args.assignee),
        labels: non_empty(&args.label).map(into_labels),
        due_date: match &args.due_date {
            Some(d) => FieldUpdate::Set(parse_datetime(d)?),
            None => FieldUpdate::NoChange,
        },
    })
}

fn build_task_update(args: &TaskUpdateArgs) -> anyhow::Result<TaskUpdate> {
    let assignees = if args.clear_assignees {
        Some(Vec::new())
    } else {
        non_empty(&args.assignee)
    };
    Ok(TaskUpdate {
        title: args.title.clone(),
        description: args.description.clone(),
        status: parse_optional::<TaskStatus>("status", args.status.as_deref())?,
        priority: parse_optional::<TaskPriority>("priority", args.priority.as_deref())?,
        assignees,
        labels: non_empty(&args.label).map(into_labels),
        due_date: if args.clear_due_date {
            FieldUpdate::Clear
        } else {
            match &args.due_date {
                Some(d) => FieldUpdate::Set(parse_datetime(d)?),
                None => FieldUpdate::NoChange,
            }
        },
    })
}

fn parse_optional<T>(flag: &str, value: Option<&str>) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    value.map(|v| parse_value(flag, v)).transpose()
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

fn into_labels(names: Vec<String>) -> Vec<Label> {
    names.into_iter().map(Label::plain).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update_args(id: &str) -> TaskUpdateArgs {
        TaskUpdateArgs {
            id: id.into(),
            title: None,
            description: None,
            priority: None,
            status: None,
            due_date: None,
            clear_due_date: false,
            assignee: Vec::new(),
            clear_assignees: false,
            label: Vec::new(),
        }
    }

    #[test]
    fn test_empty_update_args() {
        let update = build_task_update(&update_args("t")).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_update_args_clear_flags() {
        let mut args = update_args("t");
        args.clear_due_date = true;
        args.clear_assignees = true;

        let update = build_task_update(&args).unwrap();
        assert_eq!(update.due_date, FieldUpdate::Clear);
        assert_eq!(update.assignees, Some(Vec::new()));
    }

    #[test]
    fn test_update_args_parse_values() {
        let mut args = update_args("t");
        args.priority = Some("high".into());
        args.status = Some("done".into());
        args.label = vec!["bug".into()];

        let update = build_task_update(&args).unwrap();
        assert_eq!(update.priority, Some(TaskPriority::High));
        assert_eq!(update.status, Some(TaskStatus::Done));
        assert_eq!(update.labels, Some(vec![Label::plain("bug")]));
    }
}
