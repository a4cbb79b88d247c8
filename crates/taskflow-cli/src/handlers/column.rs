use serde::Serialize;
use taskflow_domain::{BoardCommand, Column};

use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::output;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnSummary<'a> {
    #[serde(flatten)]
    column: &'a Column,
    task_count: usize,
    over_wip_limit: bool,
}

pub fn handle(ctx: &mut CliContext, action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::Add {
            name,
            color,
            wip_limit,
        } => {
            if let Some(name) = &name {
                require_name(name)?;
            }
            let id = ctx.mutate(|state| {
                let id = state.add_column();
                if let Some(name) = name {
                    state.rename_column(&id, name.trim());
                }
                if let Some(color) = color {
                    state.set_column_color(&id, color);
                }
                if wip_limit.is_some() {
                    state.set_column_wip_limit(&id, wip_limit);
                }
                id
            })?;
            output_column(ctx, &id)
        }
        ColumnAction::Rename { id, name } => {
            require_column(ctx, &id)?;
            require_name(&name)?;
            ctx.execute(&BoardCommand::RenameColumn {
                column_id: id.clone(),
                name: name.trim().to_string(),
            })?;
            output_column(ctx, &id)
        }
        ColumnAction::Color { id, color } => {
            require_column(ctx, &id)?;
            ctx.execute(&BoardCommand::SetColumnColor {
                column_id: id.clone(),
                color,
            })?;
            output_column(ctx, &id)
        }
        ColumnAction::Wip { id, limit } => {
            require_column(ctx, &id)?;
            ctx.execute(&BoardCommand::SetColumnWipLimit {
                column_id: id.clone(),
                limit: Some(limit),
            })?;
            output_column(ctx, &id)
        }
        ColumnAction::Delete { id } => {
            require_column(ctx, &id)?;
            let removed = ctx.state.column_task_count(&id);
            ctx.execute(&BoardCommand::DeleteColumn {
                column_id: id.clone(),
            })?;
            output::output_success(serde_json::json!({
                "deleted": id,
                "removedTasks": removed,
            }))
        }
        ColumnAction::Move { id, index } => {
            require_column(ctx, &id)?;
            ctx.execute(&BoardCommand::MoveColumn {
                column_id: id,
                target_index: index,
            })?;
            let columns: Vec<ColumnSummary> = ctx
                .state
                .columns()
                .iter()
                .map(|column| summarize(ctx, column))
                .collect();
            output::output_success(columns)
        }
    }
}

fn require_column(ctx: &CliContext, id: &str) -> anyhow::Result<()> {
    if ctx.state.has_column(id) {
        Ok(())
    } else {
        anyhow::bail!("Column not found: {}", id)
    }
}

fn require_name(name: &str) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Column name cannot be empty");
    }
    Ok(())
}

fn summarize<'a>(ctx: &'a CliContext, column: &'a Column) -> ColumnSummary<'a> {
    ColumnSummary {
        column,
        task_count: ctx.state.column_task_count(&column.id),
        over_wip_limit: ctx.state.is_over_wip_limit(&column.id),
    }
}

fn output_column(ctx: &CliContext, id: &str) -> anyhow::Result<()> {
    let column = ctx
        .state
        .column(id)
        .ok_or_else(|| anyhow::anyhow!("Column not found: {}", id))?;
    output::output_success(summarize(ctx, column))
}
