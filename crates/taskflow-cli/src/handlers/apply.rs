use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use taskflow_domain::{BoardCommand, Command};

use crate::context::CliContext;
use crate::output;

#[derive(Serialize)]
struct CommandResult {
    description: String,
    changed: bool,
}

#[derive(Serialize)]
struct ApplyResult {
    applied: usize,
    changed: usize,
    revision: u64,
    results: Vec<CommandResult>,
}

/// Run every command in the file in order. The board is saved once, and
/// only when at least one command changed it.
pub fn handle(ctx: &mut CliContext, commands_path: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(commands_path)
        .with_context(|| format!("Failed to read {}", commands_path.display()))?;
    let commands: Vec<BoardCommand> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid commands in {}", commands_path.display()))?;

    let results: Vec<CommandResult> = ctx.mutate(|state| {
        commands
            .iter()
            .map(|command| CommandResult {
                description: command.description(),
                changed: command.execute(state),
            })
            .collect()
    })?;

    tracing::info!(
        "Applied {} command(s) from {}",
        results.len(),
        commands_path.display()
    );
    output::output_success(ApplyResult {
        applied: results.len(),
        changed: results.iter().filter(|r| r.changed).count(),
        revision: ctx.state.revision(),
        results,
    })
}
