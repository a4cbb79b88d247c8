mod cli;
mod context;
mod handlers;
mod json_store;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use taskflow_core::AppConfig;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        output::output_error(&format!("{:#}", err));
    }
}

fn run() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "taskflow", &mut std::io::stdout());
        return Ok(());
    }

    let file_path = cli
        .file
        .ok_or_else(|| anyhow::anyhow!("FILE is required (or set TASKFLOW_FILE)"))?;

    if let Commands::Init { name } = cli.command {
        return handlers::board::init(&file_path, name);
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    let mut ctx = CliContext::open(&file_path, config)?;

    match cli.command {
        Commands::Show(args) => handlers::board::show(&ctx, args)?,
        Commands::Column(column_cmd) => handlers::column::handle(&mut ctx, column_cmd.action)?,
        Commands::Task(task_cmd) => handlers::task::handle(&mut ctx, task_cmd.action)?,
        Commands::Apply { commands } => handlers::apply::handle(&mut ctx, &commands)?,
        Commands::Init { .. } | Commands::Completions { .. } => {}
    }

    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TASKFLOW_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(log_file)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
