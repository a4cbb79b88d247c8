use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(about = "Filter, sort and reorder a kanban board file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the board file (or set TASKFLOW_FILE env var)
    #[arg(value_name = "FILE", env = "TASKFLOW_FILE")]
    pub file: Option<String>,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new, empty board file
    Init {
        #[arg(long)]
        name: String,
    },
    /// Print the board as columns of visible tasks
    Show(ShowArgs),
    /// Column operations
    Column(ColumnCommand),
    /// Task operations
    Task(TaskCommand),
    /// Apply a JSON array of board commands
    Apply {
        /// Path to the commands file
        #[arg(value_name = "COMMANDS")]
        commands: PathBuf,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct ShowArgs {
    /// Case-insensitive title search
    #[arg(long)]
    pub search: Option<String>,
    /// Keep tasks with this status (repeatable)
    #[arg(long)]
    pub status: Vec<String>,
    /// Keep tasks with this priority (repeatable)
    #[arg(long)]
    pub priority: Vec<String>,
    /// Keep tasks assigned to this user id (repeatable)
    #[arg(long)]
    pub assignee: Vec<String>,
    /// Keep tasks carrying this label (repeatable)
    #[arg(long)]
    pub label: Vec<String>,
    /// manual, priority, due-date or created-date
    #[arg(long)]
    pub sort: Option<String>,
    /// Group visible tasks by status, priority, assignee or label
    #[arg(long)]
    pub group: Option<String>,
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Append a new column
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        wip_limit: Option<u32>,
    },
    /// Rename a column
    Rename {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
    },
    /// Change a column's color
    Color {
        #[arg(long)]
        id: String,
        #[arg(long)]
        color: String,
    },
    /// Set the advisory WIP limit (0 clears it)
    Wip {
        #[arg(long)]
        id: String,
        #[arg(long)]
        limit: u32,
    },
    /// Delete a column and all its tasks
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Move a column to a new index
    Move {
        #[arg(long)]
        id: String,
        #[arg(long)]
        index: usize,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the end of a column
    Add(TaskAddArgs),
    /// Get a task with its resolved assignees
    Get {
        #[arg(long)]
        id: String,
    },
    /// Move a task to an index in a column (end of column when omitted)
    Move {
        #[arg(long)]
        id: String,
        #[arg(long)]
        column_id: String,
        #[arg(long)]
        index: Option<usize>,
    },
    /// Drop a task over another task or a column
    Drop {
        #[arg(long)]
        id: String,
        /// Insert before this task
        #[arg(long, conflicts_with = "over_column", required_unless_present = "over_column")]
        over_task: Option<String>,
        /// Append to this column
        #[arg(long)]
        over_column: Option<String>,
    },
    /// Update task fields
    Update(TaskUpdateArgs),
    /// Delete a task
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Flip a subtask's completed flag
    ToggleSubtask {
        #[arg(long)]
        id: String,
        #[arg(long)]
        subtask_id: String,
    },
}

#[derive(Args)]
pub struct TaskAddArgs {
    #[arg(long)]
    pub column_id: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub due_date: Option<String>,
    #[arg(long)]
    pub assignee: Vec<String>,
    #[arg(long)]
    pub label: Vec<String>,
}

#[derive(Args)]
pub struct TaskUpdateArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub due_date: Option<String>,
    #[arg(long, conflicts_with = "due_date")]
    pub clear_due_date: bool,
    /// Replace assignees (repeatable)
    #[arg(long)]
    pub assignee: Vec<String>,
    /// Remove every assignee
    #[arg(long, conflicts_with = "assignee")]
    pub clear_assignees: bool,
    /// Replace labels (repeatable)
    #[arg(long)]
    pub label: Vec<String>,
}
