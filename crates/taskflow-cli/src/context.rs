use std::path::Path;

use taskflow_core::{AppConfig, Repository, TaskflowResult};
use taskflow_domain::{Board, BoardSnapshot, BoardState, Command, SortKey};

use crate::json_store::JsonFileRepository;

/// An open board plus the repository it is written back to.
///
/// Every mutation goes through [`CliContext::mutate`], which saves the
/// canonical snapshot only when the board revision moved.
pub struct CliContext<R: Repository<BoardSnapshot> = JsonFileRepository> {
    pub state: BoardState,
    pub config: AppConfig,
    repo: R,
}

impl CliContext<JsonFileRepository> {
    /// Open a board file. A missing file starts an empty board named after it.
    pub fn open(file_path: &str, config: AppConfig) -> TaskflowResult<Self> {
        let name = Path::new(file_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Board")
            .to_string();
        Self::with_repository(JsonFileRepository::new(file_path), config, &name)
    }
}

impl<R: Repository<BoardSnapshot>> CliContext<R> {
    pub fn with_repository(repo: R, config: AppConfig, default_name: &str) -> TaskflowResult<Self> {
        let snapshot = match repo.load()? {
            Some(snapshot) => snapshot,
            None => BoardSnapshot::new(Board::new(default_name.to_string())),
        };
        let state = BoardState::from_snapshot(snapshot, config.board.clone())?;
        Ok(Self {
            state,
            config,
            repo,
        })
    }

    /// Run `f` against the board and persist if it committed anything.
    pub fn mutate<T, F>(&mut self, f: F) -> TaskflowResult<T>
    where
        F: FnOnce(&mut BoardState) -> T,
    {
        let before = self.state.revision();
        let result = f(&mut self.state);
        if self.state.revision() != before {
            self.save()?;
        }
        Ok(result)
    }

    pub fn execute(&mut self, command: &impl Command) -> TaskflowResult<bool> {
        self.mutate(|state| command.execute(state))
    }

    pub fn save(&self) -> TaskflowResult<()> {
        tracing::debug!(revision = self.state.revision(), "saving board");
        self.repo.save(&self.state.snapshot())
    }

    /// Sort key from configuration, falling back to manual order.
    pub fn default_sort(&self) -> SortKey {
        self.config
            .board
            .effective_sort()
            .parse()
            .unwrap_or_default()
    }
}
