use std::io::Write;
use std::path::{Path, PathBuf};

use taskflow_core::{Repository, TaskflowError, TaskflowResult};
use taskflow_domain::BoardSnapshot;

/// Board snapshot stored as one pretty-printed JSON file.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Repository<BoardSnapshot> for JsonFileRepository {
    fn load(&self) -> TaskflowResult<Option<BoardSnapshot>> {
        if !self.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&self.path)?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        let snapshot = serde_json::from_slice(&bytes).map_err(|e| {
            TaskflowError::Serialization(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &BoardSnapshot) -> TaskflowResult<()> {
        let json = snapshot
            .to_json_string()
            .map_err(|e| TaskflowError::Serialization(e.to_string()))?;
        write_atomic(&self.path, json.as_bytes())
    }
}

/// Write to a temp file in the same directory, then rename over `path`.
pub fn write_atomic(path: &Path, data: &[u8]) -> TaskflowResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(data)?;
    temp_file.flush()?;
    temp_file.persist(path).map_err(|e| TaskflowError::Io(e.error))?;

    tracing::debug!(
        "Atomically wrote {} bytes to {}",
        data.len(),
        path.display()
    );
    Ok(())
}
