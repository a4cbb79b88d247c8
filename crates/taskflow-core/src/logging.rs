use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A committed change, tagged with the revision it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub revision: u64,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    pub fn new(revision: u64, message: impl Into<String>) -> Self {
        Self {
            revision,
            timestamp: Utc::now(),
            message: message.into(),
        }
    }
}

/// Anything that keeps an append-only activity log.
pub trait Loggable {
    fn add_log(&mut self, message: String);
    fn get_logs(&self) -> &[LogEntry];

    fn last_log(&self) -> Option<&LogEntry> {
        self.get_logs().last()
    }
}
