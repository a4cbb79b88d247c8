use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskflowError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Config error in {path}: {message}")]
    Config { path: String, message: String },
}

impl TaskflowError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TaskflowError = io.into();
        assert!(matches!(err, TaskflowError::Io(_)));
        assert_eq!(err.to_string(), "IO error: missing");
    }

    #[test]
    fn test_config_error_message() {
        let err = TaskflowError::Config {
            path: "/tmp/config.toml".to_string(),
            message: "expected a table".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Config error in /tmp/config.toml: expected a table"
        );
    }
}
