use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{TaskflowError, TaskflowResult};

const DEFAULT_COLUMN_NAME: &str = "New Column";
const DEFAULT_COLUMN_COLOR: &str = "bg-slate-500";
const DEFAULT_SORT: &str = "manual";
const DEFAULT_ACTIVATION_DISTANCE: f64 = 8.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub drag: DragConfig,
}

/// Defaults applied by the board store when it creates columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub default_column_name: Option<String>,
    #[serde(default)]
    pub default_column_color: Option<String>,
    /// One of `manual`, `priority`, `dueDate`, `createdDate`.
    #[serde(default)]
    pub default_sort: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Pointer travel (in pixels) before a press turns into a drag.
    #[serde(default)]
    pub activation_distance: Option<f64>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskflow/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("taskflow/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("taskflow\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load the user config, silently falling back to defaults.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(config) = Self::load_from(&config_path) {
                    return config;
                }
            }
        }
        Self::default()
    }

    /// Load a config file, reporting read and parse failures.
    pub fn load_from(path: &Path) -> TaskflowResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| TaskflowError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl BoardConfig {
    pub fn effective_column_name(&self) -> &str {
        self.default_column_name
            .as_deref()
            .unwrap_or(DEFAULT_COLUMN_NAME)
    }

    pub fn effective_column_color(&self) -> &str {
        self.default_column_color
            .as_deref()
            .unwrap_or(DEFAULT_COLUMN_COLOR)
    }

    pub fn effective_sort(&self) -> &str {
        self.default_sort.as_deref().unwrap_or(DEFAULT_SORT)
    }
}

impl DragConfig {
    pub fn effective_activation_distance(&self) -> f64 {
        match self.activation_distance {
            Some(distance) if distance.is_finite() && distance >= 0.0 => distance,
            _ => DEFAULT_ACTIVATION_DISTANCE,
        }
    }
}
