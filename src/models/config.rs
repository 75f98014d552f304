use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Date format used when the config does not set one
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Per-invocation settings loaded from `config.json` in the storage directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub storage_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    /// Hold an advisory lock on the storage directory during mutating commands
    #[serde(default = "default_lock_file")]
    pub lock_file: bool,
}

fn default_lock_file() -> bool {
    true
}

impl Config {
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
            default_project: None,
            date_format: None,
            editor: None,
            lock_file: default_lock_file(),
        }
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn date_format(&self) -> &str {
        self.date_format.as_deref().filter(|f| !f.is_empty()).unwrap_or(DEFAULT_DATE_FORMAT)
    }
}
