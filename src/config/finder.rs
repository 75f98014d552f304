use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::storage::storage_dir;

/// Directory name that marks a repository-local store
pub const CONTEXT_DIR_NAME: &str = ".contextkeeper";

/// Environment variable that overrides storage directory discovery
pub const STORAGE_PATH_ENV: &str = "CK_STORAGE_PATH";

// Parent directories searched above the start directory
const MAX_PARENT_LEVELS: usize = 10;

/// Locates the storage directory for an invocation
///
/// Priority order:
/// 1. Explicit path (`--path`)
/// 2. `CK_STORAGE_PATH`
/// 3. `.contextkeeper` in the start directory
/// 4. `.contextkeeper` in up to 10 parent directories
/// 5. The platform data directory (`~/.local/share/contextkeeper` on Linux)
#[derive(Debug, Clone)]
pub struct Finder {
    start_dir: PathBuf,
    env_override: Option<PathBuf>,
}

impl Finder {
    /// Finder rooted at `start_dir` that ignores the environment
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self { start_dir: start_dir.into(), env_override: None }
    }

    /// Finder rooted at the current directory, honouring `CK_STORAGE_PATH`
    pub fn from_env() -> Result<Self> {
        let cwd = env::current_dir().context("Failed to determine current directory")?;
        let env_override = env::var_os(STORAGE_PATH_ENV).filter(|v| !v.is_empty()).map(PathBuf::from);
        Ok(Self { start_dir: cwd, env_override })
    }

    pub fn with_env_override(mut self, path: Option<PathBuf>) -> Self {
        self.env_override = path;
        self
    }

    /// Storage directory for this invocation
    ///
    /// Explicit and environment paths may name the item file itself; the
    /// directory holding it is returned.
    pub fn find_storage_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(storage_dir(path));
        }

        if let Some(path) = &self.env_override {
            return Ok(storage_dir(path));
        }

        if let Some(local) = self.find_local_context() {
            return Ok(local);
        }

        global_default()
    }

    /// Nearest `.contextkeeper` directory at or above the start directory
    pub fn find_local_context(&self) -> Option<PathBuf> {
        self.start_dir
            .ancestors()
            .take(MAX_PARENT_LEVELS + 1)
            .map(|dir| dir.join(CONTEXT_DIR_NAME))
            .find(|candidate| candidate.is_dir())
    }
}

/// Platform-specific fallback storage directory
pub fn global_default() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join("contextkeeper"))
}
