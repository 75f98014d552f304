use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};

use crate::config::{Finder, load_config};
use crate::models::{Config, ContextItem};
use crate::storage::{ItemStore, JsonFileStore, StoreError, StoreLock};
use crate::utils::format_ambiguous_matches;

// Long enough to outlast another ck process finishing a write
const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Storage directory, config and loaded store for one command
pub struct Workspace {
    pub dir: PathBuf,
    pub config: Config,
    pub store: JsonFileStore,
    // Held until the command finishes
    lock: Option<StoreLock>,
}

impl Workspace {
    /// Open for reading
    pub fn open(explicit: Option<&Path>) -> Result<Self> {
        Self::open_with(explicit, false)
    }

    /// Open for a command that writes; holds the advisory lock when enabled
    pub fn open_for_write(explicit: Option<&Path>) -> Result<Self> {
        Self::open_with(explicit, true)
    }

    fn open_with(explicit: Option<&Path>, write: bool) -> Result<Self> {
        let dir = Finder::from_env()?.find_storage_path(explicit)?;
        let config = load_config_or_default(&dir);

        let lock = if write && config.lock_file { Some(acquire_lock(&dir)?) } else { None };

        let store = JsonFileStore::new(&dir);
        store.load().context("Failed to load storage")?;

        Ok(Self { dir, config, store, lock })
    }

    /// Upgrade a read workspace before writing
    ///
    /// Takes the advisory lock when enabled and reloads the items, so the
    /// write starts from what is on disk now rather than at open time.
    pub fn lock_for_write(&mut self) -> Result<()> {
        if self.config.lock_file && self.lock.is_none() {
            self.lock = Some(acquire_lock(&self.dir)?);
        }
        self.store.load().context("Failed to load storage")?;
        Ok(())
    }

    /// Resolve an id or prefix, listing candidates on stderr when ambiguous
    pub fn resolve(&self, id: &str, command: &str) -> Result<ContextItem> {
        match self.store.resolve(id) {
            Ok(item) => Ok(item),
            Err(err @ StoreError::AmbiguousId { .. }) => {
                let matches = self.store.find_by_prefix(id);
                eprint!("{}", format_ambiguous_matches(id, &matches, command));
                Err(anyhow!(err))
            }
            Err(err) => Err(anyhow!(err)),
        }
    }
}

fn acquire_lock(dir: &Path) -> Result<StoreLock> {
    StoreLock::acquire_timeout(dir, LOCK_TIMEOUT)
        .with_context(|| format!("Failed to lock storage: {}", dir.display()))
}

/// A broken config file should not lock the user out of their items
fn load_config_or_default(dir: &Path) -> Config {
    match load_config(dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {:#}; using defaults", e);
            Config::new(dir)
        }
    }
}
