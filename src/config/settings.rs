use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::Config;

/// Name of the config file inside a storage directory
pub const CONFIG_FILENAME: &str = "config.json";

/// Environment variable consulted when the config has no default project
pub const DEFAULT_PROJECT_ENV: &str = "CK_DEFAULT_PROJECT";

pub fn config_file_path(storage_dir: &Path) -> PathBuf {
    storage_dir.join(CONFIG_FILENAME)
}

/// Load `config.json` from `storage_dir`
///
/// A missing file yields defaults. `storage_path` always reflects the
/// directory the config was loaded from, whatever the file says.
pub fn load_config(storage_dir: &Path) -> Result<Config> {
    let path = config_file_path(storage_dir);

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::new(storage_dir)),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read config file: {}", path.display()));
        }
    };

    let mut config: Config = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.storage_path = storage_dir.to_path_buf();

    Ok(config)
}

/// Write `config` to `config.json` in its storage directory
pub fn save_config(config: &Config) -> Result<()> {
    let dir = config.storage_path();
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create storage directory: {}", dir.display()))?;

    let path = config_file_path(dir);
    let mut json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    json.push('\n');
    fs::write(&path, json)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}

/// Project applied to new items when none is given on the command line
pub fn default_project(config: &Config) -> Option<String> {
    default_project_internal(config, env::var(DEFAULT_PROJECT_ENV).ok())
}

pub(crate) fn default_project_internal(config: &Config, env_value: Option<String>) -> Option<String> {
    config
        .default_project
        .clone()
        .filter(|p| !p.is_empty())
        .or_else(|| env_value.filter(|p| !p.is_empty()))
}
