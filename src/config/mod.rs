//! Storage location discovery and per-invocation configuration
//!
//! Configuration is an explicit [`Config`](crate::models::Config) value built
//! once per command and passed down; nothing here keeps global state.

pub mod finder;
pub mod settings;

pub use finder::{CONTEXT_DIR_NAME, Finder, STORAGE_PATH_ENV, global_default};
pub use settings::{
    CONFIG_FILENAME, DEFAULT_PROJECT_ENV, config_file_path, default_project, load_config,
    save_config,
};
