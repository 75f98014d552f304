//! ContextKeeper - keep notes, tasks and context next to your projects
//!
//! Items live in a JSON file inside a storage directory, usually a
//! `.contextkeeper` folder in the project tree. This library provides:
//!
//! - A thread-safe, write-through item store with short-id prefix lookup
//! - Storage directory discovery and per-directory configuration
//! - A small `field:value` filter language for listings
//! - Formatting helpers shared by the `ck` command-line tool
//!
//! # Example
//!
//! ```no_run
//! use contextkeeper::{ContextItem, ItemStore, JsonFileStore};
//!
//! let store = JsonFileStore::new("/home/alice/project/.contextkeeper");
//! store.load()?;
//!
//! let item = ContextItem::new("Remember to update documentation").with_project("docs");
//! let id = item.id.clone();
//! store.add(item)?;
//!
//! // Any unique prefix works, like a short git hash
//! let found = store.get_by_prefix(&id[..8])?;
//! store.archive(&found.id)?;
//! # Ok::<(), contextkeeper::StoreError>(())
//! ```

pub mod cli;
pub mod config;
pub mod filters;
pub mod models;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Finder;
pub use filters::{FilterExpr, apply_filters, parse_filter};
pub use models::{Config, ContextItem};
pub use storage::{ItemStore, JsonFileStore, StoreError, StoreLock, StoreResult};
