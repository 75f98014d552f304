//! Data models for contextkeeper.
//!
//! - [`ContextItem`] - A single note persisted in `items.json`
//! - [`Config`] - Per-invocation settings read from `config.json`
//!
//! Both use serde for JSON (de)serialization. Optional item fields are omitted
//! from the file when empty so hand-edited files stay small.

pub mod config;
pub mod item;

pub use config::{Config, DEFAULT_DATE_FORMAT};
pub use item::{ContextItem, SHORT_ID_LEN};
