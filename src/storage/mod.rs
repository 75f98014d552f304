//! File-backed item store
//!
//! Items live in a single `items.json` file (a JSON array) inside a storage
//! directory. [`JsonFileStore`] keeps the full list in memory and rewrites the
//! file on every mutation before returning (write-through, no buffering).
//!
//! # Error Handling Strategy
//!
//! Unlike the command layer, the store returns a typed [`StoreError`] so callers
//! can tell "nothing matched" ([`StoreError::ItemNotFound`]) from "be more
//! specific" ([`StoreError::AmbiguousId`]). The store never logs, retries, or
//! prompts; I/O and decode failures carry the operation and file path.
//!
//! # Concurrency
//!
//! Reads share a lock; loads and mutations take it exclusively for both the
//! in-memory change and the file write. Cross-process writers are not
//! coordinated unless they hold a [`StoreLock`].

pub mod error;
pub mod lock;
pub mod persistence;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use lock::{LOCK_FILENAME, StoreLock};
pub use persistence::{ITEMS_FILENAME, items_file_path, read_items, storage_dir, write_items};
pub use store::{ItemStore, JsonFileStore};
