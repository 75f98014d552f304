//! The `ck` command-line interface
//!
//! [`commands`] holds the clap definitions and dispatch, [`handlers`] one
//! function per subcommand. Handlers open a [`workspace::Workspace`] (storage
//! directory, config and loaded store), do their work through the
//! [`ItemStore`](crate::storage::ItemStore) trait, and return `anyhow` errors
//! for `main` to print. [`sync`] exports active items as agent rule files.

pub mod commands;
pub mod handlers;
pub mod select;
pub mod sync;
pub mod workspace;

pub use commands::{Cli, Commands, run};
