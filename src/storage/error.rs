use std::io;
use std::path::PathBuf;

/// Errors returned by item store operations
///
/// `ItemNotFound` and `AmbiguousId` are the sentinels callers match on to
/// decide between "nothing matched" and "ask the user for more characters".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("ambiguous ID: {} items match '{prefix}'", .matches.len())]
    AmbiguousId { prefix: String, matches: Vec<String> },

    #[error("item already exists: {0}")]
    DuplicateId(String),

    #[error("failed to {op} {}", .path.display())]
    Io { op: &'static str, path: PathBuf, source: io::Error },

    #[error("failed to decode storage file {}", .path.display())]
    Decode { path: PathBuf, source: serde_json::Error },

    #[error("failed to encode items as JSON")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { op, path: path.into(), source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ItemNotFound(_))
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::AmbiguousId { .. })
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
