use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of id characters shown to users in listings and messages
pub const SHORT_ID_LEN: usize = 8;

/// A single note stored in the item file
///
/// `completed_at` and `archived` are independent: an item may be archived
/// while still active, completed without being archived, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextItem {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
}

impl ContextItem {
    /// Create an active, unarchived item with a fresh v4 id
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_id(crate::utils::generate_id(), content)
    }

    /// Create an item with a caller-supplied id
    pub fn with_id(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            project: String::new(),
            tags: Vec::new(),
            created_at: Utc::now(),
            completed_at: None,
            archived: false,
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    /// First [`SHORT_ID_LEN`] characters of the id, or the whole id if shorter
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(SHORT_ID_LEN) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }

    pub fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.completed_at = Some(at);
    }

    pub fn reopen(&mut self) {
        self.completed_at = None;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
