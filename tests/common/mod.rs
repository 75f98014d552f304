//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use contextkeeper::ContextItem;
use tempfile::TempDir;

/// Builder for storage directories with a pre-written items.json
pub struct StoreDirBuilder {
    temp_dir: TempDir,
    items: Vec<ContextItem>,
    config: Option<String>,
}

impl StoreDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, items: Vec::new(), config: None }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn with_item(mut self, item: ItemBuilder) -> Self {
        self.items.push(item.build());
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = ItemBuilder>) -> Self {
        self.items.extend(items.into_iter().map(ItemBuilder::build));
        self
    }

    /// Raw config.json contents
    pub fn with_config(mut self, json: &str) -> Self {
        self.config = Some(json.to_string());
        self
    }

    /// Write files and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        let json = serde_json::to_string_pretty(&self.items).expect("Failed to encode items");
        fs::write(self.temp_dir.path().join("items.json"), json + "\n")
            .expect("Failed to write items.json");

        if let Some(config) = &self.config {
            fs::write(self.temp_dir.path().join("config.json"), config)
                .expect("Failed to write config.json");
        }

        self.temp_dir
    }
}

impl Default for StoreDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for context items with fixed, readable defaults
pub struct ItemBuilder {
    id: String,
    content: String,
    project: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    archived: bool,
}

impl ItemBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            content: format!("Item {}", id),
            project: String::new(),
            tags: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
            completed_at: None,
            archived: false,
        }
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn project(mut self, project: &str) -> Self {
        self.project = project.to_string();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn created(mut self, y: i32, m: u32, d: u32) -> Self {
        self.created_at = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed_at = Some(self.created_at + chrono::Duration::hours(1));
        self
    }

    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    pub fn build(self) -> ContextItem {
        let mut item = ContextItem::with_id(self.id, self.content)
            .with_project(self.project)
            .with_tags(self.tags);
        item.created_at = self.created_at;
        item.completed_at = self.completed_at;
        item.archived = self.archived;
        item
    }
}

/// Full-length ids that share a prefix, for ambiguity tests
pub fn uuid_with_prefix(prefix: &str, n: u32) -> String {
    let tail = format!("{:08x}-0000-4000-8000-{:012x}", n, n);
    format!("{}{}", prefix, &tail[prefix.len().min(8)..])
}

pub fn items_path(dir: &Path) -> PathBuf {
    dir.join("items.json")
}

pub fn read_items_file(dir: &Path) -> Vec<ContextItem> {
    let contents = fs::read_to_string(items_path(dir)).expect("Failed to read items.json");
    serde_json::from_str(&contents).expect("Failed to parse items.json")
}
