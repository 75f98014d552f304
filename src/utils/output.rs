//! Human-readable and JSON renderings of items for the command layer

use std::fmt::Write;

use chrono::{DateTime, Utc};
use crossterm::style::Stylize;
use serde::Serialize;

use super::terminal::single_line;
use super::time::format_with;
use crate::models::{ContextItem, DEFAULT_DATE_FORMAT};

// List rows show at most this many characters of content
const MAX_CONTENT_LENGTH: usize = 50;
// Ambiguity previews are shorter so candidate ids line up
const MAX_PREVIEW_LENGTH: usize = 40;
const TRUNCATION_INDICATOR: &str = "...";

/// Rendering options for [`format_item_list`]
#[derive(Debug, Clone)]
pub struct ListStyle<'a> {
    pub color: bool,
    pub date_format: &'a str,
}

impl Default for ListStyle<'_> {
    fn default() -> Self {
        Self { color: false, date_format: DEFAULT_DATE_FORMAT }
    }
}

/// Item shape used by `--json` output of `list` and `search`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonItem<'a> {
    pub id: &'a str,
    pub full_id: &'a str,
    pub content: &'a str,
    pub project: &'a str,
    pub tags: &'a [String],
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub archived: bool,
}

impl<'a> From<&'a ContextItem> for JsonItem<'a> {
    fn from(item: &'a ContextItem) -> Self {
        Self {
            id: item.short_id(),
            full_id: &item.id,
            content: &item.content,
            project: &item.project,
            tags: &item.tags,
            completed_at: item.completed_at,
            created_at: item.created_at,
            archived: item.archived,
        }
    }
}

/// Truncate to `max_len` characters, ending with "..." when cut
///
/// # Examples
///
/// ```
/// use contextkeeper::utils::output::truncate;
///
/// assert_eq!(truncate("hello world", 8), "hello...");
/// assert_eq!(truncate("short", 8), "short");
/// ```
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len <= TRUNCATION_INDICATOR.len() {
        return text.chars().take(max_len).collect();
    }

    let kept: String = text.chars().take(max_len - TRUNCATION_INDICATOR.len()).collect();
    format!("{}{}", kept, TRUNCATION_INDICATOR)
}

/// One line per item: status, short id, content, project, tags, creation date
pub fn format_item_list(items: &[ContextItem], style: &ListStyle<'_>) -> String {
    if items.is_empty() {
        return "No items found.\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "{}", format_item_line(item, style));
    }
    out
}

fn format_item_line(item: &ContextItem, style: &ListStyle<'_>) -> String {
    let status = match (item.is_completed(), style.color) {
        (true, true) => "[x]".green().to_string(),
        (true, false) => "[x]".to_string(),
        (false, _) => "[ ]".to_string(),
    };

    let mut line =
        format!("{} [{}] {}", status, item.short_id(), truncate(&single_line(&item.content), MAX_CONTENT_LENGTH));

    if !item.project.is_empty() {
        let project = format!("@{}", single_line(&item.project));
        line.push(' ');
        line.push_str(&paint(project, style.color, |s| s.cyan().to_string()));
    }

    if !item.tags.is_empty() {
        let tags = format!("[{}]", item.tags.join(", "));
        line.push(' ');
        line.push_str(&paint(tags, style.color, |s| s.yellow().to_string()));
    }

    if item.archived {
        line.push(' ');
        line.push_str(&paint("(archived)".to_string(), style.color, |s| s.dim().to_string()));
    }

    line.push(' ');
    line.push_str(&format_with(&item.created_at, style.date_format));
    line
}

fn paint(text: String, color: bool, apply: impl FnOnce(String) -> String) -> String {
    if color { apply(text) } else { text }
}

/// Candidate listing printed when a prefix matches several items
pub fn format_ambiguous_matches(prefix: &str, matches: &[ContextItem], command: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Error: {} items match {:?}:", matches.len(), prefix);
    for item in matches {
        let _ = writeln!(
            out,
            "  - {}: {}",
            item.short_id(),
            truncate(&single_line(&item.content), MAX_PREVIEW_LENGTH)
        );
    }
    let _ = writeln!(out, "\nUse more characters to disambiguate:");
    for item in matches {
        let _ = writeln!(out, "  ck {} {}", command, item.id);
    }
    out
}
