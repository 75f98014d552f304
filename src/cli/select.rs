//! Item selection and summaries behind `list`, `search` and `status`

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::commands::{ListArgs, SearchArgs};
use crate::filters::{FilterField, apply_filters, parse_filter};
use crate::models::ContextItem;
use crate::utils::parse_tags;

/// Items shown by `list`
///
/// Completed and archived items are hidden unless `--all`/`--archived` ask
/// for them, or the filter expression tests `status` itself.
pub fn select_for_list(items: Vec<ContextItem>, args: &ListArgs) -> Result<Vec<ContextItem>> {
    let expr = match args.filter.as_deref() {
        Some(filter) => parse_filter(filter).context("Invalid --filter expression")?,
        None => Default::default(),
    };
    let explicit_status = expr.mentions(&FilterField::Status);
    let tags = args.tags.as_deref().map(parse_tags).unwrap_or_default();

    let selected = items
        .into_iter()
        .filter(|item| args.project.as_deref().is_none_or(|p| item.project == p))
        .filter(|item| has_all_tags(item, &tags))
        .filter(|item| explicit_status || args.all || !item.is_completed())
        .filter(|item| explicit_status || args.archived || !item.is_archived())
        .collect();

    Ok(apply_filters(selected, &expr))
}

/// Items shown by `search`; archived items are never included
pub fn select_for_search(items: Vec<ContextItem>, args: &SearchArgs) -> Vec<ContextItem> {
    let tags = args.tags.as_deref().map(parse_tags).unwrap_or_default();
    let query = args.query.as_deref().unwrap_or("").to_lowercase();

    items
        .into_iter()
        .filter(|item| !item.is_archived())
        .filter(|item| args.all || !item.is_completed())
        .filter(|item| has_all_tags(item, &tags))
        .filter(|item| matches_query(item, &query))
        .collect()
}

/// Content or any tag contains `lower_query`; an empty query matches everything
pub fn matches_query(item: &ContextItem, lower_query: &str) -> bool {
    lower_query.is_empty()
        || item.content.to_lowercase().contains(lower_query)
        || item.tags.iter().any(|t| t.to_lowercase().contains(lower_query))
}

fn has_all_tags(item: &ContextItem, tags: &[String]) -> bool {
    tags.iter().all(|tag| item.has_tag(tag))
}

/// Counts reported by `status`
///
/// `active` means neither completed nor archived, so the three counts can
/// overlap only between completed and archived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total_items: usize,
    pub active_items: usize,
    pub completed_items: usize,
    pub archived_items: usize,
    pub projects: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip)]
    pub oldest: Option<DateTime<Utc>>,
}

impl StatusSummary {
    pub fn from_items(items: &[ContextItem]) -> Self {
        let mut projects = BTreeSet::new();
        let mut tags = BTreeSet::new();

        for item in items {
            if !item.project.is_empty() {
                projects.insert(item.project.clone());
            }
            tags.extend(item.tags.iter().cloned());
        }

        Self {
            total_items: items.len(),
            active_items: items.iter().filter(|i| !i.is_completed() && !i.is_archived()).count(),
            completed_items: items.iter().filter(|i| i.is_completed()).count(),
            archived_items: items.iter().filter(|i| i.is_archived()).count(),
            projects: projects.into_iter().collect(),
            tags: tags.into_iter().collect(),
            oldest: items.iter().map(|i| i.created_at).min(),
        }
    }
}
