//! Export of active items into rule files that AI coding agents read

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::CONTEXT_DIR_NAME;
use crate::models::ContextItem;

/// A rules directory one agent reads, and the file written into it
pub struct AgentTarget {
    pub rules_dir: &'static str,
    pub file_name: &'static str,
    front_matter: &'static str,
}

pub const AGENT_TARGETS: &[AgentTarget] = &[
    AgentTarget { rules_dir: ".claude/rules", file_name: "ck-context.md", front_matter: "" },
    AgentTarget {
        rules_dir: ".cursor/rules",
        file_name: "ck-context.mdc",
        front_matter: "---\ndescription: Active ContextKeeper items\nalwaysApply: true\n---\n\n",
    },
];

/// Written inside `.contextkeeper/` when no agent rules directory exists
pub const FALLBACK_FILENAME: &str = "instructions.md";

#[derive(Debug, Default)]
pub struct SyncReport {
    /// Files written, relative to the sync root
    pub written: Vec<PathBuf>,
    pub agents_found: bool,
}

/// Write the active items under `root`
///
/// Every agent rules directory that already exists gets a file; none are
/// created. Without any, `.contextkeeper/instructions.md` is written if the
/// `.contextkeeper` directory is there.
pub fn sync_to(root: &Path, items: &[ContextItem], now: DateTime<Utc>) -> Result<SyncReport> {
    let body = render_context(items, now);
    let mut report = SyncReport::default();

    for target in AGENT_TARGETS {
        if !root.join(target.rules_dir).is_dir() {
            continue;
        }
        let relative = Path::new(target.rules_dir).join(target.file_name);
        write_file(&root.join(&relative), &format!("{}{}", target.front_matter, body))?;
        report.written.push(relative);
    }
    report.agents_found = !report.written.is_empty();

    if !report.agents_found && root.join(CONTEXT_DIR_NAME).is_dir() {
        let relative = Path::new(CONTEXT_DIR_NAME).join(FALLBACK_FILENAME);
        write_file(&root.join(&relative), &body)?;
        report.written.push(relative);
    }

    Ok(report)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Markdown listing of items that are neither completed nor archived
///
/// Content is copied verbatim; continuation lines are indented under their bullet.
pub fn render_context(items: &[ContextItem], now: DateTime<Utc>) -> String {
    let mut out = String::from("# ContextKeeper\n\n");
    out.push_str("Active context items for this project, managed with `ck`.\n\n");
    out.push_str(&format!("Last updated: {}\n\n", now.to_rfc3339_opts(SecondsFormat::Secs, true)));

    let active: Vec<&ContextItem> = items.iter().filter(|i| !i.is_completed() && !i.is_archived()).collect();
    if active.is_empty() {
        out.push_str("No active context items.\n");
        return out;
    }

    for item in active {
        let mut lines = item.content.lines();
        out.push_str(&format!("- [{}] {}", item.short_id(), lines.next().unwrap_or_default()));
        if !item.project.is_empty() {
            out.push_str(&format!(" (project: {})", item.project));
        }
        for tag in &item.tags {
            out.push_str(&format!(" @{}", tag));
        }
        out.push('\n');
        for line in lines {
            out.push_str(&format!("  {}\n", line));
        }
    }
    out
}
