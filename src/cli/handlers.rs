use std::env;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::Serialize;

use super::commands::{AddArgs, ConfigArgs, EditArgs, ListArgs, SearchArgs};
use super::select::{StatusSummary, select_for_list, select_for_search};
use super::sync::{AGENT_TARGETS, sync_to};
use super::workspace::Workspace;
use crate::config::{CONTEXT_DIR_NAME, Finder, default_project, load_config, save_config};
use crate::models::{Config, ContextItem};
use crate::storage::{ItemStore, items_file_path, storage_dir};
use crate::utils::{
    JsonItem, ListStyle, days_since, format_item_list, format_timestamp, open_editor, parse_tags,
    validate_tags,
};

pub fn init(explicit: Option<&Path>) -> Result<()> {
    let dir = match explicit {
        Some(path) => storage_dir(path),
        None => env::current_dir().context("Failed to determine current directory")?.join(CONTEXT_DIR_NAME),
    };

    fs::create_dir_all(&dir).with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let items_path = items_file_path(&dir);
    if !items_path.exists() {
        fs::write(&items_path, "[]\n")
            .with_context(|| format!("Failed to create items file: {}", items_path.display()))?;
    }

    // Re-saving keeps an existing config and normalizes its storage path
    let config = load_config(&dir)?;
    save_config(&config)?;

    println!("Initialized ContextKeeper in: {}", dir.display());
    println!("Run 'ck add --help' to get started.");
    Ok(())
}

pub fn add(explicit: Option<&Path>, args: &AddArgs) -> Result<()> {
    let tags = args.tags.as_deref().map(parse_tags).unwrap_or_default();
    validate_tags(&tags)?;

    // Lock only once the content is in; the editor or stdin can block
    let mut ws = Workspace::open(explicit)?;
    let content = read_content(args, ws.config.editor.as_deref())?;
    if content.trim().is_empty() {
        bail!("Content cannot be empty");
    }
    ws.lock_for_write()?;

    let project = args
        .project
        .clone()
        .filter(|p| !p.is_empty())
        .or_else(|| default_project(&ws.config))
        .unwrap_or_default();

    let item = ContextItem::new(content).with_project(project).with_tags(tags);
    ws.store.add(item.clone()).context("Failed to add item")?;

    if args.json {
        print_json(&AddedItem { id: item.short_id(), status: "added" })?;
    } else {
        println!("Added context item: {}", item.short_id());
    }
    Ok(())
}

#[derive(Serialize)]
struct AddedItem<'a> {
    id: &'a str,
    status: &'static str,
}

/// Argument, then editor, then piped stdin
fn read_content(args: &AddArgs, preferred_editor: Option<&str>) -> Result<String> {
    if let Some(content) = &args.content {
        return Ok(content.clone());
    }

    if args.editor {
        let text = open_editor("", preferred_editor)?;
        return Ok(text.trim_end().to_string());
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("No content given (pass it as an argument, use --editor, or pipe it on stdin)");
    }

    let mut text = String::new();
    stdin.lock().read_to_string(&mut text).context("Failed to read content from stdin")?;
    Ok(text.trim_end().to_string())
}

pub fn list(explicit: Option<&Path>, args: &ListArgs) -> Result<()> {
    let ws = Workspace::open(explicit)?;
    let items = select_for_list(ws.store.get_all(), args)?;
    print_items(&ws, &items, args.json)
}

pub fn search(explicit: Option<&Path>, args: &SearchArgs) -> Result<()> {
    let ws = Workspace::open(explicit)?;
    let items = select_for_search(ws.store.get_all(), args);
    print_items(&ws, &items, args.json)
}

fn print_items(ws: &Workspace, items: &[ContextItem], json: bool) -> Result<()> {
    if json {
        let rows: Vec<JsonItem<'_>> = items.iter().map(JsonItem::from).collect();
        return print_json(&rows);
    }

    let style = ListStyle { color: use_color(), date_format: ws.config.date_format() };
    print!("{}", format_item_list(items, &style));
    Ok(())
}

pub fn done(explicit: Option<&Path>, id: &str) -> Result<()> {
    let ws = Workspace::open_for_write(explicit)?;
    let mut item = ws.resolve(id, "done")?;

    item.mark_completed(Utc::now());
    ws.store.update(item.clone()).context("Failed to update item")?;

    println!("Marked item as completed: {}", item.short_id());
    Ok(())
}

pub fn reopen(explicit: Option<&Path>, id: &str) -> Result<()> {
    let ws = Workspace::open_for_write(explicit)?;
    let mut item = ws.resolve(id, "reopen")?;

    if !item.is_completed() {
        println!("Item is not completed: {}", item.short_id());
        return Ok(());
    }

    item.reopen();
    ws.store.update(item.clone()).context("Failed to update item")?;

    println!("Reopened item: {}", item.short_id());
    Ok(())
}

pub fn archive(explicit: Option<&Path>, id: &str) -> Result<()> {
    let ws = Workspace::open_for_write(explicit)?;
    let item = ws.resolve(id, "archive")?;

    ws.store.archive(&item.id).context("Failed to archive item")?;

    println!("Archived item: {}", item.short_id());
    Ok(())
}

pub fn unarchive(explicit: Option<&Path>, id: &str) -> Result<()> {
    let ws = Workspace::open_for_write(explicit)?;
    let item = ws.resolve(id, "unarchive")?;

    ws.store.unarchive(&item.id).context("Failed to unarchive item")?;

    println!("Unarchived item: {}", item.short_id());
    Ok(())
}

pub fn edit(explicit: Option<&Path>, args: &EditArgs) -> Result<()> {
    let ws = Workspace::open_for_write(explicit)?;
    let target = ws.resolve(&args.id, "edit")?;

    let mut edited = target.clone();
    if args.has_field_flags() {
        if let Some(content) = &args.content {
            edited.content = content.clone();
        }
        if let Some(project) = &args.project {
            edited.project = project.clone();
        }
        if let Some(tags) = &args.tags {
            let tags = parse_tags(tags);
            validate_tags(&tags)?;
            edited.tags = tags;
        }
    } else {
        let text = open_editor(&target.content, ws.config.editor.as_deref())?;
        edited.content = text.trim_end().to_string();
    }

    if edited.content.trim().is_empty() {
        bail!("Content cannot be empty");
    }
    if edited == target {
        println!("No changes: {}", target.short_id());
        return Ok(());
    }

    let items = ws
        .store
        .get_all()
        .into_iter()
        .map(|item| if item.id == edited.id { edited.clone() } else { item })
        .collect();
    ws.store.set_items(items).context("Failed to save edited item")?;

    println!("Updated item: {}", edited.short_id());
    Ok(())
}

pub fn remove(explicit: Option<&Path>, id: &str, force: bool) -> Result<()> {
    let ws = Workspace::open_for_write(explicit)?;
    let item = ws.resolve(id, "remove")?;

    if !force && !confirm(&format!("Remove item: {}\nAre you sure? (y/N): ", item.short_id()))? {
        println!("Cancelled.");
        return Ok(());
    }

    ws.store.delete(&item.id).context("Failed to remove item")?;

    println!("Removed item: {}", item.short_id());
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush().context("Failed to write prompt")?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer).context("Failed to read confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES"))
}

pub fn status(explicit: Option<&Path>, json: bool) -> Result<()> {
    let ws = Workspace::open(explicit)?;
    let summary = StatusSummary::from_items(&ws.store.get_all());

    if json {
        return print_json(&summary);
    }

    println!("ContextKeeper Status");
    println!("====================");
    println!("Storage Path: {}", ws.dir.display());
    println!("Total Items: {}", summary.total_items);
    println!("  Active:    {}", summary.active_items);
    println!("  Completed: {}", summary.completed_items);
    println!("  Archived:  {}", summary.archived_items);
    if !summary.projects.is_empty() {
        println!("Projects: {}", summary.projects.join(", "));
    }
    if !summary.tags.is_empty() {
        println!("Tags: {}", summary.tags.join(", "));
    }
    if let Some(oldest) = summary.oldest {
        println!("Oldest: {} ({} days ago)", format_timestamp(&oldest), days_since(&oldest));
    }
    Ok(())
}

pub fn sync(explicit: Option<&Path>) -> Result<()> {
    let ws = Workspace::open(explicit)?;
    let root = env::current_dir().context("Failed to determine current directory")?;

    let report = sync_to(&root, &ws.store.get_all(), Utc::now())?;

    if !report.agents_found {
        let dirs: Vec<&str> = AGENT_TARGETS.iter().map(|t| t.rules_dir).collect();
        println!("No AI agent directories found (looked for {})", dirs.join(", "));
        if report.written.is_empty() {
            println!("Create one of them, or run 'ck init' to sync into {}", CONTEXT_DIR_NAME);
        }
    }
    for path in &report.written {
        println!("Synced to {}", path.display());
    }
    Ok(())
}

pub fn config(explicit: Option<&Path>, args: &ConfigArgs) -> Result<()> {
    let dir = Finder::from_env()?.find_storage_path(explicit)?;
    let mut config = load_config(&dir)?;

    if let Some(key) = &args.get {
        println!("{}", get_config_value(&config, key)?);
        return Ok(());
    }

    if let Some([key, value]) = args.set.as_deref() {
        set_config_value(&mut config, key, value)?;
        save_config(&config)?;
        println!("Set {} to: {}", key, value);
        return Ok(());
    }

    if args.reset {
        config = Config::new(&dir);
        save_config(&config)?;
        println!("Configuration reset to defaults.");
        return Ok(());
    }

    print_json(&config)
}

pub(crate) fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let value = match key {
        "storagePath" => config.storage_path.display().to_string(),
        "defaultProject" => config.default_project.clone().unwrap_or_default(),
        "dateFormat" => config.date_format().to_string(),
        "editor" => config.editor.clone().unwrap_or_default(),
        "lockFile" => config.lock_file.to_string(),
        _ => bail!("Unknown config key: {} (valid keys: {})", key, CONFIG_KEYS.join(", ")),
    };
    Ok(value)
}

const CONFIG_KEYS: &[&str] = &["storagePath", "defaultProject", "dateFormat", "editor", "lockFile"];

/// Empty values clear optional settings
pub(crate) fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let optional = (!value.is_empty()).then(|| value.to_string());
    match key {
        "defaultProject" => config.default_project = optional,
        "dateFormat" => config.date_format = optional,
        "editor" => config.editor = optional,
        "lockFile" => {
            config.lock_file =
                value.parse().with_context(|| format!("lockFile must be true or false, got '{}'", value))?
        }
        "storagePath" => bail!("storagePath is determined by where the config lives; use --path or CK_STORAGE_PATH"),
        _ => bail!("Unknown config key: {} (valid keys: {})", key, CONFIG_KEYS.join(", ")),
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON output")?;
    println!("{}", json);
    Ok(())
}

fn use_color() -> bool {
    io::stdout().is_terminal() && env::var_os("NO_COLOR").is_none()
}
