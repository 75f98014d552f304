/// Integration tests for the file-backed item store
///
/// These exercise the public API the way the CLI does: construct, load,
/// mutate, then reload from disk in a fresh store.
mod common;

use std::fs;

use common::{ItemBuilder, StoreDirBuilder, items_path, read_items_file, uuid_with_prefix};
use contextkeeper::{ContextItem, ItemStore, JsonFileStore, StoreError};
use tempfile::TempDir;

fn loaded(dir: &std::path::Path) -> JsonFileStore {
    let store = JsonFileStore::new(dir);
    store.load().unwrap();
    store
}

#[test]
fn test_add_get_update_delete_scenario() {
    let dir = TempDir::new().unwrap();
    let store = loaded(dir.path());
    assert!(store.get_all().is_empty());

    let item = ContextItem::with_id("test-123", "Test content")
        .with_project("test-project")
        .with_tags(vec!["tag1".to_string()]);
    store.add(item).unwrap();

    let fetched = store.get_by_id("test-123").unwrap();
    assert_eq!(fetched.content, "Test content");
    assert_eq!(fetched.project, "test-project");
    assert_eq!(fetched.tags, vec!["tag1"]);

    let mut changed = fetched.clone();
    changed.content = "Updated content".to_string();
    store.update(changed).unwrap();
    assert_eq!(loaded(dir.path()).get_by_id("test-123").unwrap().content, "Updated content");

    store.delete("test-123").unwrap();
    assert!(store.get_by_id("test-123").unwrap_err().is_not_found());
    assert!(loaded(dir.path()).get_all().is_empty());
}

#[test]
fn test_reload_preserves_every_field() {
    let dir = StoreDirBuilder::new()
        .with_item(ItemBuilder::new("a").project("web").tags(&["bug"]).completed())
        .with_item(ItemBuilder::new("b").archived())
        .build();

    let store = loaded(dir.path());
    store.save().unwrap();

    let reloaded = loaded(dir.path());
    assert_eq!(reloaded.get_all(), store.get_all());
    assert!(reloaded.get_by_id("a").unwrap().is_completed());
    assert!(reloaded.get_by_id("b").unwrap().is_archived());
}

#[test]
fn test_prefix_cardinality() {
    let first = uuid_with_prefix("bc28", 1);
    let second = uuid_with_prefix("bc28", 2);
    let dir = StoreDirBuilder::new()
        .with_item(ItemBuilder::new(&first).content("first"))
        .with_item(ItemBuilder::new(&second).content("second"))
        .build();
    let store = loaded(dir.path());

    assert!(store.get_by_prefix("ffff").unwrap_err().is_not_found());
    assert_eq!(store.get_by_prefix(&first[..8]).unwrap().content, "first");

    match store.get_by_prefix("bc28").unwrap_err() {
        StoreError::AmbiguousId { prefix, matches } => {
            assert_eq!(prefix, "bc28");
            assert_eq!(matches, vec![first.clone(), second.clone()]);
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }

    assert_eq!(store.find_by_prefix("bc28").len(), 2);
    assert_eq!(store.resolve(&second).unwrap().content, "second");
}

#[test]
fn test_delete_missing_leaves_file_untouched() {
    let dir = StoreDirBuilder::new().with_item(ItemBuilder::new("keep")).build();
    let before = fs::read(items_path(dir.path())).unwrap();

    let store = loaded(dir.path());
    assert!(store.delete("missing").unwrap_err().is_not_found());

    assert_eq!(fs::read(items_path(dir.path())).unwrap(), before);
}

#[test]
fn test_duplicate_add_is_rejected() {
    let dir = StoreDirBuilder::new().with_item(ItemBuilder::new("dup").content("original")).build();
    let store = loaded(dir.path());

    let err = store.add(ContextItem::with_id("dup", "impostor")).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId(ref id) if id == "dup"));

    let on_disk = read_items_file(dir.path());
    assert_eq!(on_disk.len(), 1);
    assert_eq!(on_disk[0].content, "original");
}

#[test]
fn test_archive_and_completion_are_independent() {
    let dir = StoreDirBuilder::new().with_item(ItemBuilder::new("x").completed()).build();
    let store = loaded(dir.path());

    store.archive("x").unwrap();
    let item = loaded(dir.path()).get_by_id("x").unwrap();
    assert!(item.is_archived() && item.is_completed());

    store.unarchive("x").unwrap();
    let item = loaded(dir.path()).get_by_id("x").unwrap();
    assert!(!item.is_archived() && item.is_completed());
}

#[test]
fn test_set_items_replaces_everything() {
    let dir = StoreDirBuilder::new()
        .with_items([ItemBuilder::new("a"), ItemBuilder::new("b")])
        .build();
    let store = loaded(dir.path());

    store.set_items(vec![ItemBuilder::new("c").build()]).unwrap();

    let ids: Vec<String> = read_items_file(dir.path()).into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["c"]);
}

#[test]
fn test_store_accepts_file_path() {
    let dir = StoreDirBuilder::new().with_item(ItemBuilder::new("a")).build();
    let store = JsonFileStore::new(items_path(dir.path()));
    store.load().unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.path(), items_path(dir.path()));
}

#[test]
fn test_first_write_creates_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let store = loaded(&nested);
    assert!(!nested.exists());

    store.add(ContextItem::new("hello")).unwrap();
    assert_eq!(read_items_file(&nested).len(), 1);
}

#[test]
fn test_file_uses_snake_case_keys_and_omits_empty_fields() {
    let dir = TempDir::new().unwrap();
    let store = loaded(dir.path());
    store.add(ItemBuilder::new("plain").build()).unwrap();

    let raw = fs::read_to_string(items_path(dir.path())).unwrap();
    assert!(raw.contains("\"created_at\": \"2024-06-15T12:00:00Z\""));
    assert!(raw.contains("\"archived\": false"));
    assert!(!raw.contains("project"));
    assert!(!raw.contains("completed_at"));
    assert!(raw.starts_with("[\n  {"));
}
