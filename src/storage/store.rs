use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::error::{StoreError, StoreResult};
use super::persistence::{items_file_path, read_items, write_items};
use crate::models::ContextItem;

/// Operations every item store provides
///
/// Implementations must be safe to share between threads. Every mutating
/// method persists before returning `Ok`.
pub trait ItemStore: Send + Sync {
    /// Replace the in-memory items with the contents of the backing file.
    /// A missing file loads as an empty store.
    fn load(&self) -> StoreResult<()>;

    /// Rewrite the backing file from the in-memory items.
    fn save(&self) -> StoreResult<()>;

    /// Copy of all items in insertion order.
    fn get_all(&self) -> Vec<ContextItem>;

    /// Item whose id equals `id` exactly.
    fn get_by_id(&self, id: &str) -> StoreResult<ContextItem>;

    /// The single item whose id starts with `prefix`.
    /// Fails with `ItemNotFound` for zero matches and `AmbiguousId` for several.
    fn get_by_prefix(&self, prefix: &str) -> StoreResult<ContextItem>;

    /// Every item whose id starts with `prefix`, in store order.
    fn find_by_prefix(&self, prefix: &str) -> Vec<ContextItem>;

    /// Exact id match first, then a unique prefix match.
    fn resolve(&self, id_or_prefix: &str) -> StoreResult<ContextItem>;

    /// Append a new item. Fails with `DuplicateId` if the id is taken.
    fn add(&self, item: ContextItem) -> StoreResult<()>;

    /// Replace the stored item that has the same id.
    fn update(&self, item: ContextItem) -> StoreResult<()>;

    /// Set `archived`; nothing else changes.
    fn archive(&self, id: &str) -> StoreResult<()>;

    /// Clear `archived`; nothing else changes.
    fn unarchive(&self, id: &str) -> StoreResult<()>;

    /// Remove the item permanently.
    fn delete(&self, id: &str) -> StoreResult<()>;

    /// Replace every item at once.
    fn set_items(&self, items: Vec<ContextItem>) -> StoreResult<()>;
}

/// Item store backed by a single JSON file
///
/// One reader-writer lock guards both the items and the file write, so
/// concurrent mutations in a process are serialized. Mutations are computed on
/// a copy and only installed after the file write succeeds; a failed write
/// leaves memory untouched.
///
/// There is no cross-process coordination here. Two processes rewriting the
/// same file can lose each other's changes; see [`super::StoreLock`].
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    items: RwLock<Vec<ContextItem>>,
}

impl JsonFileStore {
    /// Create a store for a directory or an `items.json` path.
    /// Nothing is read or created until the first load or persisting call.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: items_file_path(path.as_ref()), items: RwLock::new(Vec::new()) }
    }

    /// Path of the backing JSON file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of items held in memory
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store holds no items
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // The items vector is only ever replaced wholesale after a successful
    // write, so a panic while the lock is held cannot leave it half-updated.
    fn read(&self) -> RwLockReadGuard<'_, Vec<ContextItem>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<ContextItem>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist `next` and install it as the current items
    fn commit(&self, current: &mut Vec<ContextItem>, next: Vec<ContextItem>) -> StoreResult<()> {
        write_items(&self.path, &next)?;
        *current = next;
        Ok(())
    }

    /// Apply `change` to a copy of the item with `id`, then persist
    fn modify<F>(&self, id: &str, change: F) -> StoreResult<()>
    where
        F: FnOnce(&mut ContextItem),
    {
        let mut items = self.write();
        let idx = position(&items, id).ok_or_else(|| StoreError::ItemNotFound(id.to_string()))?;

        let mut next = items.clone();
        change(&mut next[idx]);
        self.commit(&mut items, next)
    }
}

fn position(items: &[ContextItem], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

fn unique_prefix_match(items: &[ContextItem], prefix: &str) -> StoreResult<ContextItem> {
    let mut matches = items.iter().filter(|item| item.id.starts_with(prefix));

    match (matches.next(), matches.next()) {
        (None, _) => Err(StoreError::ItemNotFound(prefix.to_string())),
        (Some(item), None) => Ok(item.clone()),
        (Some(_), Some(_)) => Err(StoreError::AmbiguousId {
            prefix: prefix.to_string(),
            matches: items
                .iter()
                .filter(|item| item.id.starts_with(prefix))
                .map(|item| item.id.clone())
                .collect(),
        }),
    }
}

impl ItemStore for JsonFileStore {
    fn load(&self) -> StoreResult<()> {
        let mut items = self.write();
        *items = read_items(&self.path)?;
        Ok(())
    }

    fn save(&self) -> StoreResult<()> {
        let items = self.write();
        write_items(&self.path, &items)
    }

    fn get_all(&self) -> Vec<ContextItem> {
        self.read().clone()
    }

    fn get_by_id(&self, id: &str) -> StoreResult<ContextItem> {
        self.read()
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| StoreError::ItemNotFound(id.to_string()))
    }

    fn get_by_prefix(&self, prefix: &str) -> StoreResult<ContextItem> {
        unique_prefix_match(&self.read(), prefix)
    }

    fn find_by_prefix(&self, prefix: &str) -> Vec<ContextItem> {
        self.read().iter().filter(|item| item.id.starts_with(prefix)).cloned().collect()
    }

    fn resolve(&self, id_or_prefix: &str) -> StoreResult<ContextItem> {
        let items = self.read();
        if let Some(item) = items.iter().find(|item| item.id == id_or_prefix) {
            return Ok(item.clone());
        }
        unique_prefix_match(&items, id_or_prefix)
    }

    fn add(&self, item: ContextItem) -> StoreResult<()> {
        let mut items = self.write();
        if position(&items, &item.id).is_some() {
            return Err(StoreError::DuplicateId(item.id));
        }

        let mut next = items.clone();
        next.push(item);
        self.commit(&mut items, next)
    }

    fn update(&self, item: ContextItem) -> StoreResult<()> {
        let id = item.id.clone();
        self.modify(&id, move |existing| *existing = item)
    }

    fn archive(&self, id: &str) -> StoreResult<()> {
        self.modify(id, |item| item.archived = true)
    }

    fn unarchive(&self, id: &str) -> StoreResult<()> {
        self.modify(id, |item| item.archived = false)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let mut items = self.write();
        let idx = position(&items, id).ok_or_else(|| StoreError::ItemNotFound(id.to_string()))?;

        let mut next = items.clone();
        next.remove(idx);
        self.commit(&mut items, next)
    }

    fn set_items(&self, items: Vec<ContextItem>) -> StoreResult<()> {
        let mut current = self.write();
        self.commit(&mut current, items)
    }
}
