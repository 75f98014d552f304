//! Item file persistence: load/save with temp-file-and-rename writes

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::error::{StoreError, StoreResult};
use crate::models::ContextItem;

/// Canonical name of the item file inside a storage directory
pub const ITEMS_FILENAME: &str = "items.json";

/// Resolve a directory or file path to the item file path
///
/// Paths whose final component is already [`ITEMS_FILENAME`] are returned as-is.
pub fn items_file_path(path: &Path) -> PathBuf {
    if path.file_name().is_some_and(|name| name == ITEMS_FILENAME) {
        path.to_path_buf()
    } else {
        path.join(ITEMS_FILENAME)
    }
}

/// Storage directory for a directory or item file path
///
/// The inverse of [`items_file_path`]: a path naming [`ITEMS_FILENAME`] resolves to
/// the directory holding it, so config and lock files land beside the items.
pub fn storage_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if path.file_name().is_some_and(|name| name == ITEMS_FILENAME) => {
            if parent.as_os_str().is_empty() { PathBuf::from(".") } else { parent.to_path_buf() }
        }
        _ => path.to_path_buf(),
    }
}

/// Read all items from `path`
///
/// A missing file or one holding only whitespace yields an empty list.
pub fn read_items(path: &Path) -> StoreResult<Vec<ContextItem>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::io("read", path, e)),
    };

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&contents)
        .map_err(|source| StoreError::Decode { path: path.to_path_buf(), source })
}

/// Serialize items the way they are written to disk (two-space indent, trailing newline)
pub fn encode_items(items: &[ContextItem]) -> StoreResult<String> {
    let mut json = serde_json::to_string_pretty(items).map_err(StoreError::Encode)?;
    json.push('\n');
    Ok(json)
}

/// Rewrite the item file with `items`
///
/// Creates parent directories as needed. The JSON is written to a sibling temp
/// file and renamed over `path`, so readers see either the old or the new file.
pub fn write_items(path: &Path, items: &[ContextItem]) -> StoreResult<()> {
    let dir = path.parent().filter(|d| !d.as_os_str().is_empty()).unwrap_or(Path::new("."));
    fs::create_dir_all(dir).map_err(|e| StoreError::io("create storage directory", dir, e))?;

    let json = encode_items(items)?;

    // Unique per write, so two stores on one directory never share a temp file
    let mut temp = tempfile::Builder::new()
        .prefix(".items.")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| StoreError::io("create temp file", dir, e))?;
    temp.write_all(json.as_bytes()).map_err(|e| StoreError::io("write", temp.path(), e))?;

    // A failed persist drops the temp file, which removes it
    temp.persist(path).map_err(|e| StoreError::io("replace", path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_items_file_path_appends_filename() {
        assert_eq!(items_file_path(Path::new("/a/b")), PathBuf::from("/a/b/items.json"));
        assert_eq!(items_file_path(Path::new("/a/data.json")), PathBuf::from("/a/data.json/items.json"));
    }

    #[test]
    fn test_items_file_path_keeps_canonical_name() {
        assert_eq!(items_file_path(Path::new("/a/b/items.json")), PathBuf::from("/a/b/items.json"));
    }

    #[test]
    fn test_storage_dir_of_item_file_is_its_parent() {
        assert_eq!(storage_dir(Path::new("/a/b/items.json")), PathBuf::from("/a/b"));
        assert_eq!(storage_dir(Path::new("items.json")), PathBuf::from("."));
        assert_eq!(storage_dir(Path::new("/a/b")), PathBuf::from("/a/b"));
        assert_eq!(storage_dir(Path::new("/a/data.json")), PathBuf::from("/a/data.json"));
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let items = read_items(&dir.path().join(ITEMS_FILENAME)).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_read_whitespace_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ITEMS_FILENAME);
        fs::write(&path, "  \n").unwrap();
        assert!(read_items(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_malformed_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ITEMS_FILENAME);
        fs::write(&path, "[{\"id\": ").unwrap();

        match read_items(&path) {
            Err(StoreError::Decode { path: err_path, .. }) => assert_eq!(err_path, path),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_non_array_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ITEMS_FILENAME);
        fs::write(&path, r#"{"id":"x"}"#).unwrap();
        assert!(matches!(read_items(&path), Err(StoreError::Decode { .. })));
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ITEMS_FILENAME);
        fs::create_dir(&path).unwrap();
        assert!(matches!(read_items(&path), Err(StoreError::Io { op: "read", .. })));
    }

    #[test]
    fn test_write_creates_parent_dirs_and_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join(ITEMS_FILENAME);

        write_items(&path, &[ContextItem::with_id("a", "first")]).unwrap();

        assert!(path.exists());
        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != ITEMS_FILENAME)
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_interleaved_writers_each_replace_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ITEMS_FILENAME);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let path = path.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        write_items(&path, &[ContextItem::with_id(format!("{t}-{i}"), "x")]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(read_items(&path).unwrap().len(), 1);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_uses_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ITEMS_FILENAME);
        write_items(&path, &[ContextItem::with_id("a", "first")]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("[\n  {\n    \"id\": \"a\""));
        assert!(contents.ends_with("]\n"));
    }

    #[test]
    fn test_write_empty_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ITEMS_FILENAME);
        write_items(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
        assert!(read_items(&path).unwrap().is_empty());
    }
}
