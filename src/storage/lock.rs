//! Advisory cross-process lock on a storage directory
//!
//! The in-process `RwLock` inside [`super::JsonFileStore`] does nothing for two
//! `ck` processes that each load, mutate and rewrite `items.json`; the second
//! writer silently discards the first one's change. Holding a [`StoreLock`]
//! from before `load` until after the last mutation serializes cooperating
//! processes. Processes that ignore the lock are not excluded.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;

use super::error::{StoreError, StoreResult};

/// Name of the lock file created inside the storage directory
pub const LOCK_FILENAME: &str = ".lock";

const RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Exclusive advisory lock, released on drop
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Block until the lock on `dir` is held
    pub fn acquire(dir: &Path) -> StoreResult<Self> {
        let (file, path) = open_lock_file(dir)?;
        file.lock_exclusive().map_err(|e| StoreError::io("lock", &path, e))?;
        Ok(Self { file, path })
    }

    /// Retry until the lock is held or `timeout` elapses
    pub fn acquire_timeout(dir: &Path, timeout: Duration) -> StoreResult<Self> {
        let (file, path) = open_lock_file(dir)?;
        let start = Instant::now();

        loop {
            match file.try_lock_exclusive() {
                Ok(()) => return Ok(Self { file, path }),
                Err(ref e) if is_contended(e) => {
                    if start.elapsed() >= timeout {
                        return Err(StoreError::io(
                            "lock",
                            &path,
                            io::Error::new(
                                io::ErrorKind::TimedOut,
                                "storage is locked by another process",
                            ),
                        ));
                    }
                    thread::sleep(RETRY_INTERVAL);
                }
                Err(e) => return Err(StoreError::io("lock", &path, e)),
            }
        }
    }

    /// Take the lock only if nobody else holds it
    pub fn try_acquire(dir: &Path) -> StoreResult<Option<Self>> {
        let (file, path) = open_lock_file(dir)?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { file, path })),
            Err(ref e) if is_contended(e) => Ok(None),
            Err(e) => Err(StoreError::io("lock", &path, e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn open_lock_file(dir: &Path) -> StoreResult<(File, PathBuf)> {
    fs::create_dir_all(dir).map_err(|e| StoreError::io("create storage directory", dir, e))?;

    let path = dir.join(LOCK_FILENAME);
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&path)
        .map_err(|e| StoreError::io("open lock file", &path, e))?;

    Ok((file, path))
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
