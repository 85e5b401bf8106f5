//! In-memory record store for tests.
//!
//! `MemoryRecordStore` keeps each "file" as a `Vec<String>` keyed by path, so
//! a registry can be loaded, mutated, saved and reloaded without touching the
//! disk.  Tests inspect what was written with [`MemoryRecordStore::lines`].
//!
//! # `should_fail` flag
//!
//! Set `should_fail` to make every read and write return an I/O error.  Reads
//! of a path that was never stored return `StoreError::NotFound` regardless.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::application::record_store::{RecordStore, StoreError};

/// A [`RecordStore`] backed by a map of path to lines.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    files: Mutex<HashMap<PathBuf, Vec<String>>>,
    /// When `true`, every read and write fails with an I/O error.
    pub should_fail: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `lines` at `path`, replacing anything already there.
    pub fn insert<I, S>(&self, path: impl Into<PathBuf>, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines.into_iter().map(Into::into).collect();
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), lines);
    }

    /// The lines currently stored at `path`.
    pub fn lines(&self, path: impl AsRef<Path>) -> Option<Vec<String>> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path.as_ref())
            .cloned()
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }

    fn failing(&self) -> bool {
        self.should_fail.load(Ordering::Relaxed)
    }
}

impl RecordStore for MemoryRecordStore {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>, StoreError> {
        let lines = self.lines(path).ok_or_else(|| StoreError::NotFound {
            path: path.to_path_buf(),
        })?;
        if self.failing() {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, "mock failure"),
            });
        }
        Ok(lines)
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<(), StoreError> {
        if self.failing() {
            return Err(StoreError::Write {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, "mock failure"),
            });
        }
        self.insert(path, lines.iter().cloned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_returns_inserted_lines() {
        let store = MemoryRecordStore::new();
        store.insert("courses.txt", ["CSC116,3,7", "CSC216,3,10"]);

        let lines = store.read_lines(Path::new("courses.txt")).unwrap();

        assert_eq!(lines, vec!["CSC116,3,7", "CSC216,3,10"]);
    }

    #[test]
    fn test_read_unknown_path_is_not_found() {
        let store = MemoryRecordStore::new();
        assert!(matches!(
            store.read_lines(Path::new("absent.txt")),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_write_replaces_contents() {
        let store = MemoryRecordStore::new();
        store.insert("f.txt", ["old"]);

        store
            .write_lines(Path::new("f.txt"), &["new".to_string()])
            .unwrap();

        assert_eq!(store.lines("f.txt"), Some(vec!["new".to_string()]));
    }

    #[test]
    fn test_should_fail_makes_reads_and_writes_fail() {
        let store = MemoryRecordStore::new();
        store.insert("f.txt", ["line"]);
        store.set_should_fail(true);

        assert!(matches!(
            store.read_lines(Path::new("f.txt")),
            Err(StoreError::Read { .. })
        ));
        assert!(matches!(
            store.write_lines(Path::new("f.txt"), &[]),
            Err(StoreError::Write { .. })
        ));
        assert_eq!(store.lines("f.txt"), Some(vec!["line".to_string()]));
    }
}
