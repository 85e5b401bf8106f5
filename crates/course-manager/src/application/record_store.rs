//! Storage port for the line-oriented record files.
//!
//! The store moves raw lines in and out of a named location and knows nothing
//! about courses or users.  Parsing, course-name resolution, and the
//! skip-bad-lines policy belong to the registry.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Native failures of a [`RecordStore`].
///
/// The registry translates these into [`crate::RegistryError`] and never
/// returns them to its own callers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Nothing exists at the requested location.
    #[error("record file not found: {path}")]
    NotFound { path: PathBuf },

    /// The location exists but could not be read in full.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The lines could not be written in full.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads and writes whole record files as lists of lines.
///
/// Implementations must release any handle they open before returning, on the
/// error path as well as the success path.
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore: Send + Sync {
    /// Returns every line at `path`, in order, without line terminators.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when `path` does not exist, otherwise
    /// [`StoreError::Read`].
    fn read_lines(&self, path: &Path) -> Result<Vec<String>, StoreError>;

    /// Replaces the contents at `path` with `lines`, one per line.
    ///
    /// # Errors
    ///
    /// [`StoreError::Write`] if the location cannot be created or written.
    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<(), StoreError>;
}
