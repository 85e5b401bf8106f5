//! File-backed [`RecordStore`].
//!
//! Each call opens the file, consumes or writes it in full, and drops the
//! handle before returning.  A line that is not valid UTF-8 is skipped on
//! read, like any other malformed record.  Writes go through a `BufWriter` that is flushed
//! explicitly so a failed flush is reported instead of lost on drop.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::application::record_store::{RecordStore, StoreError};

/// Reads and writes record files on the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRecordStore;

impl FileRecordStore {
    pub fn new() -> Self {
        Self
    }
}

impl RecordStore for FileRecordStore {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>, StoreError> {
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound {
                path: path.to_path_buf(),
            },
            _ => StoreError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let mut lines = Vec::new();
        for (idx, raw) in BufReader::new(file).split(b'\n').enumerate() {
            let mut raw = raw.map_err(|source| StoreError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            match String::from_utf8(raw) {
                Ok(line) => lines.push(line),
                Err(_) => debug!(
                    path = %path.display(),
                    line = idx + 1,
                    "skipping record line that is not valid UTF-8"
                ),
            }
        }
        Ok(lines)
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<(), StoreError> {
        let write = || -> io::Result<()> {
            let mut out = BufWriter::new(File::create(path)?);
            for line in lines {
                writeln!(out, "{line}")?;
            }
            out.flush()
        };
        write().map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
