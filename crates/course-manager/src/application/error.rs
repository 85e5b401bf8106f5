//! The registry's error type.

use std::path::PathBuf;

use course_core::{DomainError, ErrorKind};
use thiserror::Error;

use crate::application::record_store::StoreError;

/// Everything a [`crate::CourseRegistry`] operation can fail with.
///
/// Use [`RegistryError::kind`] to branch on the category; `Display` carries
/// the message meant for a human.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A domain rule rejected the mutation.  Nothing was changed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A session-scoped operation was called while logged out.
    #[error("no user is logged in")]
    NoSession,

    /// A record file to load does not exist.
    #[error("record file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A record file exists but could not be read.
    #[error("unable to read record file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Saving a record file failed.
    #[error("unable to write record file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A save was requested before any file name was remembered for it.
    #[error("no {0} record file has been set")]
    NoRecordFile(&'static str),
}

impl RegistryError {
    /// Returns the stable category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Domain(e) => e.kind(),
            RegistryError::NoSession => ErrorKind::Session,
            RegistryError::FileNotFound { .. }
            | RegistryError::ReadFailed { .. }
            | RegistryError::WriteFailed { .. }
            | RegistryError::NoRecordFile(_) => ErrorKind::Io,
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { path } => RegistryError::FileNotFound { path },
            StoreError::Read { path, source } => RegistryError::ReadFailed { path, source },
            StoreError::Write { path, source } => RegistryError::WriteFailed { path, source },
        }
    }
}
