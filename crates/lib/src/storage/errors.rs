//! Error types for the storage module
use std::path::PathBuf;

use thiserror::Error;

use crate::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read store file {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write store file {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store file {path:?} is not valid JSON: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Check if this error is an underlying I/O failure.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            StorageError::ReadFailed { .. } | StorageError::WriteFailed { .. }
        )
    }

    /// Check if this error indicates an unparseable store file.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StorageError::CorruptStore { .. })
    }
}

// Conversion from StorageError to the main Error type
impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Error::Storage(err)
    }
}
