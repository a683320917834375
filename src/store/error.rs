//! Store error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No per-user data directory could be determined.
    #[error("could not determine a per-user data directory")]
    NoDataDir,

    /// The data directory could not be created.
    #[error("failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A state file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A state file exists but does not contain a valid collection.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A collection could not be written. The in-memory change is kept.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A collection could not be serialized.
    #[error("failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Templates need a non-blank name.
    #[error("template name must not be empty")]
    EmptyName,
}

impl StoreError {
    /// Returns `true` for failures that happen at startup and leave no
    /// usable store.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StoreError::NoDataDir | StoreError::CreateDir { .. } | StoreError::Read { .. } | StoreError::Parse { .. }
        )
    }
}
