//! Error types for the store module.

use std::path::PathBuf;

use thiserror::Error;

use crate::traits::Record;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error while reading or writing a record.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record exists but does not parse.
    #[error("corrupt record {record}: {source}")]
    Corrupt {
        record: Record,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error while encoding a record.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend refused the write.
    #[error("write rejected for {0}")]
    WriteRejected(Record),

    /// A previous holder of the store lock panicked.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
