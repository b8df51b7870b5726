//! Error types for Stacks operations.

use std::path::PathBuf;

use stacks_core::{Category, CoreError, ItemId, StackSize, ValidationError};
use stacks_perms::PermsError;
use stacks_store::StoreError;
use thiserror::Error;

use crate::registry::RegistryError;

/// Errors that can occur during Stacks operations.
#[derive(Debug, Error)]
pub enum StacksError {
    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Permission error.
    #[error("permission error: {0}")]
    Permission(#[from] PermsError),

    /// The live registry refused an update.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Index invariant violated.
    #[error("core error: {0}")]
    Core(CoreError),

    /// Malformed stack size.
    #[error("invalid stack size: {0}")]
    InvalidStackSize(#[from] ValidationError),

    /// Item not in the index.
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    /// Category not in the index.
    #[error("unknown category: {0}")]
    UnknownCategory(Category),

    /// Requested stack size is above the configured maximum.
    #[error("stack size {requested} exceeds the maximum of {max}")]
    TooLarge { requested: StackSize, max: StackSize },

    /// The registry refused every item of a bulk update.
    #[error("registry refused every item in category {0}")]
    NothingUpdated(Category),

    /// The actor is not holding anything.
    #[error("no held item")]
    NoHeldItem,

    /// The interchange document was missing, unreadable, or yielded nothing.
    #[error("nothing imported")]
    ImportFailed,

    /// Configuration file could not be read or written.
    #[error("config I/O error on {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file does not parse.
    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<CoreError> for StacksError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::UnknownItem(id) => StacksError::UnknownItem(id),
            CoreError::UnknownCategory(category) => StacksError::UnknownCategory(category),
            CoreError::Validation(e) => StacksError::InvalidStackSize(e),
            other => StacksError::Core(other),
        }
    }
}

/// Result type for Stacks operations.
pub type Result<T> = std::result::Result<T, StacksError>;
