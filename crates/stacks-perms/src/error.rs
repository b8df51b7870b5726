//! Error types for the permissions module.

use thiserror::Error;

/// Errors that can occur during permission operations.
#[derive(Debug, Error)]
pub enum PermsError {
    /// Permission denied.
    #[error("{actor} lacks permission {permission}")]
    PermissionDenied { actor: String, permission: String },

    /// Grant table could not be parsed.
    #[error("invalid grant table: {0}")]
    InvalidGrants(#[from] serde_json::Error),
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
