//! Error types for Stacks Core.

use thiserror::Error;

use crate::types::{Category, ItemId};

/// Errors raised while interpreting user-supplied or persisted values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("not a number: {0:?}")]
    NotANumber(String),

    #[error("stack size must be positive, got {0}")]
    NonPositive(i64),

    #[error("stack size {0} does not fit in 32 bits")]
    OutOfRange(i64),
}

/// Errors raised by item index operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("unknown category: {0}")]
    UnknownCategory(Category),

    #[error("index is inconsistent: {0}")]
    Inconsistent(String),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
