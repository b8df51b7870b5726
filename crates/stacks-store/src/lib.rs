//! # Stacks Store
//!
//! Storage abstraction for Stacks. Provides a trait-based interface for
//! persisting the item index and the interchange document, with JSON file
//! and in-memory implementations.
//!
//! ## Key Types
//!
//! - [`Store`] - Per-record load/save interface
//! - [`StoreExt`] - Whole-snapshot load/save on top of [`Store`]
//! - [`JsonStore`] - JSON files under a data directory
//! - [`MemoryStore`] - In-memory storage for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stacks_store::{JsonStore, StoreExt};
//!
//! let store = JsonStore::open("data").unwrap();
//! let snapshot = store.load_snapshot();
//! store.save_snapshot(&snapshot).unwrap();
//! ```
//!
//! ## Design Notes
//!
//! - **Independent records**: the category and identifier records are read
//!   separately; one being corrupt does not discard the other
//! - **Atomic writes**: the JSON store never leaves a half-written record

pub mod error;
pub mod json;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use traits::{Record, Store, StoreExt};
