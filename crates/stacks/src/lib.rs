//! # Stacks
//!
//! Stack-size manager: keeps a per-item table of maximum stack sizes, applies
//! it to a host item registry, persists it across restarts, and converts it
//! to and from the StackSizeController interchange format.
//!
//! ## Overview
//!
//! - **Index**: items grouped by category, with a reverse item-to-category map
//! - **Reconciliation**: on startup the index is rebuilt from the registry and
//!   persisted overrides are re-applied
//! - **Commands**: `stack`, `stcat`, `stimport`, `stexport`, gated on
//!   administrator rights
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stacks::{dispatch, Config, FileRegistry, Messages, StackController};
//! use stacks::perms::{Actor, GrantTable};
//! use stacks::store::JsonStore;
//!
//! fn example() -> anyhow::Result<()> {
//!     let registry = FileRegistry::open("registry.json")?;
//!     let store = JsonStore::open("data")?;
//!     let mut controller =
//!         StackController::start(registry, store, GrantTable::new(), Config::default());
//!
//!     let actor = Actor::console();
//!     if let Some(response) = dispatch(&mut controller, &actor, "stack", &["wood", "50"]) {
//!         println!("{}", Messages::default().render(&response));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `stacks::core` - Item index, reconciliation, interchange conversion
//! - `stacks::store` - Storage abstraction and JSON files
//! - `stacks::perms` - Actors and permission checks

pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod file_registry;
pub mod messages;
pub mod registry;

pub use stacks_core as core;
pub use stacks_perms as perms;
pub use stacks_store as store;

pub use commands::{dispatch, execute, Command};
pub use config::{Config, Options, Version, DEFAULT_MAX_STACK};
pub use controller::StackController;
pub use error::{Result, StacksError};
pub use file_registry::{FileRegistry, RegistryItem};
pub use messages::{format_template, MessageKey, Messages, Response};
pub use registry::{Registry, RegistryError};
