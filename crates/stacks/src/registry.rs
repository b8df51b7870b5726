//! The host item registry, as seen by Stacks.
//!
//! The registry is authoritative for which items exist, which category each
//! belongs to, and what stack size the host is currently enforcing. Stacks
//! only reads listings from it and pushes stack sizes into it.

use std::path::PathBuf;

use stacks_core::{ItemId, RegistryEntry, StackSize};
use stacks_perms::Actor;
use thiserror::Error;

/// Errors reported by a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry does not know the item.
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    /// The registry refused the update.
    #[error("update of {item} rejected: {reason}")]
    Rejected { item: ItemId, reason: String },

    /// Registry file could not be read or written.
    #[error("registry I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Registry file does not parse.
    #[error("invalid registry {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Narrow capability interface onto the host's item registry.
pub trait Registry {
    /// Every item type the host knows, with its category and current stack size.
    fn list_items(&self) -> Vec<RegistryEntry>;

    /// Change the stack size the host enforces for an item.
    fn set_live_stack(&mut self, id: &ItemId, stack_size: StackSize) -> Result<(), RegistryError>;

    /// The item the actor is holding, already in identifier form.
    fn resolve_held_item(&self, actor: &Actor) -> Option<ItemId>;

    /// Human-readable name of an item.
    fn resolve_display_name(&self, id: &ItemId) -> Option<String>;
}
