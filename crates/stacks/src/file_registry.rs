//! File-backed registry for running Stacks outside the host.
//!
//! The registry file is a JSON listing of item types plus the item each actor
//! is holding:
//!
//! ```json
//! {
//!   "items": [
//!     { "id": "wood.item", "display_name": "Wood", "category": "Resources", "stack_size": 1000 }
//!   ],
//!   "held": { "76561198000000001": "hatchet.item" }
//! }
//! ```
//!
//! Live stack-size changes are kept in memory until [`FileRegistry::save`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stacks_core::{ItemId, RegistryEntry, StackSize};
use stacks_perms::Actor;

use crate::registry::{Registry, RegistryError};

/// One item type in the registry file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryItem {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub category: String,
    pub stack_size: StackSize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    items: Vec<RegistryItem>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    held: BTreeMap<String, ItemId>,
}

/// Registry backed by a JSON file.
#[derive(Debug, Clone, Default)]
pub struct FileRegistry {
    path: Option<PathBuf>,
    contents: RegistryFile,
}

impl FileRegistry {
    /// Load a registry file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref().to_path_buf();
        let raw = fs::read_to_string(&path).map_err(|source| RegistryError::Io {
            path: path.clone(),
            source,
        })?;
        let contents = serde_json::from_str(&raw).map_err(|source| RegistryError::Parse {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path: Some(path),
            contents,
        })
    }

    /// In-memory registry with no backing file.
    pub fn from_items(items: Vec<RegistryItem>) -> Self {
        Self {
            path: None,
            contents: RegistryFile {
                items,
                held: BTreeMap::new(),
            },
        }
    }

    /// Record the item an actor is holding.
    pub fn hold(&mut self, actor_id: impl Into<String>, id: ItemId) {
        self.contents.held.insert(actor_id.into(), id);
    }

    pub fn item(&self, id: &ItemId) -> Option<&RegistryItem> {
        self.contents.items.iter().find(|item| item.id == *id)
    }

    pub fn items(&self) -> &[RegistryItem] {
        &self.contents.items
    }

    /// Write live stack sizes back to the registry file, if there is one.
    pub fn save(&self) -> Result<(), RegistryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(&self.contents).map_err(|source| {
            RegistryError::Parse {
                path: path.clone(),
                source,
            }
        })?;
        stacks_store::json::atomic_write(path, &content).map_err(|source| RegistryError::Io {
            path: path.clone(),
            source,
        })
    }
}

impl Registry for FileRegistry {
    fn list_items(&self) -> Vec<RegistryEntry> {
        self.contents
            .items
            .iter()
            .map(|item| RegistryEntry::new(item.id.clone(), item.category.clone(), item.stack_size))
            .collect()
    }

    fn set_live_stack(&mut self, id: &ItemId, stack_size: StackSize) -> Result<(), RegistryError> {
        let item = self
            .contents
            .items
            .iter_mut()
            .find(|item| item.id == *id)
            .ok_or_else(|| RegistryError::UnknownItem(id.clone()))?;
        item.stack_size = stack_size;
        Ok(())
    }

    fn resolve_held_item(&self, actor: &Actor) -> Option<ItemId> {
        self.contents.held.get(&actor.id).cloned()
    }

    fn resolve_display_name(&self, id: &ItemId) -> Option<String> {
        self.item(id).and_then(|item| item.display_name.clone())
    }
}
