//! Conversion to and from the StackSizeController interchange document.
//!
//! The interchange document is keyed by display name rather than identifier:
//!
//! ```json
//! { "itemlist": { "Wood": 1000, "Stones": 1000 } }
//! ```

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::index::ItemIndex;
use crate::reconcile::RegistryEntry;
use crate::types::{Category, ItemId, StackSize};

/// The interchange document: display name → stack size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterchangeDocument {
    #[serde(default)]
    pub itemlist: BTreeMap<String, i64>,
}

impl InterchangeDocument {
    pub fn len(&self) -> usize {
        self.itemlist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemlist.is_empty()
    }
}

/// Build an interchange document from the index.
///
/// Items without a display name are skipped. When two identifiers share a
/// display name, the first one in index order wins.
pub fn export_index<F>(index: &ItemIndex, display_name: F) -> InterchangeDocument
where
    F: Fn(&ItemId) -> Option<String>,
{
    let mut itemlist = BTreeMap::new();

    for record in index.records() {
        let Some(name) = display_name(&record.id).filter(|name| !name.is_empty()) else {
            tracing::debug!(item = %record.id, "no display name, not exported");
            continue;
        };
        if let Entry::Vacant(slot) = itemlist.entry(name) {
            slot.insert(i64::from(record.stack_size));
        }
    }

    InterchangeDocument { itemlist }
}

/// Result of [`import_document`].
#[derive(Debug, Clone)]
pub struct Imported {
    pub index: ItemIndex,
    /// Display names that were discarded.
    pub skipped: Vec<String>,
}

/// Rebuild an index from an interchange document.
///
/// Each display name is resolved to the first registry entry carrying it.
/// Entries that do not resolve, resolve to an uncategorized item, or carry a
/// non-positive stack size are discarded.
pub fn import_document<F>(
    document: &InterchangeDocument,
    registry: &[RegistryEntry],
    display_name: F,
) -> Imported
where
    F: Fn(&ItemId) -> Option<String>,
{
    let mut by_name: BTreeMap<String, &RegistryEntry> = BTreeMap::new();
    for entry in registry {
        if let Some(name) = display_name(&entry.id) {
            by_name.entry(name).or_insert(entry);
        }
    }

    let mut index = ItemIndex::new();
    let mut skipped = Vec::new();

    for (name, &raw) in &document.itemlist {
        let resolved = by_name.get(name.as_str()).and_then(|entry| {
            let category = Category::from_registry(&entry.category)?;
            let stack_size = StackSize::try_from(raw).ok()?;
            Some((entry.id.clone(), category, stack_size))
        });

        match resolved {
            Some((id, category, stack_size)) => {
                tracing::debug!(%name, item = %id, %category, size = %stack_size, "imported");
                index.insert(id, category, stack_size);
            }
            None => {
                tracing::debug!(%name, value = raw, "discarded interchange entry");
                skipped.push(name.clone());
            }
        }
    }

    Imported { index, skipped }
}
