//! Store trait: the abstract interface for persisting the item index.
//!
//! The index is kept in two independent records so that losing one does not
//! lose the other. The interchange document is a third, unrelated record.

use std::fmt;

use stacks_core::{CategoryTable, InterchangeDocument, ItemCategoryTable, Snapshot};

use crate::error::Result;

/// The durable records a store manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Record {
    /// category → (identifier → stack size)
    Categories,
    /// identifier → category
    ItemCategories,
    /// display name → stack size, shared with StackSizeController
    Interchange,
}

impl Record {
    /// Record name, relative to the data directory, without extension.
    pub const fn name(self) -> &'static str {
        match self {
            Record::Categories => "Stacks/stacking",
            Record::ItemCategories => "Stacks/name2cat",
            Record::Interchange => "StackSizeController",
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Synchronous persistence for the item index and the interchange document.
///
/// Loads return `Ok(None)` when a record has never been written.
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Index Records
    // ─────────────────────────────────────────────────────────────────────────

    /// Load the category record.
    fn load_categories(&self) -> Result<Option<CategoryTable>>;

    /// Load the identifier → category record.
    fn load_item_categories(&self) -> Result<Option<ItemCategoryTable>>;

    /// Replace the category record.
    fn save_categories(&self, categories: &CategoryTable) -> Result<()>;

    /// Replace the identifier → category record.
    fn save_item_categories(&self, item_categories: &ItemCategoryTable) -> Result<()>;

    // ─────────────────────────────────────────────────────────────────────────
    // Interchange Record
    // ─────────────────────────────────────────────────────────────────────────

    /// Load the interchange document.
    fn load_interchange(&self) -> Result<Option<InterchangeDocument>>;

    /// Replace the interchange document.
    fn save_interchange(&self, document: &InterchangeDocument) -> Result<()>;
}

/// Extension trait for whole-snapshot access.
pub trait StoreExt: Store {
    /// Load both index records.
    ///
    /// Never fails: a missing record reads as empty, and a record that cannot
    /// be read is logged and treated as empty without affecting the other.
    fn load_snapshot(&self) -> Snapshot;

    /// Write both index records.
    ///
    /// Both writes are attempted even if the first fails; the first error is
    /// returned.
    fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()>;
}

impl<S: Store + ?Sized> StoreExt for S {
    fn load_snapshot(&self) -> Snapshot {
        let categories = match self.load_categories() {
            Ok(Some(table)) => table,
            Ok(None) => {
                tracing::debug!(record = %Record::Categories, "no saved record");
                CategoryTable::new()
            }
            Err(e) => {
                tracing::warn!(record = %Record::Categories, error = %e, "ignoring unreadable record");
                CategoryTable::new()
            }
        };

        let item_categories = match self.load_item_categories() {
            Ok(Some(table)) => table,
            Ok(None) => {
                tracing::debug!(record = %Record::ItemCategories, "no saved record");
                ItemCategoryTable::new()
            }
            Err(e) => {
                tracing::warn!(record = %Record::ItemCategories, error = %e, "ignoring unreadable record");
                ItemCategoryTable::new()
            }
        };

        Snapshot {
            categories,
            item_categories,
        }
    }

    fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let categories = self.save_categories(&snapshot.categories);
        let item_categories = self.save_item_categories(&snapshot.item_categories);
        categories.and(item_categories)
    }
}
