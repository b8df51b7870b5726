//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing. It has the same semantics as the JSON
//! store but keeps everything in memory, and can be told to reject writes.

use std::sync::{Mutex, MutexGuard};

use stacks_core::{CategoryTable, InterchangeDocument, ItemCategoryTable, Snapshot};

use crate::error::{Result, StoreError};
use crate::traits::{Record, Store};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    categories: Option<CategoryTable>,
    item_categories: Option<ItemCategoryTable>,
    interchange: Option<InterchangeDocument>,

    /// Reject every write while set.
    fail_writes: bool,

    /// Successful writes so far.
    writes: usize,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a snapshot.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.lock() {
            inner.categories = Some(snapshot.categories);
            inner.item_categories = Some(snapshot.item_categories);
        }
        store
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        if let Ok(mut inner) = self.lock() {
            inner.fail_writes = fail;
        }
    }

    /// Number of successful writes across all records.
    pub fn write_count(&self) -> usize {
        self.lock().map(|inner| inner.writes).unwrap_or(0)
    }

    /// Drop a record, as if its file had been deleted.
    pub fn remove(&self, record: Record) {
        if let Ok(mut inner) = self.lock() {
            match record {
                Record::Categories => inner.categories = None,
                Record::ItemCategories => inner.item_categories = None,
                Record::Interchange => inner.interchange = None,
            }
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryStoreInner>> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }

    fn write_with<F>(&self, record: Record, f: F) -> Result<()>
    where
        F: FnOnce(&mut MemoryStoreInner),
    {
        let mut inner = self.lock()?;
        if inner.fail_writes {
            return Err(StoreError::WriteRejected(record));
        }
        f(&mut inner);
        inner.writes += 1;
        Ok(())
    }
}

impl Store for MemoryStore {
    fn load_categories(&self) -> Result<Option<CategoryTable>> {
        Ok(self.lock()?.categories.clone())
    }

    fn load_item_categories(&self) -> Result<Option<ItemCategoryTable>> {
        Ok(self.lock()?.item_categories.clone())
    }

    fn save_categories(&self, categories: &CategoryTable) -> Result<()> {
        self.write_with(Record::Categories, |inner| {
            inner.categories = Some(categories.clone());
        })
    }

    fn save_item_categories(&self, item_categories: &ItemCategoryTable) -> Result<()> {
        self.write_with(Record::ItemCategories, |inner| {
            inner.item_categories = Some(item_categories.clone());
        })
    }

    fn load_interchange(&self) -> Result<Option<InterchangeDocument>> {
        Ok(self.lock()?.interchange.clone())
    }

    fn save_interchange(&self, document: &InterchangeDocument) -> Result<()> {
        self.write_with(Record::Interchange, |inner| {
            inner.interchange = Some(document.clone());
        })
    }
}
