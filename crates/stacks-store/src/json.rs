//! JSON file implementation of the Store trait.
//!
//! Each record is one pretty-printed JSON file under the data directory:
//!
//! ```text
//! <root>/Stacks/stacking.json
//! <root>/Stacks/name2cat.json
//! <root>/StackSizeController.json
//! ```
//!
//! Writes go to a temporary file in the target directory which is then
//! renamed over the record, so a crash mid-write leaves the old file intact.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use stacks_core::{CategoryTable, InterchangeDocument, ItemCategoryTable};

use crate::error::{Result, StoreError};
use crate::traits::{Record, Store};

/// File-backed store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path backing a record.
    pub fn path(&self, record: Record) -> PathBuf {
        self.root.join(format!("{}.json", record.name()))
    }

    fn read<T: DeserializeOwned>(&self, record: Record) -> Result<Option<T>> {
        let path = self.path(record);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { record, source })
    }

    fn write<T: Serialize>(&self, record: Record, value: &T) -> Result<()> {
        let path = self.path(record);
        let content = serde_json::to_string_pretty(value)?;
        atomic_write(&path, &content).map_err(|source| StoreError::Io { path, source })?;
        tracing::debug!(%record, "record written");
        Ok(())
    }
}

impl Store for JsonStore {
    fn load_categories(&self) -> Result<Option<CategoryTable>> {
        self.read(Record::Categories)
    }

    fn load_item_categories(&self) -> Result<Option<ItemCategoryTable>> {
        self.read(Record::ItemCategories)
    }

    fn save_categories(&self, categories: &CategoryTable) -> Result<()> {
        self.write(Record::Categories, categories)
    }

    fn save_item_categories(&self, item_categories: &ItemCategoryTable) -> Result<()> {
        self.write(Record::ItemCategories, item_categories)
    }

    fn load_interchange(&self) -> Result<Option<InterchangeDocument>> {
        self.read(Record::Interchange)
    }

    fn save_interchange(&self, document: &InterchangeDocument) -> Result<()> {
        self.write(Record::Interchange, document)
    }
}

/// Write `content` to `path` via a temporary file in the same directory.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent directory"))?;
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    temp_file.persist(path)?;
    Ok(())
}
