//! # Stacks Core
//!
//! Pure primitives for Stacks: item identifiers, the two-way item index,
//! startup reconciliation, and interchange conversion.
//!
//! This crate contains no I/O. Storage lives in `stacks-store`, command
//! handling in `stacks`.
//!
//! ## Key Types
//!
//! - [`ItemId`] - Stable item identifier (`wood.item`)
//! - [`Category`] - Grouping label taken from the registry
//! - [`StackSize`] - Positive per-slot quantity
//! - [`ItemIndex`] - Category and identifier tables kept in lockstep
//! - [`Snapshot`] - Raw persisted form of the index
//!
//! ## Reconciliation
//!
//! [`reconcile`] rebuilds the index from a registry listing and overlays
//! persisted overrides. See [`reconcile`](mod@reconcile) module.

pub mod error;
pub mod index;
pub mod interchange;
pub mod reconcile;
pub mod types;

pub use error::{CoreError, Result, ValidationError};
pub use index::{CategoryTable, ItemCategoryTable, ItemIndex, ItemRecord, Snapshot};
pub use interchange::{export_index, import_document, Imported, InterchangeDocument};
pub use reconcile::{reconcile, ReconcileReport, Reconciled, RegistryEntry};
pub use types::{Category, ItemId, StackSize, ITEM_SUFFIX};
