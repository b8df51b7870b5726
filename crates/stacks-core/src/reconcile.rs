//! Reconciliation: rebuild the item index from the registry at startup.
//!
//! The registry is authoritative for which items exist and which category
//! they belong to. Persisted state only contributes stack-size overrides.

use std::collections::BTreeSet;

use crate::index::{ItemIndex, Snapshot};
use crate::types::{Category, ItemId, StackSize};

/// One item type as reported by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub id: ItemId,
    /// Raw category label; lower-cased during reconciliation.
    pub category: String,
    /// The registry's current stack size for this item.
    pub default_stack: StackSize,
}

impl RegistryEntry {
    pub fn new(id: impl Into<ItemId>, category: impl Into<String>, default_stack: StackSize) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            default_stack,
        }
    }
}

/// Counters describing what a reconciliation did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Items in the rebuilt index.
    pub items: usize,
    /// Items whose persisted stack size was kept.
    pub preserved: usize,
    /// Persisted items no longer present in the registry.
    pub dropped: usize,
    /// Registry entries skipped for lack of a category.
    pub uncategorized: usize,
}

/// Output of [`reconcile`].
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub index: ItemIndex,
    /// Preserved overrides that differ from the registry's value. The caller
    /// pushes these back into the live registry.
    pub overrides: Vec<(ItemId, StackSize)>,
    pub report: ReconcileReport,
}

/// Rebuild the index from a registry listing and prior persisted state.
pub fn reconcile(entries: &[RegistryEntry], prior: &Snapshot) -> Reconciled {
    let prior_sizes = prior.overrides();
    let mut index = ItemIndex::new();
    let mut overrides = Vec::new();
    let mut report = ReconcileReport::default();

    for entry in entries {
        let Some(category) = Category::from_registry(&entry.category) else {
            tracing::debug!(item = %entry.id, "skipping registry entry without category");
            report.uncategorized += 1;
            continue;
        };

        if index.contains(&entry.id) {
            continue;
        }

        let stack_size = match prior_sizes.get(&entry.id) {
            Some(&previous) => {
                tracing::debug!(item = %entry.id, size = %previous, "keeping previously set stack size");
                report.preserved += 1;
                if previous != entry.default_stack {
                    overrides.push((entry.id.clone(), previous));
                }
                previous
            }
            None => {
                tracing::debug!(item = %entry.id, size = %entry.default_stack, "using registry stack size");
                entry.default_stack
            }
        };

        index.insert(entry.id.clone(), category, stack_size);
    }

    let known: BTreeSet<&ItemId> = entries.iter().map(|entry| &entry.id).collect();
    let mut previously_tracked: BTreeSet<&ItemId> = prior.item_categories.keys().collect();
    previously_tracked.extend(prior.categories.values().flat_map(|items| items.keys()));
    report.dropped = previously_tracked
        .into_iter()
        .filter(|id| !known.contains(id))
        .count();
    report.items = index.len();

    Reconciled {
        index,
        overrides,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: u32) -> StackSize {
        StackSize::new(n).unwrap()
    }

    fn registry() -> Vec<RegistryEntry> {
        vec![
            RegistryEntry::new("wood.item", "Resources", size(1000)),
            RegistryEntry::new("stones.item", "Resources", size(1000)),
            RegistryEntry::new("hatchet.item", "Tool", size(1)),
            RegistryEntry::new("debug.item", "", size(1)),
        ]
    }

    #[test]
    fn test_reconcile_empty_prior_uses_defaults() {
        let result = reconcile(&registry(), &Snapshot::default());
        assert_eq!(result.index.len(), 3);
        assert_eq!(result.index.stack_size(&"wood.item".into()), Some(size(1000)));
        assert_eq!(
            result.index.category_of(&"hatchet.item".into()),
            Some(&Category::new("tool"))
        );
        assert!(result.overrides.is_empty());
        assert_eq!(result.report.uncategorized, 1);
        assert!(result.index.check_consistency().is_ok());
    }

    #[test]
    fn test_reconcile_preserves_overrides() {
        let mut prior = Snapshot::default();
        prior
            .categories
            .entry("resources".into())
            .or_default()
            .insert("wood.item".into(), 50);
        prior
            .item_categories
            .insert("wood.item".into(), "resources".into());

        let result = reconcile(&registry(), &prior);
        assert_eq!(result.index.stack_size(&"wood.item".into()), Some(size(50)));
        assert_eq!(result.index.stack_size(&"stones.item".into()), Some(size(1000)));
        assert_eq!(result.overrides, vec![(ItemId::new("wood.item"), size(50))]);
        assert_eq!(result.report.preserved, 1);
    }

    #[test]
    fn test_reconcile_ignores_non_positive_overrides() {
        let mut prior = Snapshot::default();
        prior
            .categories
            .entry("resources".into())
            .or_default()
            .insert("wood.item".into(), 0);

        let result = reconcile(&registry(), &prior);
        assert_eq!(result.index.stack_size(&"wood.item".into()), Some(size(1000)));
        assert_eq!(result.report.preserved, 0);
    }

    #[test]
    fn test_reconcile_drops_stale_items() {
        let mut prior = Snapshot::default();
        prior
            .categories
            .entry("resources".into())
            .or_default()
            .insert("oldthing.item".into(), 7);
        prior
            .item_categories
            .insert("oldthing.item".into(), "resources".into());

        let result = reconcile(&registry(), &prior);
        assert!(!result.index.contains(&"oldthing.item".into()));
        assert_eq!(result.report.dropped, 1);
    }

    #[test]
    fn test_reconcile_registry_category_wins() {
        let mut prior = Snapshot::default();
        prior
            .categories
            .entry("weapon".into())
            .or_default()
            .insert("hatchet.item".into(), 4);
        prior
            .item_categories
            .insert("hatchet.item".into(), "weapon".into());

        let result = reconcile(&registry(), &prior);
        assert_eq!(
            result.index.category_of(&"hatchet.item".into()),
            Some(&Category::new("tool"))
        );
        assert_eq!(result.index.stack_size(&"hatchet.item".into()), Some(size(4)));
    }

    #[test]
    fn test_reconcile_survives_missing_item_category_record() {
        let mut prior = Snapshot::default();
        prior
            .categories
            .entry("resources".into())
            .or_default()
            .insert("stones.item".into(), 250);

        let result = reconcile(&registry(), &prior);
        assert_eq!(result.index.stack_size(&"stones.item".into()), Some(size(250)));
    }
}
