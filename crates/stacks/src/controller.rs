//! The controller: owner of the item index and its collaborators.
//!
//! A [`StackController`] holds the index together with the registry, the
//! store, the permission source and the configuration. Every operation goes
//! through it, so there is no process-wide state; mutation needs `&mut self`,
//! which serializes all changes to the index.

use stacks_core::{
    export_index, import_document, reconcile, Category, ItemId, ItemIndex, ItemRecord,
    ReconcileReport, Snapshot, StackSize,
};
use stacks_perms::{authorize, Actor, Permissions};
use stacks_store::{Store, StoreExt};

use crate::config::Config;
use crate::error::{Result, StacksError};
use crate::registry::Registry;

/// Owns the item index and drives every operation on it.
pub struct StackController<R: Registry, S: Store, P: Permissions> {
    /// The host item registry.
    registry: R,
    /// Durable storage for the index and the interchange document.
    store: S,
    /// Source of permission grants.
    permissions: P,
    /// Loaded configuration.
    config: Config,
    /// The item index.
    index: ItemIndex,
}

impl<R: Registry, S: Store, P: Permissions> StackController<R, S, P> {
    /// Start up: load persisted state, reconcile it against the registry,
    /// and flush the result.
    pub fn start(registry: R, store: S, permissions: P, config: Config) -> Self {
        let prior = store.load_snapshot();
        let mut controller = Self {
            registry,
            store,
            permissions,
            config,
            index: ItemIndex::new(),
        };
        controller.rebuild(&prior);
        controller
    }

    pub fn index(&self) -> &ItemIndex {
        &self.index
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn permissions(&self) -> &P {
        &self.permissions
    }

    /// Flush the index and hand back the collaborators.
    pub fn shutdown(self) -> Result<(R, S, P)> {
        self.store.save_snapshot(&self.index.to_snapshot())?;
        Ok((self.registry, self.store, self.permissions))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reconciliation
    // ─────────────────────────────────────────────────────────────────────────

    fn rebuild(&mut self, prior: &Snapshot) -> ReconcileReport {
        let entries = self.registry.list_items();
        let reconciled = reconcile(&entries, prior);

        for (id, stack_size) in &reconciled.overrides {
            if let Err(e) = self.registry.set_live_stack(id, *stack_size) {
                tracing::warn!(item = %id, error = %e, "registry refused persisted stack size");
            }
        }

        self.index = reconciled.index;
        self.persist();

        let report = reconciled.report;
        tracing::info!(
            items = report.items,
            preserved = report.preserved,
            dropped = report.dropped,
            uncategorized = report.uncategorized,
            "item index rebuilt"
        );
        report
    }

    /// Write the index. Failures are logged, not returned.
    fn persist(&self) {
        if let Err(e) = self.store.save_snapshot(&self.index.to_snapshot()) {
            tracing::error!(error = %e, "failed to save item index");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Check that an actor may use Stacks.
    pub fn authorize(&self, actor: &Actor) -> Result<()> {
        Ok(authorize(actor, &self.permissions)?)
    }

    /// The item an actor is holding.
    pub fn held_item(&self, actor: &Actor) -> Result<ItemId> {
        self.registry
            .resolve_held_item(actor)
            .ok_or(StacksError::NoHeldItem)
    }

    pub fn stack_size(&self, id: &ItemId) -> Result<StackSize> {
        self.index
            .stack_size(id)
            .ok_or_else(|| StacksError::UnknownItem(id.clone()))
    }

    /// All categories, sorted.
    pub fn categories(&self) -> Vec<Category> {
        self.index.categories().cloned().collect()
    }

    pub fn items_in(&self, category: &Category) -> Result<Vec<(ItemId, StackSize)>> {
        Ok(self.index.items_in(category)?)
    }

    pub fn search(&self, needle: &str) -> Vec<ItemRecord> {
        self.index.search(needle)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    fn check_limit(&self, requested: StackSize) -> Result<()> {
        match self.config.max_stack() {
            Some(max) if requested > max => Err(StacksError::TooLarge { requested, max }),
            _ => Ok(()),
        }
    }

    /// Set one item's stack size in the registry and the index, then flush.
    ///
    /// Returns the previous value. If the registry refuses, nothing changes.
    pub fn set_stack_size(&mut self, id: &ItemId, stack_size: StackSize) -> Result<StackSize> {
        self.check_limit(stack_size)?;
        if !self.index.contains(id) {
            return Err(StacksError::UnknownItem(id.clone()));
        }

        tracing::debug!(item = %id, size = %stack_size, "setting stack size");
        self.registry.set_live_stack(id, stack_size).map_err(|e| {
            tracing::warn!(item = %id, error = %e, "registry refused stack size");
            e
        })?;

        let previous = self.index.set_stack_size(id, stack_size)?;
        self.persist();
        Ok(previous)
    }

    /// Set the stack size of every item in a category, then flush.
    ///
    /// Items the registry refuses keep their old value. Returns the items
    /// that were updated; fails with [`StacksError::NothingUpdated`] if the
    /// registry refused all of them.
    pub fn set_category_stack_size(
        &mut self,
        category: &Category,
        stack_size: StackSize,
    ) -> Result<Vec<ItemId>> {
        self.check_limit(stack_size)?;
        let items = self.index.items_in(category)?;
        let total = items.len();

        let mut updated = Vec::with_capacity(items.len());
        for (id, _) in items {
            if let Err(e) = self.registry.set_live_stack(&id, stack_size) {
                tracing::warn!(item = %id, error = %e, "registry refused stack size");
                continue;
            }
            self.index.set_stack_size(&id, stack_size)?;
            updated.push(id);
        }

        if updated.is_empty() {
            return Err(StacksError::NothingUpdated(category.clone()));
        }

        let refused = total - updated.len();
        if refused > 0 {
            tracing::warn!(%category, size = %stack_size, updated = updated.len(), refused, "category stack size partly set");
        } else {
            tracing::debug!(%category, size = %stack_size, count = updated.len(), "category stack size set");
        }
        self.persist();
        Ok(updated)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Interchange
    // ─────────────────────────────────────────────────────────────────────────

    /// Write the index to the interchange record. Returns the entry count.
    pub fn export(&self) -> Result<usize> {
        let registry = &self.registry;
        let document = export_index(&self.index, |id| registry.resolve_display_name(id));
        self.store.save_interchange(&document)?;

        tracing::info!(count = document.len(), "exported stack sizes");
        Ok(document.len())
    }

    /// Replace the index with the interchange record, then reconcile.
    ///
    /// Fails without touching the index if the record is missing, unreadable,
    /// or yields no usable entries.
    pub fn import(&mut self) -> Result<usize> {
        let document = match self.store.load_interchange() {
            Ok(Some(document)) => document,
            Ok(None) => {
                tracing::warn!("no interchange document to import");
                return Err(StacksError::ImportFailed);
            }
            Err(e) => {
                tracing::warn!(error = %e, "interchange document unreadable");
                return Err(StacksError::ImportFailed);
            }
        };

        let entries = self.registry.list_items();
        let registry = &self.registry;
        let imported = import_document(&document, &entries, |id| registry.resolve_display_name(id));

        let count = imported.index.len();
        if count == 0 {
            tracing::warn!(skipped = imported.skipped.len(), "interchange document yielded nothing");
            return Err(StacksError::ImportFailed);
        }

        tracing::info!(count, skipped = imported.skipped.len(), "imported stack sizes");
        self.index = imported.index;
        self.persist();

        let prior = self.index.to_snapshot();
        self.rebuild(&prior);
        Ok(count)
    }
}
