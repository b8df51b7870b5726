//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::collections::{BTreeMap, BTreeSet};

use stacks::{
    dispatch, Config, Messages, Registry, RegistryError, Response, StackController,
};
use stacks_core::{ItemId, ItemIndex, RegistryEntry, StackSize};
use stacks_perms::{Actor, GrantTable};
use stacks_store::MemoryStore;

/// One item type in a [`FakeRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeItem {
    pub id: ItemId,
    pub display_name: Option<String>,
    pub category: String,
    pub stack_size: StackSize,
}

/// In-memory registry that counts live updates.
#[derive(Debug, Clone, Default)]
pub struct FakeRegistry {
    items: Vec<FakeItem>,
    held: BTreeMap<String, ItemId>,
    reject_updates: bool,
    rejected_items: BTreeSet<ItemId>,
    updates: usize,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item type.
    pub fn with_item(
        mut self,
        id: &str,
        display_name: Option<&str>,
        category: &str,
        stack_size: u32,
    ) -> Self {
        self.items.push(FakeItem {
            id: ItemId::new(id),
            display_name: display_name.map(str::to_string),
            category: category.to_string(),
            stack_size: size(stack_size),
        });
        self
    }

    /// Record the item an actor is holding.
    pub fn hold(&mut self, actor_id: &str, id: &str) {
        self.held.insert(actor_id.to_string(), ItemId::new(id));
    }

    /// Refuse every subsequent `set_live_stack`.
    pub fn reject_updates(&mut self, reject: bool) {
        self.reject_updates = reject;
    }

    /// Refuse subsequent `set_live_stack` calls for one item.
    pub fn reject_item(&mut self, id: &str) {
        self.rejected_items.insert(ItemId::new(id));
    }

    /// Live stack size the registry currently enforces.
    pub fn live_stack(&self, id: &str) -> Option<StackSize> {
        self.items
            .iter()
            .find(|item| item.id.as_str() == id)
            .map(|item| item.stack_size)
    }

    /// Overwrite an item's stack size as if the host had changed it.
    pub fn set_default(&mut self, id: &str, stack_size: u32) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id.as_str() == id) {
            item.stack_size = size(stack_size);
        }
    }

    /// Drop an item type, as if a game update removed it.
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|item| item.id.as_str() != id);
    }

    /// Number of accepted live updates.
    pub fn update_count(&self) -> usize {
        self.updates
    }

    pub fn items(&self) -> &[FakeItem] {
        &self.items
    }
}

impl Registry for FakeRegistry {
    fn list_items(&self) -> Vec<RegistryEntry> {
        self.items
            .iter()
            .map(|item| RegistryEntry::new(item.id.clone(), item.category.clone(), item.stack_size))
            .collect()
    }

    fn set_live_stack(&mut self, id: &ItemId, stack_size: StackSize) -> Result<(), RegistryError> {
        if self.reject_updates || self.rejected_items.contains(id) {
            return Err(RegistryError::Rejected {
                item: id.clone(),
                reason: "updates disabled".to_string(),
            });
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == *id)
            .ok_or_else(|| RegistryError::UnknownItem(id.clone()))?;
        item.stack_size = stack_size;
        self.updates += 1;
        Ok(())
    }

    fn resolve_held_item(&self, actor: &Actor) -> Option<ItemId> {
        self.held.get(&actor.id).cloned()
    }

    fn resolve_display_name(&self, id: &ItemId) -> Option<String> {
        self.items
            .iter()
            .find(|item| item.id == *id)
            .and_then(|item| item.display_name.clone())
    }
}

/// A small registry covering every command path.
///
/// | id                  | display name       | category     | size |
/// |---------------------|--------------------|--------------|------|
/// | `wood.item`         | Wood               | Resources    | 20   |
/// | `stones.item`       | Stones             | Resources    | 1000 |
/// | `metal.ore.item`    | Metal Ore          | Resources    | 1000 |
/// | `box.wooden.item`   | Wood Storage Box   | Items        | 1    |
/// | `hatchet.item`      | Hatchet            | Tool         | 1    |
/// | `rifle.ak.item`     | Assault Rifle      | Weapon       | 1    |
/// | `blueprint.item`    | (none)             | Misc         | 1    |
/// | `debug.item`        | Debug Tool         | (none)       | 1    |
pub fn sample_registry() -> FakeRegistry {
    FakeRegistry::new()
        .with_item("wood.item", Some("Wood"), "Resources", 20)
        .with_item("stones.item", Some("Stones"), "Resources", 1000)
        .with_item("metal.ore.item", Some("Metal Ore"), "Resources", 1000)
        .with_item("box.wooden.item", Some("Wood Storage Box"), "Items", 1)
        .with_item("hatchet.item", Some("Hatchet"), "Tool", 1)
        .with_item("rifle.ak.item", Some("Assault Rifle"), "Weapon", 1)
        .with_item("blueprint.item", None, "Misc", 1)
        .with_item("debug.item", Some("Debug Tool"), "", 1)
}

/// An actor with the host administrator flag.
pub fn admin() -> Actor {
    Actor::admin("admin")
}

/// An actor with no rights.
pub fn player() -> Actor {
    Actor::player("player")
}

/// Shorthand for a known-positive stack size.
pub fn size(n: u32) -> StackSize {
    StackSize::new(n).expect("stack size must be positive")
}

/// A controller over a fake registry and a memory store.
pub struct TestFixture {
    pub controller: StackController<FakeRegistry, MemoryStore, GrantTable>,
    pub messages: Messages,
}

impl TestFixture {
    /// Fixture over [`sample_registry`] with default config.
    pub fn new() -> Self {
        Self::with_registry(sample_registry())
    }

    pub fn with_registry(registry: FakeRegistry) -> Self {
        Self::with_parts(registry, MemoryStore::new(), GrantTable::new(), Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_parts(sample_registry(), MemoryStore::new(), GrantTable::new(), config)
    }

    pub fn with_parts(
        registry: FakeRegistry,
        store: MemoryStore,
        grants: GrantTable,
        config: Config,
    ) -> Self {
        Self {
            controller: StackController::start(registry, store, grants, config),
            messages: Messages::default(),
        }
    }

    /// Run one command line, e.g. `"stack wood 50"`.
    pub fn run(&mut self, actor: &Actor, line: &str) -> Response {
        let mut parts = line.split_whitespace();
        let name = parts.next().expect("empty command line");
        let args: Vec<&str> = parts.collect();
        dispatch(&mut self.controller, actor, name, &args).expect("not a stacks command")
    }

    /// Run one command line and render the response.
    pub fn run_text(&mut self, actor: &Actor, line: &str) -> String {
        let response = self.run(actor, line);
        self.messages.render(&response)
    }

    /// Shut down and start again over the same store, letting the caller
    /// change the registry in between.
    pub fn restart_with<F>(self, change: F) -> Self
    where
        F: FnOnce(&mut FakeRegistry),
    {
        let config = self.controller.config().clone();
        let (mut registry, store, grants) =
            self.controller.shutdown().expect("shutdown failed");
        change(&mut registry);
        Self {
            controller: StackController::start(registry, store, grants, config),
            messages: self.messages,
        }
    }

    pub fn restart(self) -> Self {
        self.restart_with(|_| {})
    }

    pub fn index(&self) -> &ItemIndex {
        self.controller.index()
    }

    pub fn registry(&self) -> &FakeRegistry {
        self.controller.registry()
    }

    pub fn registry_mut(&mut self) -> &mut FakeRegistry {
        self.controller.registry_mut()
    }

    pub fn store(&self) -> &MemoryStore {
        self.controller.store()
    }

    /// Stack size of an item in the index.
    pub fn stack_of(&self, id: &str) -> Option<u32> {
        self.index().stack_size(&ItemId::new(id)).map(StackSize::get)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_registry_reconciles() {
        let fixture = TestFixture::new();

        // debug.item has no category
        assert_eq!(fixture.index().len(), 7);
        assert!(fixture.index().check_consistency().is_ok());
        assert_eq!(fixture.stack_of("wood.item"), Some(20));
        assert_eq!(fixture.stack_of("debug.item"), None);
    }

    #[test]
    fn test_fake_registry_rejects_updates() {
        let mut registry = sample_registry();
        registry.reject_updates(true);

        let result = registry.set_live_stack(&ItemId::new("wood.item"), size(5));
        assert!(matches!(result, Err(RegistryError::Rejected { .. })));
        assert_eq!(registry.live_stack("wood.item"), Some(size(20)));
        assert_eq!(registry.update_count(), 0);
    }

    #[test]
    fn test_restart_keeps_store() {
        let mut fixture = TestFixture::new();
        fixture.run(&admin(), "stack wood 50");

        let fixture = fixture.restart();
        assert_eq!(fixture.stack_of("wood.item"), Some(50));
    }
}
