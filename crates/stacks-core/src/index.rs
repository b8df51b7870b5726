//! The item index: two-way mapping between identifiers, categories and
//! stack sizes.
//!
//! Two tables are kept in lockstep:
//!
//! - category → (identifier → stack size)
//! - identifier → category
//!
//! Every identifier appears under exactly one category in the first table
//! and maps to that same category in the second. All mutation goes through
//! methods on [`ItemIndex`], which preserve this.

use std::collections::BTreeMap;

use crate::error::{CoreError, Result};
use crate::types::{Category, ItemId, StackSize};

/// Persisted form of the category table. Values are raw and unvalidated.
pub type CategoryTable = BTreeMap<Category, BTreeMap<ItemId, i64>>;

/// Persisted form of the identifier → category table.
pub type ItemCategoryTable = BTreeMap<ItemId, Category>;

/// Previously persisted state, as read back from storage.
///
/// The two tables are stored as independent records, so either may be empty
/// while the other is intact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub categories: CategoryTable,
    pub item_categories: ItemCategoryTable,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.item_categories.is_empty()
    }

    /// Positive stack sizes recorded for each identifier, regardless of the
    /// category they were filed under.
    pub fn overrides(&self) -> BTreeMap<&ItemId, StackSize> {
        self.categories
            .values()
            .flat_map(|items| items.iter())
            .filter_map(|(id, &raw)| StackSize::try_from(raw).ok().map(|size| (id, size)))
            .collect()
    }
}

/// One item as seen through the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: ItemId,
    pub category: Category,
    pub stack_size: StackSize,
}

/// In-memory item index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemIndex {
    categories: BTreeMap<Category, BTreeMap<ItemId, StackSize>>,
    item_categories: BTreeMap<ItemId, Category>,
}

impl ItemIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an item.
    ///
    /// If the item was filed under a different category it is moved. Returns
    /// the previous stack size, if any.
    pub fn insert(
        &mut self,
        id: ItemId,
        category: Category,
        stack_size: StackSize,
    ) -> Option<StackSize> {
        let mut previous = None;
        if let Some(old_category) = self.item_categories.get(&id) {
            if *old_category != category {
                previous = self.detach(&id);
            }
        }

        let replaced = self
            .categories
            .entry(category.clone())
            .or_default()
            .insert(id.clone(), stack_size);
        self.item_categories.insert(id, category);

        replaced.or(previous)
    }

    /// Remove an item from its category, dropping the category if it empties.
    fn detach(&mut self, id: &ItemId) -> Option<StackSize> {
        let category = self.item_categories.remove(id)?;
        let items = self.categories.get_mut(&category)?;
        let removed = items.remove(id);
        if items.is_empty() {
            self.categories.remove(&category);
        }
        removed
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.item_categories.contains_key(id)
    }

    pub fn category_of(&self, id: &ItemId) -> Option<&Category> {
        self.item_categories.get(id)
    }

    pub fn has_category(&self, category: &Category) -> bool {
        self.categories.contains_key(category)
    }

    /// Stack size of an item, resolved through its category.
    pub fn stack_size(&self, id: &ItemId) -> Option<StackSize> {
        let category = self.item_categories.get(id)?;
        self.categories.get(category)?.get(id).copied()
    }

    pub fn get(&self, id: &ItemId) -> Option<ItemRecord> {
        let category = self.item_categories.get(id)?;
        let stack_size = self.categories.get(category)?.get(id).copied()?;
        Some(ItemRecord {
            id: id.clone(),
            category: category.clone(),
            stack_size,
        })
    }

    /// Set the stack size of a known item. Returns the previous value.
    pub fn set_stack_size(&mut self, id: &ItemId, stack_size: StackSize) -> Result<StackSize> {
        let category = self
            .item_categories
            .get(id)
            .ok_or_else(|| CoreError::UnknownItem(id.clone()))?;

        let slot = self
            .categories
            .get_mut(category)
            .and_then(|items| items.get_mut(id))
            .ok_or_else(|| {
                CoreError::Inconsistent(format!("{id} maps to {category} but is not listed there"))
            })?;

        Ok(std::mem::replace(slot, stack_size))
    }

    /// Set the stack size of every item in a category.
    ///
    /// Returns the identifiers that were updated, in sorted order.
    pub fn set_category_stack_size(
        &mut self,
        category: &Category,
        stack_size: StackSize,
    ) -> Result<Vec<ItemId>> {
        let items = self
            .categories
            .get_mut(category)
            .ok_or_else(|| CoreError::UnknownCategory(category.clone()))?;

        let mut updated = Vec::with_capacity(items.len());
        for (id, slot) in items.iter_mut() {
            *slot = stack_size;
            updated.push(id.clone());
        }
        Ok(updated)
    }

    /// All category names, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.keys()
    }

    /// Items of a category with their stack sizes, sorted by identifier.
    pub fn items_in(&self, category: &Category) -> Result<Vec<(ItemId, StackSize)>> {
        let items = self
            .categories
            .get(category)
            .ok_or_else(|| CoreError::UnknownCategory(category.clone()))?;
        Ok(items.iter().map(|(id, size)| (id.clone(), *size)).collect())
    }

    /// Case-insensitive substring search over identifiers, sorted by identifier.
    pub fn search(&self, needle: &str) -> Vec<ItemRecord> {
        self.item_categories
            .keys()
            .filter(|id| id.contains_ignore_case(needle))
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// Every record, ordered by category then identifier.
    pub fn records(&self) -> impl Iterator<Item = ItemRecord> + '_ {
        self.categories.iter().flat_map(|(category, items)| {
            items.iter().map(move |(id, size)| ItemRecord {
                id: id.clone(),
                category: category.clone(),
                stack_size: *size,
            })
        })
    }

    pub fn len(&self) -> usize {
        self.item_categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_categories.is_empty()
    }

    /// Convert into the persisted representation.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            categories: self
                .categories
                .iter()
                .map(|(category, items)| {
                    let items = items
                        .iter()
                        .map(|(id, size)| (id.clone(), i64::from(*size)))
                        .collect();
                    (category.clone(), items)
                })
                .collect(),
            item_categories: self.item_categories.clone(),
        }
    }

    /// Verify that both tables describe the same set of items.
    pub fn check_consistency(&self) -> Result<()> {
        for (id, category) in &self.item_categories {
            let listed = self
                .categories
                .get(category)
                .is_some_and(|items| items.contains_key(id));
            if !listed {
                return Err(CoreError::Inconsistent(format!(
                    "{id} maps to {category} but is not listed there"
                )));
            }
        }

        for (category, items) in &self.categories {
            if items.is_empty() {
                return Err(CoreError::Inconsistent(format!("category {category} is empty")));
            }
            for id in items.keys() {
                if self.item_categories.get(id) != Some(category) {
                    return Err(CoreError::Inconsistent(format!(
                        "{id} is listed under {category} but not mapped to it"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: u32) -> StackSize {
        StackSize::new(n).unwrap()
    }

    fn sample() -> ItemIndex {
        let mut index = ItemIndex::new();
        index.insert("wood.item".into(), "resources".into(), size(1000));
        index.insert("stones.item".into(), "resources".into(), size(1000));
        index.insert("hatchet.item".into(), "tool".into(), size(1));
        index.insert("woodtea.item".into(), "food".into(), size(10));
        index
    }

    #[test]
    fn test_insert_and_lookup() {
        let index = sample();
        assert_eq!(index.len(), 4);
        assert_eq!(index.stack_size(&"wood.item".into()), Some(size(1000)));
        assert_eq!(index.category_of(&"hatchet.item".into()), Some(&"tool".into()));
        assert!(index.check_consistency().is_ok());
    }

    #[test]
    fn test_insert_moves_between_categories() {
        let mut index = sample();
        let previous = index.insert("hatchet.item".into(), "weapon".into(), size(2));
        assert_eq!(previous, Some(size(1)));
        assert_eq!(index.category_of(&"hatchet.item".into()), Some(&"weapon".into()));
        assert!(!index.has_category(&"tool".into()));
        assert!(index.check_consistency().is_ok());
    }

    #[test]
    fn test_set_stack_size() {
        let mut index = sample();
        let previous = index.set_stack_size(&"wood.item".into(), size(50)).unwrap();
        assert_eq!(previous, size(1000));
        assert_eq!(index.get(&"wood.item".into()).unwrap().stack_size, size(50));
    }

    #[test]
    fn test_set_stack_size_unknown_item() {
        let mut index = sample();
        let err = index.set_stack_size(&"nope.item".into(), size(5)).unwrap_err();
        assert_eq!(err, CoreError::UnknownItem("nope.item".into()));
    }

    #[test]
    fn test_set_category_stack_size_only_touches_category() {
        let mut index = sample();
        let updated = index
            .set_category_stack_size(&"resources".into(), size(10))
            .unwrap();
        assert_eq!(updated, vec![ItemId::new("stones.item"), ItemId::new("wood.item")]);
        assert_eq!(index.stack_size(&"wood.item".into()), Some(size(10)));
        assert_eq!(index.stack_size(&"stones.item".into()), Some(size(10)));
        assert_eq!(index.stack_size(&"hatchet.item".into()), Some(size(1)));
        assert_eq!(index.stack_size(&"woodtea.item".into()), Some(size(10)));
    }

    #[test]
    fn test_unknown_category() {
        let mut index = sample();
        assert!(matches!(
            index.items_in(&"traps".into()),
            Err(CoreError::UnknownCategory(_))
        ));
        assert!(matches!(
            index.set_category_stack_size(&"traps".into(), size(3)),
            Err(CoreError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_categories_sorted() {
        let index = sample();
        let cats: Vec<&str> = index.categories().map(Category::as_str).collect();
        assert_eq!(cats, vec!["food", "resources", "tool"]);
    }

    #[test]
    fn test_search_case_insensitive() {
        let index = sample();
        let hits = index.search("WOOD");
        let ids: Vec<&str> = hits.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["wood.item", "woodtea.item"]);
        assert_eq!(hits[1].category, Category::new("food"));
        assert!(index.search("zzz").is_empty());
    }

    #[test]
    fn test_snapshot_overrides_skip_non_positive() {
        let mut snapshot = sample().to_snapshot();
        snapshot
            .categories
            .get_mut(&Category::new("tool"))
            .unwrap()
            .insert("hatchet.item".into(), 0);
        let overrides = snapshot.overrides();
        assert_eq!(overrides.len(), 3);
        assert!(!overrides.contains_key(&ItemId::new("hatchet.item")));
    }

    #[test]
    fn test_records_ordered_by_category() {
        let index = sample();
        let order: Vec<String> = index.records().map(|r| r.id.to_string()).collect();
        assert_eq!(
            order,
            vec!["woodtea.item", "stones.item", "wood.item", "hatchet.item"]
        );
    }
}
