//! Property tests over generated registries.

use proptest::prelude::*;
use proptest::sample::Index;

use stacks::{MessageKey, Registry};
use stacks_core::{Category, ItemId, StackSize};
use stacks_testkit::fixtures::{admin, TestFixture};
use stacks_testkit::generators::{
    invalid_size_input, registry_from_params, stack_size, RegistryParams,
};

fn fixture(params: &RegistryParams) -> TestFixture {
    TestFixture::with_registry(registry_from_params(params))
}

/// Pick a categorized item, if there is one.
fn pick_categorized(params: &RegistryParams, pick: &Index) -> Option<(ItemId, Category)> {
    let categorized: Vec<_> = params
        .items
        .iter()
        .filter(|item| !item.category.is_empty())
        .collect();
    if categorized.is_empty() {
        return None;
    }
    let item = categorized[pick.index(categorized.len())];
    Some((
        ItemId::new(item.id.clone()),
        Category::new(item.category.to_lowercase()),
    ))
}

proptest! {
    #[test]
    fn test_reconcile_indexes_every_categorized_item(params: RegistryParams) {
        let fixture = fixture(&params);
        let index = fixture.index();

        prop_assert_eq!(index.len(), params.categorized());
        prop_assert!(index.check_consistency().is_ok());

        for item in &params.items {
            let id = ItemId::new(item.id.clone());
            if item.category.is_empty() {
                prop_assert!(!index.contains(&id));
            } else {
                prop_assert_eq!(index.stack_size(&id), Some(item.stack_size));
                let expected = Category::new(item.category.to_lowercase());
                prop_assert_eq!(index.category_of(&id), Some(&expected));
            }
        }
    }

    #[test]
    fn test_set_then_read_both_paths(
        params: RegistryParams,
        pick: Index,
        size in stack_size(),
    ) {
        let Some((id, category)) = pick_categorized(&params, &pick) else {
            return Ok(());
        };
        let mut fixture = fixture(&params);

        let response = fixture.run(&admin(), &format!("stack {} {}", id, size));
        prop_assert_eq!(response.key, MessageKey::StackSet);

        prop_assert_eq!(fixture.index().stack_size(&id), Some(size));
        let listed = fixture.controller.items_in(&category).unwrap();
        prop_assert!(listed.contains(&(id.clone(), size)));
        prop_assert_eq!(fixture.registry().live_stack(id.as_str()), Some(size));
        prop_assert!(fixture.index().check_consistency().is_ok());
    }

    #[test]
    fn test_invalid_input_never_changes_value(
        params: RegistryParams,
        pick: Index,
        input in invalid_size_input(),
    ) {
        let Some((id, category)) = pick_categorized(&params, &pick) else {
            return Ok(());
        };
        let mut fixture = fixture(&params);
        let before = fixture.index().clone();

        let response = fixture.run(&admin(), &format!("stack {} {}", id, input));
        prop_assert_eq!(response.key, MessageKey::Current);
        let response = fixture.run(&admin(), &format!("stcat {} {}", category, input));
        prop_assert_eq!(response.key, MessageKey::ItemList);

        prop_assert_eq!(fixture.index(), &before);
        prop_assert_eq!(fixture.registry().update_count(), 0);
    }

    #[test]
    fn test_bulk_set_stays_inside_category(
        params: RegistryParams,
        pick: Index,
        size in stack_size(),
    ) {
        let Some((_, category)) = pick_categorized(&params, &pick) else {
            return Ok(());
        };
        let mut fixture = fixture(&params);
        let before = fixture.index().clone();

        let response = fixture.run(&admin(), &format!("stcat {} {}", category, size));
        prop_assert_eq!(response.key, MessageKey::CatStack);

        for record in before.records() {
            let now = fixture.index().stack_size(&record.id);
            if record.category == category {
                prop_assert_eq!(now, Some(size));
            } else {
                prop_assert_eq!(now, Some(record.stack_size));
            }
        }
    }

    #[test]
    fn test_export_import_round_trip(
        params: RegistryParams,
        size in stack_size(),
    ) {
        let mut fixture = fixture(&params);
        let exported: Vec<(ItemId, StackSize)> = fixture
            .index()
            .records()
            .filter(|record| fixture.registry().resolve_display_name(&record.id).is_some())
            .map(|record| (record.id, record.stack_size))
            .collect();
        prop_assume!(!exported.is_empty());

        let response = fixture.run(&admin(), "stexport");
        prop_assert_eq!(response.args[0].clone(), exported.len().to_string());

        let categories: Vec<Category> = fixture.controller.categories();
        for category in &categories {
            fixture.run(&admin(), &format!("stcat {} {}", category, size));
        }

        let response = fixture.run(&admin(), "stimport");
        prop_assert_eq!(response.key, MessageKey::Imported);
        for (id, stack_size) in &exported {
            prop_assert_eq!(fixture.index().stack_size(id), Some(*stack_size));
            prop_assert_eq!(fixture.registry().live_stack(id.as_str()), Some(*stack_size));
        }
        prop_assert_eq!(fixture.index().len(), params.categorized());
    }

    #[test]
    fn test_search_matches_substring(
        params: RegistryParams,
        needle in "[a-zA-Z0-9]{1,3}",
    ) {
        let mut fixture = fixture(&params);

        let response = fixture.run(&admin(), &format!("stack search {}", needle));
        prop_assert_eq!(response.key, MessageKey::Found);

        let lowered = needle.to_lowercase();
        let expected = fixture
            .index()
            .records()
            .filter(|record| record.id.as_str().to_lowercase().contains(&lowered))
            .count();
        prop_assert_eq!(response.args[0].clone(), expected.to_string());
        prop_assert_eq!(response.args[1].lines().count(), expected);
    }

    #[test]
    fn test_restart_preserves_every_set(
        params: RegistryParams,
        pick: Index,
        size in stack_size(),
    ) {
        let Some((id, _)) = pick_categorized(&params, &pick) else {
            return Ok(());
        };
        let mut fixture = fixture(&params);
        fixture.run(&admin(), &format!("stack {} {}", id, size));

        let reset = registry_from_params(&params);
        let fixture = fixture.restart_with(|registry| *registry = reset);

        prop_assert_eq!(fixture.index().stack_size(&id), Some(size));
        prop_assert_eq!(fixture.registry().live_stack(id.as_str()), Some(size));
        prop_assert_eq!(fixture.index().len(), params.categorized());
    }
}
