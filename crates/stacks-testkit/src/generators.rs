//! Proptest generators for property-based testing.

use proptest::prelude::*;

use stacks_core::StackSize;

use crate::fixtures::FakeRegistry;

/// Generate a positive stack size up to the default maximum.
pub fn stack_size() -> impl Strategy<Value = StackSize> {
    (1u32..=100_000).prop_filter_map("stack size must be positive", StackSize::new)
}

/// Generate a bare item name (no `.item` suffix).
pub fn item_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}(\\.[a-z]{1,5})?".prop_map(String::from)
}

/// Generate a registry category label, sometimes empty.
pub fn category_label() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop_oneof![
            Just("Resources"),
            Just("Tool"),
            Just("Weapon"),
            Just("Construction"),
            Just("Items"),
            Just("Food"),
        ]
        .prop_map(String::from),
        1 => Just(String::new()),
    ]
}

/// Generate user input that is not a valid stack size.
pub fn invalid_size_input() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("0".to_string()),
        (1i64..=1_000_000).prop_map(|n| format!("-{n}")),
        "[a-z]{1,6}".prop_map(String::from),
        Just("99999999999".to_string()),
    ]
}

/// One generated item type.
#[derive(Debug, Clone)]
pub struct ItemParams {
    pub id: String,
    pub category: String,
    pub stack_size: StackSize,
    pub displayable: bool,
}

/// Parameters for generating a registry. Identifiers are unique.
#[derive(Debug, Clone)]
pub struct RegistryParams {
    pub items: Vec<ItemParams>,
}

impl RegistryParams {
    /// Number of items with a category.
    pub fn categorized(&self) -> usize {
        self.items.iter().filter(|item| !item.category.is_empty()).count()
    }
}

impl Arbitrary for RegistryParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::collection::btree_map(
            item_name(),
            (category_label(), stack_size(), any::<bool>()),
            1..24,
        )
        .prop_map(|items| RegistryParams {
            items: items
                .into_iter()
                .map(|(name, (category, stack_size, displayable))| ItemParams {
                    id: format!("{name}.item"),
                    category,
                    stack_size,
                    displayable,
                })
                .collect(),
        })
        .boxed()
    }
}

/// Build a fake registry from parameters. Display names are unique.
pub fn registry_from_params(params: &RegistryParams) -> FakeRegistry {
    params.items.iter().fold(FakeRegistry::new(), |registry, item| {
        let display_name = item.displayable.then(|| format!("Display {}", item.id));
        registry.with_item(
            &item.id,
            display_name.as_deref(),
            &item.category,
            item.stack_size.get(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_invalid_size_input_never_parses(input in invalid_size_input()) {
            prop_assert!(StackSize::parse(&input).is_err());
        }

        #[test]
        fn test_registry_from_params_keeps_every_item(params: RegistryParams) {
            let registry = registry_from_params(&params);
            prop_assert_eq!(registry.items().len(), params.items.len());
        }
    }
}
