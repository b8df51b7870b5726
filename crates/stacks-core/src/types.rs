//! Strong type definitions for Stacks.
//!
//! Identifiers, categories and stack sizes are newtypes so that a display
//! name can never be passed where an identifier is expected, and a zero stack
//! size can never be constructed.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::ValidationError;

/// Suffix every item identifier carries.
pub const ITEM_SUFFIX: &str = ".item";

/// Stable internal key of an item type, e.g. `wood.item`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap an identifier as reported by the registry. No normalization.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Normalize raw user text into an identifier.
    ///
    /// `wood` and `wood.item` name the same record.
    pub fn normalize(raw: &str) -> Self {
        if raw.ends_with(ITEM_SUFFIX) {
            Self(raw.to_string())
        } else {
            Self(format!("{raw}{ITEM_SUFFIX}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring test.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(&needle.to_lowercase())
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Coarse grouping label, e.g. `resources`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derive a category from a registry label.
    ///
    /// Registry labels are lower-cased. Returns `None` for an empty label;
    /// such entries are not tracked.
    pub fn from_registry(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            None
        } else {
            Some(Self(label.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({})", self.0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Maximum quantity of an item per inventory slot. Always positive.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct StackSize(u32);

impl StackSize {
    pub const ONE: Self = Self(1);

    /// Returns `None` for zero.
    pub const fn new(size: u32) -> Option<Self> {
        if size == 0 {
            None
        } else {
            Some(Self(size))
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Parse user input. Unparseable and non-positive values are rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
        Self::try_from(value)
    }
}

impl TryFrom<i64> for StackSize {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(ValidationError::NonPositive(value));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::OutOfRange(value))
    }
}

impl From<StackSize> for u32 {
    fn from(size: StackSize) -> Self {
        size.0
    }
}

impl From<StackSize> for i64 {
    fn from(size: StackSize) -> Self {
        i64::from(size.0)
    }
}

impl fmt::Debug for StackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StackSize({})", self.0)
    }
}

impl fmt::Display for StackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_appends_suffix() {
        assert_eq!(ItemId::normalize("wood").as_str(), "wood.item");
        assert_eq!(ItemId::normalize("wood.item").as_str(), "wood.item");
        assert_eq!(ItemId::normalize("ite").as_str(), "ite.item");
        assert_eq!(ItemId::normalize("").as_str(), ".item");
    }

    #[test]
    fn test_contains_ignore_case() {
        let id = ItemId::new("Wood.item");
        assert!(id.contains_ignore_case("WOOD"));
        assert!(id.contains_ignore_case("d.it"));
        assert!(!id.contains_ignore_case("stone"));
    }

    #[test]
    fn test_category_from_registry() {
        assert_eq!(Category::from_registry("Resources"), Some(Category::new("resources")));
        assert_eq!(Category::from_registry("  "), None);
        assert_eq!(Category::from_registry(""), None);
    }

    #[test]
    fn test_stack_size_parse() {
        assert_eq!(StackSize::parse("50").unwrap().get(), 50);
        assert_eq!(StackSize::parse(" 7 ").unwrap().get(), 7);
        assert_eq!(StackSize::parse("0"), Err(ValidationError::NonPositive(0)));
        assert_eq!(StackSize::parse("-3"), Err(ValidationError::NonPositive(-3)));
        assert!(matches!(StackSize::parse("wood"), Err(ValidationError::NotANumber(_))));
        assert!(matches!(
            StackSize::parse("99999999999"),
            Err(ValidationError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_stack_size_serde() {
        let size: StackSize = serde_json::from_str("1000").unwrap();
        assert_eq!(size.get(), 1000);
        assert_eq!(serde_json::to_string(&size).unwrap(), "1000");
        assert!(serde_json::from_str::<StackSize>("0").is_err());
        assert!(serde_json::from_str::<StackSize>("-1").is_err());
    }

    #[test]
    fn test_item_id_display() {
        let id = ItemId::new("stones.item");
        assert_eq!(format!("{}", id), "stones.item");
        assert_eq!(format!("{:?}", id), "ItemId(stones.item)");
    }
}
