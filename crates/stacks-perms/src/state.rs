//! Grant table: a static permission source.
//!
//! Maps actor identifiers to the permissions they hold. The host's real
//! permission system is an external collaborator; this table stands in for
//! it in the command-line binary and in tests.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::Permissions;

/// Permissions granted per actor.
///
/// Serialized as `{ "<actor id>": ["<permission>", ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantTable {
    by_actor: BTreeMap<String, BTreeSet<String>>,
}

impl GrantTable {
    /// Create a new empty grant table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a grant table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Grant a permission. Returns `false` if it was already held.
    pub fn grant(&mut self, actor_id: impl Into<String>, permission: impl Into<String>) -> bool {
        self.by_actor
            .entry(actor_id.into())
            .or_default()
            .insert(permission.into())
    }

    /// Revoke a permission. Returns `false` if it was not held.
    pub fn revoke(&mut self, actor_id: &str, permission: &str) -> bool {
        let Some(held) = self.by_actor.get_mut(actor_id) else {
            return false;
        };
        let removed = held.remove(permission);
        if held.is_empty() {
            self.by_actor.remove(actor_id);
        }
        removed
    }

    /// Permissions held by an actor, sorted.
    pub fn permissions_of(&self, actor_id: &str) -> impl Iterator<Item = &str> {
        self.by_actor
            .get(actor_id)
            .into_iter()
            .flat_map(|held| held.iter().map(String::as_str))
    }
}

impl Permissions for GrantTable {
    fn has_permission(&self, actor_id: &str, permission: &str) -> bool {
        self.by_actor
            .get(actor_id)
            .is_some_and(|held| held.contains(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ADMIN_PERMISSION;

    #[test]
    fn test_grant_and_check() {
        let mut table = GrantTable::new();
        assert!(!table.has_permission("76561198000000001", ADMIN_PERMISSION));

        assert!(table.grant("76561198000000001", ADMIN_PERMISSION));
        assert!(!table.grant("76561198000000001", ADMIN_PERMISSION));
        assert!(table.has_permission("76561198000000001", ADMIN_PERMISSION));
        assert!(!table.has_permission("76561198000000002", ADMIN_PERMISSION));
    }

    #[test]
    fn test_revoke_removes_access() {
        let mut table = GrantTable::new();
        table.grant("alice", ADMIN_PERMISSION);
        assert!(table.revoke("alice", ADMIN_PERMISSION));
        assert!(!table.revoke("alice", ADMIN_PERMISSION));
        assert!(!table.has_permission("alice", ADMIN_PERMISSION));
        assert_eq!(table.permissions_of("alice").count(), 0);
    }

    #[test]
    fn test_from_json() {
        let table = GrantTable::from_json(r#"{ "alice": ["stacks.admin", "other.perm"] }"#).unwrap();
        assert!(table.has_permission("alice", ADMIN_PERMISSION));
        assert_eq!(
            table.permissions_of("alice").collect::<Vec<_>>(),
            vec!["other.perm", "stacks.admin"]
        );
        assert!(GrantTable::from_json("[1, 2]").is_err());
    }
}
