//! # Stacks Permissions
//!
//! Authorization for Stacks commands.
//!
//! Every command requires the invoking [`Actor`] to either carry the host
//! administrator flag or hold [`ADMIN_PERMISSION`] in the host's permission
//! system. The permission system itself is external and is reached through
//! the [`Permissions`] trait; [`GrantTable`] is a static implementation.

pub mod actor;
pub mod error;
pub mod state;

pub use actor::{Actor, CONSOLE_ID};
pub use error::{PermsError, Result};
pub use state::GrantTable;

/// Permission required by every Stacks command.
pub const ADMIN_PERMISSION: &str = "stacks.admin";

/// Source of permission grants.
pub trait Permissions {
    /// Whether `actor_id` holds `permission`.
    fn has_permission(&self, actor_id: &str, permission: &str) -> bool;
}

impl<P: Permissions + ?Sized> Permissions for &P {
    fn has_permission(&self, actor_id: &str, permission: &str) -> bool {
        (**self).has_permission(actor_id, permission)
    }
}

/// Check that `actor` may run Stacks commands.
pub fn authorize<P: Permissions + ?Sized>(actor: &Actor, permissions: &P) -> Result<()> {
    if actor.is_admin || permissions.has_permission(&actor.id, ADMIN_PERMISSION) {
        return Ok(());
    }

    tracing::debug!(actor = %actor, "not authorized");
    Err(PermsError::PermissionDenied {
        actor: actor.id.clone(),
        permission: ADMIN_PERMISSION.to_string(),
    })
}
