//! The actor issuing a command.

use std::fmt;

/// Identifier of the host console actor.
pub const CONSOLE_ID: &str = "server_console";

/// Whoever invoked a command.
///
/// `is_admin` mirrors the host's own administrator flag, which bypasses
/// permission grants entirely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor {
    pub id: String,
    pub is_admin: bool,
}

impl Actor {
    /// A regular actor with no host administrator flag.
    pub fn player(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_admin: false,
        }
    }

    /// An actor flagged as host administrator.
    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_admin: true,
        }
    }

    /// The host console. Always an administrator.
    pub fn console() -> Self {
        Self::admin(CONSOLE_ID)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
