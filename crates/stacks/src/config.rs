//! Configuration document.
//!
//! Stored as JSON in the same layout the host plugin framework uses:
//!
//! ```json
//! {
//!   "Options": {
//!     "Enable debugging": false,
//!     "Maximum allowable stack size": 100000
//!   },
//!   "Version": { "Major": 1, "Minor": 0, "Patch": 8 }
//! }
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stacks_core::StackSize;

use crate::error::{Result, StacksError};

/// Default upper bound for user-set stack sizes.
pub const DEFAULT_MAX_STACK: u32 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "Options", default)]
    pub options: Options,

    #[serde(rename = "Version", default)]
    pub version: Version,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Emit debug-level traces of every command.
    #[serde(rename = "Enable debugging", default)]
    pub debug: bool,

    /// Largest stack size a command may set. Zero disables the limit.
    #[serde(rename = "Maximum allowable stack size", default = "default_max_stack")]
    pub max_stack: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            debug: false,
            max_stack: default_max_stack(),
        }
    }
}

fn default_max_stack() -> u32 {
    DEFAULT_MAX_STACK
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl Version {
    /// Version of this build.
    pub fn current() -> Self {
        Self {
            major: env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or_default(),
            minor: env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or_default(),
            patch: env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            options: Options::default(),
            version: Version::current(),
        }
    }
}

impl Config {
    /// Upper bound for user-set stack sizes, if any.
    pub fn max_stack(&self) -> Option<StackSize> {
        StackSize::new(self.options.max_stack)
    }

    /// Read the config file without writing anything. `None` if it does not
    /// exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str::<Config>(&raw)
                .map(Some)
                .map_err(|source| StacksError::ConfigParse {
                    path: path.to_path_buf(),
                    source,
                }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StacksError::ConfigIo {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Stamp the current version onto a loaded config (or defaults, if none
    /// was found) and write it back. Missing fields of an existing file are
    /// filled with defaults.
    pub fn init(path: &Path, existing: Option<Self>) -> Result<Self> {
        let mut config = existing.unwrap_or_else(|| {
            tracing::info!(path = %path.display(), "creating new config file");
            Config::default()
        });
        config.version = Version::current();
        config.save(path)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|source| {
            StacksError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        stacks_store::json::atomic_write(path, &content).map_err(|source| StacksError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }
}
