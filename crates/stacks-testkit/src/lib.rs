//! # Stacks Testkit
//!
//! Testing utilities for Stacks.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fake registry**: An in-memory [`FakeRegistry`] that records live updates
//!   and can be told to refuse them
//! - **Generators**: Proptest strategies for registries and user input
//! - **Fixtures**: A ready-made controller over a [`MemoryStore`] with a
//!   one-line command runner
//!
//! ## Test Fixtures
//!
//! ```rust
//! use stacks::MessageKey;
//! use stacks_testkit::fixtures::{admin, TestFixture};
//!
//! let mut fixture = TestFixture::new();
//! let response = fixture.run(&admin(), "stack wood 50");
//! assert_eq!(response.key, MessageKey::StackSet);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use stacks_testkit::generators::{registry_from_params, RegistryParams};
//!
//! proptest! {
//!     #[test]
//!     fn every_item_is_indexed(params: RegistryParams) {
//!         let fixture = TestFixture::with_registry(registry_from_params(&params));
//!         prop_assert_eq!(fixture.index().len(), params.categorized());
//!     }
//! }
//! ```
//!
//! [`MemoryStore`]: stacks_store::MemoryStore

pub mod fixtures;
pub mod generators;

pub use fixtures::{admin, player, sample_registry, FakeItem, FakeRegistry, TestFixture};
pub use generators::{registry_from_params, RegistryParams};
