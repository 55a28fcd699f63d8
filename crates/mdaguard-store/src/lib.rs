//! # mdaguard-store
//!
//! Key/value store providers for mdaGuard. Every stateful module keeps its
//! records behind [`mdaguard_core::traits::KeyValueStore`], so persistence
//! backends can be swapped without touching module logic.
//!
//! - **memory**: In-process store using [dashmap](https://crates.io/crates/dashmap)
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use keys::KeySpace;
pub use provider::StoreManager;
