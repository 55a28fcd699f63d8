//! Core traits defined in `mdaguard-core` and implemented by other crates.

pub mod clock;
pub mod hasher;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use hasher::CredentialHasher;
pub use store::KeyValueStore;
