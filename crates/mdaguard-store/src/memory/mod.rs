//! In-process store backend.

pub mod store;

pub use store::MemoryStore;
