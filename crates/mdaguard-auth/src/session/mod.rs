//! Session lifecycle management: creation, validation, invalidation, and
//! background reaping of expired entries.

pub mod id;
pub mod model;
pub mod reaper;
pub mod registry;

pub use model::Session;
pub use reaper::{ReaperHandle, SessionReaper};
pub use registry::SessionRegistry;
