//! Core type definitions used across the mdaGuard workspace.

pub mod id;
pub mod module;
pub mod role;
pub mod ttl;

pub use id::{SessionId, SubjectId};
pub use module::GuardModule;
pub use role::Role;
pub use ttl::parse_ttl;
