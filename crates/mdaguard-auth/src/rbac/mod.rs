//! Role-based access control: per-subject role sets.

pub mod store;

pub use store::RoleStore;
