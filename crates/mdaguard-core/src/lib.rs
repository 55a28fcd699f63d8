//! # mdaguard-core
//!
//! Core crate for mdaGuard. Contains the storage, hashing, and clock
//! traits, configuration schemas, typed identifiers and roles, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other mdaGuard crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
