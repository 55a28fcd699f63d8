//! # mdaguard-auth
//!
//! The four stateful capabilities composed by the mdaGuard facade.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and policy enforcement
//! - `credential`: Identity registration and password authentication
//! - `session`: Opaque session lifecycle (create, validate, invalidate, reap)
//! - `jwt`: HS256 signed token issuance and verification
//! - `rbac`: Role assignment and checks

pub mod credential;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;

pub use credential::{Credential, CredentialStore};
pub use jwt::{Claims, TokenIssuer, TokenRejection, VerifiedToken};
pub use password::{Argon2Hasher, PasswordValidator};
pub use rbac::RoleStore;
pub use session::{ReaperHandle, Session, SessionReaper, SessionRegistry};
