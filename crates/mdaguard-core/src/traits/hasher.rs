//! Password hashing collaborator.

use crate::result::AppResult;

/// A slow, salted, adaptive one-way password hash.
///
/// Both operations are CPU-bound and synchronous; async callers run them
/// on the blocking pool.
pub trait CredentialHasher: Send + Sync + std::fmt::Debug + 'static {
    /// Hash a plaintext password into a self-describing digest string.
    fn hash(&self, password: &str) -> AppResult<String>;

    /// Compare a plaintext password against a stored digest in constant time.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only for malformed digests or
    /// backend faults.
    fn verify(&self, password: &str, digest: &str) -> AppResult<bool>;
}
