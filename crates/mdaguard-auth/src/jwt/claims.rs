//! Token payload structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied key/value payload attested by the token signature.
pub type Claims = Map<String, Value>;

/// Claim names the issuer writes itself; callers may not supply them.
pub const RESERVED_CLAIMS: [&str; 2] = ["iat", "exp"];

/// The full signed payload: caller claims plus issue and expiry times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedPayload {
    /// Caller claims, flattened into the top level of the payload.
    #[serde(flatten)]
    pub claims: Claims,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// A token that passed verification.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedToken {
    /// The caller claims exactly as issued.
    pub claims: Claims,
    /// Issue time.
    pub issued_at: DateTime<Utc>,
    /// Expiry time; the token is rejected from this instant on.
    pub expires_at: DateTime<Utc>,
}

impl VerifiedToken {
    pub(crate) fn from_payload(payload: SignedPayload) -> Self {
        Self {
            claims: payload.claims,
            issued_at: DateTime::from_timestamp(payload.iat, 0).unwrap_or_default(),
            expires_at: DateTime::from_timestamp(payload.exp, 0).unwrap_or_default(),
        }
    }

    /// Returns the `sub` claim if it is a string.
    pub fn subject(&self) -> Option<&str> {
        self.claims.get("sub").and_then(Value::as_str)
    }
}
