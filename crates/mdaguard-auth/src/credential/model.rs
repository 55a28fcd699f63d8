//! Stored credential record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mdaguard_core::types::SubjectId;

/// An identity and its password digest. Never mutated after registration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    /// The identity this credential authenticates (e.g. an email address).
    pub identity: SubjectId,
    /// Self-describing Argon2id PHC string.
    pub password_hash: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("identity", &self.identity)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
