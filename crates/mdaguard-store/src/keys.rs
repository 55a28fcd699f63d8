//! Store key builders for every mdaGuard record.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the guard uses.

/// Prefix applied when no other is configured.
pub const DEFAULT_PREFIX: &str = "mdaguard";

/// Builds namespaced keys under a configurable prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    prefix: String,
}

impl KeySpace {
    /// Creates a key space under `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    // ── Credential keys ────────────────────────────────────────

    /// Key for the credential of an identity.
    pub fn credential(&self, identity: &str) -> String {
        format!("{}:credential:{identity}", self.prefix)
    }

    // ── Session keys ───────────────────────────────────────────

    /// Key for a session record by ID.
    pub fn session(&self, session_id: &str) -> String {
        format!("{}:session:{session_id}", self.prefix)
    }

    /// Prefix shared by every session key.
    pub fn session_prefix(&self) -> String {
        format!("{}:session:", self.prefix)
    }

    // ── Role keys ──────────────────────────────────────────────

    /// Key for the role set of a subject.
    pub fn roles(&self, subject_id: &str) -> String {
        format!("{}:roles:{subject_id}", self.prefix)
    }
}

impl Default for KeySpace {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
