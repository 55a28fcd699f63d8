//! Session registry: issues opaque session identifiers and validates them
//! against their expiry.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use mdaguard_core::error::{AppError, ErrorKind};
use mdaguard_core::result::AppResult;
use mdaguard_core::traits::{Clock, KeyValueStore};
use mdaguard_core::types::{SessionId, SubjectId};
use mdaguard_store::KeySpace;

use super::id;
use super::model::Session;

/// Attempts at drawing a fresh identifier before giving up.
const MAX_ID_ATTEMPTS: usize = 4;

/// Maps session identifiers to (subject, expiry).
///
/// Expired entries are evicted lazily on access. Without a
/// [`SessionReaper`](super::SessionReaper) sessions that are never looked
/// up again stay in the store until removed explicitly.
#[derive(Clone)]
pub struct SessionRegistry {
    /// Backing store.
    store: Arc<dyn KeyValueStore>,
    /// Key builders.
    keys: KeySpace,
    /// Time source for expiry decisions.
    clock: Arc<dyn Clock>,
    /// Lifetime used by [`SessionRegistry::create`].
    default_ttl: Duration,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("keys", &self.keys)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl SessionRegistry {
    /// Creates a registry.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        keys: KeySpace,
        clock: Arc<dyn Clock>,
        default_ttl: Duration,
    ) -> Self {
        Self {
            store,
            keys,
            clock,
            default_ttl,
        }
    }

    /// Lifetime applied by [`SessionRegistry::create`].
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Creates a session for `subject_id` with the default lifetime.
    pub async fn create(&self, subject_id: &str) -> AppResult<SessionId> {
        self.create_with_ttl(subject_id, self.default_ttl).await
    }

    /// Creates a session for `subject_id` expiring `ttl` from now.
    ///
    /// A zero `ttl` yields a session that is already expired.
    pub async fn create_with_ttl(&self, subject_id: &str, ttl: Duration) -> AppResult<SessionId> {
        if ttl < Duration::zero() {
            return Err(AppError::validation("Session TTL must not be negative"));
        }

        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::validation("Session TTL is out of range"))?;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let session = Session {
                id: id::generate(),
                subject_id: SubjectId::from(subject_id),
                created_at: now,
                expires_at,
            };

            let key = self.keys.session(session.id.as_str());
            if self.store.put_json_if_absent(&key, &session).await? {
                info!(
                    subject_id = %subject_id,
                    session = %session.id.redacted(),
                    expires_at = %expires_at,
                    "Session created"
                );
                return Ok(session.id);
            }

            warn!(attempt, "Session identifier collision, regenerating");
        }

        Err(AppError::internal(
            "Failed to allocate a unique session identifier",
        ))
    }

    /// Returns whether `session_id` names a live session.
    ///
    /// An expired session is removed as a side effect, so every later call
    /// for the same identifier also returns `false`.
    pub async fn validate(&self, session_id: &str) -> AppResult<bool> {
        Ok(self.get(session_id).await?.is_some())
    }

    /// Loads a live session, evicting it if it has expired.
    pub async fn get(&self, session_id: &str) -> AppResult<Option<Session>> {
        let key = self.keys.session(session_id);

        let Some(session) = self.store.get_json::<Session>(&key).await? else {
            return Ok(None);
        };

        if session.is_expired_at(self.clock.now()) {
            self.store.delete(&key).await?;
            debug!(
                session = %session.id.redacted(),
                subject_id = %session.subject_id,
                "Evicted expired session on access"
            );
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Removes a session. Returns `true` if it existed.
    pub async fn invalidate(&self, session_id: &str) -> AppResult<bool> {
        let removed = self.store.delete(&self.keys.session(session_id)).await?;
        if removed {
            info!(session = %SessionId::from(session_id).redacted(), "Session invalidated");
        }
        Ok(removed)
    }

    /// Removes every session belonging to `subject_id`.
    ///
    /// Returns the number of sessions removed.
    pub async fn invalidate_subject(&self, subject_id: &str) -> AppResult<u32> {
        let mut removed = 0u32;

        for key in self.store.keys_with_prefix(&self.keys.session_prefix()).await? {
            let Some(session) = self.load_for_sweep(&key).await? else {
                continue;
            };
            if session.subject_id.as_str() == subject_id && self.store.delete(&key).await? {
                removed += 1;
            }
        }

        info!(subject_id = %subject_id, removed, "Subject sessions invalidated");
        Ok(removed)
    }

    /// Removes every expired session in the store.
    ///
    /// Returns the number of sessions evicted.
    pub async fn evict_expired(&self) -> AppResult<u32> {
        let now = self.clock.now();
        let mut evicted = 0u32;

        for key in self.store.keys_with_prefix(&self.keys.session_prefix()).await? {
            let Some(session) = self.load_for_sweep(&key).await? else {
                continue;
            };
            if session.is_expired_at(now) && self.store.delete(&key).await? {
                evicted += 1;
            }
        }

        Ok(evicted)
    }

    /// Loads a session during a sweep. Entries that no longer parse are
    /// logged and skipped so one bad value cannot abort the sweep.
    async fn load_for_sweep(&self, key: &str) -> AppResult<Option<Session>> {
        match self.store.get_json::<Session>(key).await {
            Ok(session) => Ok(session),
            Err(e) if e.is(ErrorKind::Serialization) => {
                warn!(key = %key, error = %e, "Skipping unreadable session entry");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
