//! Stored session record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use mdaguard_core::types::{SessionId, SubjectId};

/// A live server-side session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque unguessable identifier.
    pub id: SessionId,
    /// The subject the session belongs to.
    pub subject_id: SubjectId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// First instant at which the session is no longer valid.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// A session is expired from `expires_at` onwards.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Remaining lifetime at `now`, zero if expired.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        let remaining = self.expires_at - now;
        if remaining > Duration::zero() {
            remaining
        } else {
            Duration::zero()
        }
    }
}
