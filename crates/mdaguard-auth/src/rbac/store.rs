//! Role assignment storage.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use mdaguard_core::result::AppResult;
use mdaguard_core::traits::KeyValueStore;
use mdaguard_core::types::Role;
use mdaguard_store::KeySpace;

/// Maps subjects to a set of roles.
///
/// Read-modify-write updates are serialized through a mutex so two
/// concurrent assignments to the same subject never lose each other.
#[derive(Debug, Clone)]
pub struct RoleStore {
    /// Backing store.
    store: Arc<dyn KeyValueStore>,
    /// Key builders.
    keys: KeySpace,
    /// Guards update sequences.
    write_lock: Arc<Mutex<()>>,
}

impl RoleStore {
    /// Creates a role store.
    pub fn new(store: Arc<dyn KeyValueStore>, keys: KeySpace) -> Self {
        Self {
            store,
            keys,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Grants `role` to `subject_id`.
    ///
    /// Idempotent. Returns `true` if the role was newly added.
    pub async fn assign(&self, subject_id: &str, role: Role) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;

        let key = self.keys.roles(subject_id);
        let mut roles = self.load(&key).await?;
        if !roles.insert(role) {
            return Ok(false);
        }

        self.store.put_json(&key, &roles).await?;
        info!(subject_id = %subject_id, role = %role, "Role assigned");
        Ok(true)
    }

    /// Withdraws `role` from `subject_id`. Returns `true` if it was held.
    pub async fn revoke(&self, subject_id: &str, role: Role) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;

        let key = self.keys.roles(subject_id);
        let mut roles = self.load(&key).await?;
        if !roles.remove(&role) {
            return Ok(false);
        }

        if roles.is_empty() {
            self.store.delete(&key).await?;
        } else {
            self.store.put_json(&key, &roles).await?;
        }
        info!(subject_id = %subject_id, role = %role, "Role revoked");
        Ok(true)
    }

    /// Returns whether `subject_id` holds exactly `role`.
    pub async fn has(&self, subject_id: &str, role: Role) -> AppResult<bool> {
        Ok(self.load(&self.keys.roles(subject_id)).await?.contains(&role))
    }

    /// Returns whether any role held by `subject_id` is at least as
    /// privileged as `minimum`.
    pub async fn has_at_least(&self, subject_id: &str, minimum: Role) -> AppResult<bool> {
        Ok(self
            .load(&self.keys.roles(subject_id))
            .await?
            .iter()
            .any(|held| held.has_at_least(&minimum)))
    }

    /// Lists the roles of `subject_id` in ascending privilege order.
    ///
    /// An unknown subject has no roles.
    pub async fn list(&self, subject_id: &str) -> AppResult<Vec<Role>> {
        Ok(self
            .load(&self.keys.roles(subject_id))
            .await?
            .into_iter()
            .collect())
    }

    async fn load(&self, key: &str) -> AppResult<BTreeSet<Role>> {
        Ok(self
            .store
            .get_json::<BTreeSet<Role>>(key)
            .await?
            .unwrap_or_default())
    }
}
