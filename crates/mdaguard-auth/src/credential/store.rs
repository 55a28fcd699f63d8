//! Credential registration and verification over the key/value store.

use std::sync::Arc;

use tracing::{debug, info};

use mdaguard_core::error::{AppError, ErrorKind};
use mdaguard_core::result::AppResult;
use mdaguard_core::traits::{Clock, CredentialHasher, KeyValueStore};
use mdaguard_core::types::SubjectId;
use mdaguard_store::KeySpace;

use crate::password::PasswordValidator;

use super::model::Credential;

/// Registers identities and authenticates them by password.
///
/// Hashing and comparison run on the blocking thread pool so a slow
/// Argon2 pass never stalls other tasks on the runtime.
#[derive(Clone)]
pub struct CredentialStore {
    /// Backing store.
    store: Arc<dyn KeyValueStore>,
    /// Key builders.
    keys: KeySpace,
    /// Password hashing collaborator.
    hasher: Arc<dyn CredentialHasher>,
    /// Policy applied on registration.
    validator: PasswordValidator,
    /// Time source for `created_at`.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("keys", &self.keys)
            .field("hasher", &self.hasher)
            .finish()
    }
}

impl CredentialStore {
    /// Creates a credential store.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        keys: KeySpace,
        hasher: Arc<dyn CredentialHasher>,
        validator: PasswordValidator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            keys,
            hasher,
            validator,
            clock,
        }
    }

    /// Registers a new identity with a password.
    ///
    /// Fails with a `Conflict` error if the identity is already registered;
    /// the existing credential is left untouched.
    pub async fn register(&self, identity: &str, password: &str) -> AppResult<()> {
        if identity.trim().is_empty() {
            return Err(AppError::validation("Identity must not be empty"));
        }
        self.validator.validate(password)?;

        let key = self.keys.credential(identity);

        // Cheap pre-check so a duplicate does not pay for a hash.
        if self.store.get(&key).await?.is_some() {
            return Err(duplicate(identity));
        }

        let password_hash = self.hash_blocking(password.to_string()).await?;

        let credential = Credential {
            identity: SubjectId::from(identity),
            password_hash,
            created_at: self.clock.now(),
        };

        if !self.store.put_json_if_absent(&key, &credential).await? {
            return Err(duplicate(identity));
        }

        info!(identity = %identity, "Credential registered");
        Ok(())
    }

    /// Checks a password against the stored credential.
    ///
    /// Returns `Ok(false)` for an unknown identity without running a
    /// comparison, and `Ok(false)` for a wrong password.
    pub async fn authenticate(&self, identity: &str, password: &str) -> AppResult<bool> {
        let key = self.keys.credential(identity);

        let Some(credential) = self.store.get_json::<Credential>(&key).await? else {
            debug!(identity = %identity, "Authentication failed: unknown identity");
            return Ok(false);
        };

        let matched = self
            .verify_blocking(password.to_string(), credential.password_hash)
            .await?;

        if matched {
            debug!(identity = %identity, "Authentication succeeded");
        } else {
            debug!(identity = %identity, "Authentication failed: password mismatch");
        }

        Ok(matched)
    }

    /// Returns whether an identity is registered.
    pub async fn exists(&self, identity: &str) -> AppResult<bool> {
        Ok(self
            .store
            .get(&self.keys.credential(identity))
            .await?
            .is_some())
    }

    /// Removes a credential. Returns `true` if one existed.
    pub async fn remove(&self, identity: &str) -> AppResult<bool> {
        let removed = self.store.delete(&self.keys.credential(identity)).await?;
        if removed {
            info!(identity = %identity, "Credential removed");
        }
        Ok(removed)
    }

    async fn hash_blocking(&self, password: String) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Password hashing task failed", e))?
    }

    async fn verify_blocking(&self, password: String, digest: String) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Password verification task failed", e)
            })?
    }
}

fn duplicate(identity: &str) -> AppError {
    AppError::conflict(format!("Identity '{identity}' is already registered"))
}
