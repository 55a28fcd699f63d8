//! Store manager that dispatches to the configured provider.

use std::sync::Arc;

use tracing::info;

use mdaguard_core::config::StoreConfig;
use mdaguard_core::error::AppError;
use mdaguard_core::result::AppResult;
use mdaguard_core::traits::KeyValueStore;

use crate::keys::KeySpace;

/// Wraps the configured store provider together with its key space.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner store provider.
    inner: Arc<dyn KeyValueStore>,
    /// Key builders bound to the configured prefix.
    keys: KeySpace,
}

impl StoreManager {
    /// Create a store manager from configuration.
    pub fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn KeyValueStore> = match config.provider.as_str() {
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory store provider");
                Arc::new(crate::memory::MemoryStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory"
                )));
            }
        };

        Ok(Self {
            inner,
            keys: KeySpace::new(config.key_prefix.clone()),
        })
    }

    /// Create a store manager from an existing provider.
    pub fn from_provider(provider: Arc<dyn KeyValueStore>, keys: KeySpace) -> Self {
        Self {
            inner: provider,
            keys,
        }
    }

    /// Shared handle to the provider.
    pub fn provider(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.inner)
    }

    /// Key builders for this store.
    pub fn keys(&self) -> &KeySpace {
        &self.keys
    }
}
