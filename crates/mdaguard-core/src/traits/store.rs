//! Key/value storage trait backing every stateful module.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::result::AppResult;

/// Trait for pluggable storage backends.
///
/// Values are JSON strings. Implementations must be safe for concurrent
/// use, and `put_if_absent` must be atomic with respect to other writers.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Insert or overwrite a value.
    async fn put(&self, key: &str, value: &str) -> AppResult<()>;

    /// Insert a value only if the key does not already exist.
    /// Returns `true` if the value was stored.
    async fn put_if_absent(&self, key: &str, value: &str) -> AppResult<bool>;

    /// Delete a key. Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> AppResult<bool>;

    /// List all keys starting with `prefix`.
    async fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>>;
}

impl dyn KeyValueStore {
    /// Get a typed value by deserializing from JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    /// Store a typed value serialized as JSON.
    pub async fn put_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.put(key, &json).await
    }

    /// Store a typed value serialized as JSON if the key is free.
    pub async fn put_json_if_absent<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> AppResult<bool> {
        let json = serde_json::to_string(value)?;
        self.put_if_absent(key, &json).await
    }
}
