//! Storage backend configuration.

use serde::{Deserialize, Serialize};

/// Storage backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Provider name. Supported: `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Prefix applied to every key.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_key_prefix() -> String {
    "mdaguard".to_string()
}
