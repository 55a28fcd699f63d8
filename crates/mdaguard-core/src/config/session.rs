//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Session module configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Default session lifetime, e.g. `"1h"`.
    #[serde(default = "default_ttl")]
    pub default_ttl: String,
    /// Interval in seconds between background sweeps of expired sessions.
    /// `0` disables the reaper; expired entries are then only evicted on access.
    #[serde(default)]
    pub reaper_interval_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_ttl: default_ttl(),
            reaper_interval_seconds: 0,
        }
    }
}

fn default_ttl() -> String {
    "1h".to_string()
}
