//! Signed token configuration.

use serde::{Deserialize, Serialize};

/// Token module configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Symmetric HMAC-SHA256 signing secret. Mandatory when the token module is enabled.
    #[serde(default)]
    pub secret: Option<String>,
    /// Default token lifetime, e.g. `"1h"`.
    #[serde(default = "default_ttl")]
    pub default_ttl: String,
}

impl TokenConfig {
    /// Returns the configured secret if it is present and non-blank.
    pub fn usable_secret(&self) -> Option<&str> {
        self.secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: None,
            default_ttl: default_ttl(),
        }
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

fn default_ttl() -> String {
    "1h".to_string()
}
