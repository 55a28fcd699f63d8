//! Password hashing and policy configuration.

use serde::{Deserialize, Serialize};

/// Password policy and Argon2id cost parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordConfig {
    /// Minimum password length in characters.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Minimum zxcvbn strength score (0–4). `None` disables the entropy check.
    #[serde(default)]
    pub min_strength: Option<u8>,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Argon2 degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            min_strength: None,
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_min_length() -> usize {
    1
}

// Argon2id defaults recommended by OWASP (19 MiB, 2 passes, 1 lane).
fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
