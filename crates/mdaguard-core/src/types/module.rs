//! The optional capabilities a guard may be built with.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four modules a guard can compose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardModule {
    /// Credential registration and login.
    Core,
    /// Opaque server-side sessions.
    Session,
    /// Signed self-contained tokens.
    Token,
    /// Role assignment and checks.
    Authorization,
}

impl GuardModule {
    /// Return the module name as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Session => "session",
            Self::Token => "token",
            Self::Authorization => "authorization",
        }
    }
}

impl fmt::Display for GuardModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
