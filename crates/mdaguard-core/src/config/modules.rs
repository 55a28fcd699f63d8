//! Module selection flags.

use serde::{Deserialize, Serialize};

use crate::types::GuardModule;

/// Which modules a guard is built with. Fixed for the guard's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFlags {
    /// Credential registration and login.
    #[serde(default = "default_true")]
    pub core: bool,
    /// Server-side sessions.
    #[serde(default)]
    pub session: bool,
    /// Signed tokens. Requires `token.secret`.
    #[serde(default)]
    pub token: bool,
    /// Role assignment.
    #[serde(default)]
    pub authorization: bool,
}

impl ModuleFlags {
    /// Every module enabled.
    pub fn all() -> Self {
        Self {
            core: true,
            session: true,
            token: true,
            authorization: true,
        }
    }

    /// No module enabled.
    pub fn none() -> Self {
        Self {
            core: false,
            session: false,
            token: false,
            authorization: false,
        }
    }

    /// Returns a copy with `module` switched on or off.
    pub fn with(mut self, module: GuardModule, enabled: bool) -> Self {
        match module {
            GuardModule::Core => self.core = enabled,
            GuardModule::Session => self.session = enabled,
            GuardModule::Token => self.token = enabled,
            GuardModule::Authorization => self.authorization = enabled,
        }
        self
    }

    /// Returns whether `module` is enabled.
    pub fn is_enabled(&self, module: GuardModule) -> bool {
        match module {
            GuardModule::Core => self.core,
            GuardModule::Session => self.session,
            GuardModule::Token => self.token,
            GuardModule::Authorization => self.authorization,
        }
    }
}

impl Default for ModuleFlags {
    fn default() -> Self {
        Self::none().with(GuardModule::Core, true)
    }
}

fn default_true() -> bool {
    true
}
