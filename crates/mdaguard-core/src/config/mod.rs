//! Guard configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file overlaid with `MDAGUARD__`-prefixed environment
//! variables. Each sub-module represents a logical configuration section.

pub mod logging;
pub mod modules;
pub mod password;
pub mod session;
pub mod store;
pub mod token;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use self::logging::LoggingConfig;
pub use self::modules::ModuleFlags;
pub use self::password::PasswordConfig;
pub use self::session::SessionConfig;
pub use self::store::StoreConfig;
pub use self::token::TokenConfig;

use crate::error::AppError;
use crate::types::parse_ttl;

/// Root guard configuration. Immutable once a guard is built from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Which modules to construct.
    #[serde(default)]
    pub modules: ModuleFlags,
    /// Signed token settings.
    #[serde(default)]
    pub token: TokenConfig,
    /// Session settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Password policy and hashing cost.
    #[serde(default)]
    pub password: PasswordConfig,
    /// Storage backend.
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GuardConfig {
    /// Load configuration from an optional TOML file and the environment.
    ///
    /// Environment variables use the `MDAGUARD` prefix and `__` as the
    /// section separator, e.g. `MDAGUARD__TOKEN__SECRET`.
    pub fn load(path: Option<&str>) -> Result<Self, AppError> {
        info!(path = path.unwrap_or("<none>"), "Loading guard configuration");

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("MDAGUARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        parsed.validate()?;
        debug!(
            core = parsed.modules.core,
            session = parsed.modules.session,
            token = parsed.modules.token,
            authorization = parsed.modules.authorization,
            store = %parsed.store.provider,
            "Guard configuration loaded"
        );
        Ok(parsed)
    }

    /// Parse configuration from an inline TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let parsed: Self = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        parsed.validate()?;
        Ok(parsed)
    }

    /// Enables exactly the given modules.
    pub fn with_modules(mut self, modules: ModuleFlags) -> Self {
        self.modules = modules;
        self
    }

    /// Sets the token signing secret.
    pub fn with_token_secret(mut self, secret: impl Into<String>) -> Self {
        self.token.secret = Some(secret.into());
        self
    }

    /// Checks cross-field invariants.
    ///
    /// An enabled token module without a non-blank secret is rejected here
    /// so the failure surfaces at construction rather than on first use.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.modules.token && self.token.usable_secret().is_none() {
            return Err(AppError::configuration(
                "Token secret is required when the token module is enabled",
            ));
        }

        self.token_ttl()?;
        self.session_ttl()?;

        if let Some(strength) = self.password.min_strength {
            if strength > 4 {
                return Err(AppError::configuration(format!(
                    "password.min_strength must be between 0 and 4, got {strength}"
                )));
            }
        }

        Ok(())
    }

    /// Default token lifetime.
    pub fn token_ttl(&self) -> Result<Duration, AppError> {
        parse_ttl(&self.token.default_ttl)
            .map_err(|e| AppError::configuration(format!("token.default_ttl: {}", e.message)))
    }

    /// Default session lifetime.
    pub fn session_ttl(&self) -> Result<Duration, AppError> {
        parse_ttl(&self.session.default_ttl)
            .map_err(|e| AppError::configuration(format!("session.default_ttl: {}", e.message)))
    }
}
