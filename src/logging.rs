//! Tracing subscriber installation for applications embedding the guard.

use tracing_subscriber::{EnvFilter, fmt};

use mdaguard_core::config::LoggingConfig;
use mdaguard_core::error::AppError;

/// Installs a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns
/// `Ok(false)` if a global subscriber was already installed.
pub fn init(config: &LoggingConfig) -> Result<bool, AppError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            AppError::configuration(format!("Invalid log level '{}': {e}", config.level))
        })?,
    };

    let installed = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .try_init(),
        "pretty" => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown log format: '{other}'. Supported: json, pretty"
            )));
        }
    };

    Ok(installed.is_ok())
}
