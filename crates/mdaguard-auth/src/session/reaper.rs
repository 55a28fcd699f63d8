//! Periodic removal of expired sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use mdaguard_core::result::AppResult;

use super::registry::SessionRegistry;

/// Sweeps the registry for sessions nobody has looked up since they expired.
#[derive(Debug, Clone)]
pub struct SessionReaper {
    /// Registry to sweep.
    registry: Arc<SessionRegistry>,
}

impl SessionReaper {
    /// Creates a reaper for `registry`.
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Runs one sweep. Returns the number of sessions evicted.
    pub async fn run_cleanup(&self) -> AppResult<u32> {
        let evicted = self.registry.evict_expired().await?;

        if evicted > 0 {
            info!(evicted, "Session cleanup completed");
        } else {
            debug!("Session cleanup found nothing to evict");
        }

        Ok(evicted)
    }

    /// Runs [`SessionReaper::run_cleanup`] every `interval` on the current
    /// Tokio runtime until the returned handle is shut down or dropped.
    pub fn spawn(self, interval: Duration) -> ReaperHandle {
        // tokio intervals panic on a zero period.
        let interval = interval.max(Duration::from_millis(1));
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; skip it so the first
            // sweep happens one interval after start.
            ticker.tick().await;

            info!(interval_ms = interval.as_millis() as u64, "Session reaper started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.run_cleanup().await {
                            error!(error = %e, "Session cleanup failed");
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Session reaper stopped");
        });

        ReaperHandle { shutdown_tx, task }
    }
}

/// Controls a running reaper task. Dropping the handle stops the task.
#[derive(Debug)]
pub struct ReaperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signals the task to stop and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            error!(error = %e, "Session reaper task ended abnormally");
        }
    }
}
