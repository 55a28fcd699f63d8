//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use mdaguard::{Guard, GuardConfig, ManualClock, ModuleFlags};
use mdaguard_store::memory::MemoryStore;

/// Signing secret used by every test guard.
pub const TEST_SECRET: &str = "integration-test-secret";

/// A guard wired to a manual clock and an inspectable in-memory store.
pub struct TestGuard {
    /// The guard under test
    pub guard: Guard,
    /// Drives every expiry decision
    pub clock: ManualClock,
    /// Backing store, for asserting on what is persisted
    pub store: MemoryStore,
}

impl TestGuard {
    /// All four modules enabled.
    pub fn new() -> Self {
        Self::with_config(Self::config(ModuleFlags::all()))
    }

    /// Only the given modules enabled.
    pub fn with_modules(modules: ModuleFlags) -> Self {
        Self::with_config(Self::config(modules))
    }

    /// Builds from an explicit configuration.
    pub fn with_config(config: GuardConfig) -> Self {
        let clock = ManualClock::starting_now();
        let store = MemoryStore::new();
        let guard = Guard::builder(config)
            .store(Arc::new(store.clone()))
            .clock(Arc::new(clock.clone()))
            .build()
            .expect("Failed to build test guard");

        Self {
            guard,
            clock,
            store,
        }
    }

    /// Test configuration with cheap Argon2 parameters.
    pub fn config(modules: ModuleFlags) -> GuardConfig {
        let mut config = GuardConfig::default()
            .with_modules(modules)
            .with_token_secret(TEST_SECRET);
        config.password.memory_kib = 8;
        config.password.iterations = 1;
        config.password.parallelism = 1;
        config
    }

    /// Register a user, panicking on failure.
    pub async fn register_user(&self, email: &str, password: &str) {
        self.guard
            .register(email, password)
            .await
            .expect("Failed to register test user");
    }
}

/// Builds a claims object from a JSON literal.
pub fn claims(value: serde_json::Value) -> mdaguard::Claims {
    value
        .as_object()
        .cloned()
        .expect("claims must be a JSON object")
}
