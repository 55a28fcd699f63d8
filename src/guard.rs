//! The guard facade: a fixed composition of optional modules behind one
//! handle.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use mdaguard_auth::{
    Argon2Hasher, Claims, CredentialStore, PasswordValidator, ReaperHandle, RoleStore, Session,
    SessionReaper, SessionRegistry, TokenIssuer, TokenRejection, VerifiedToken,
};
use mdaguard_core::config::{GuardConfig, ModuleFlags};
use mdaguard_core::error::AppError;
use mdaguard_core::result::AppResult;
use mdaguard_core::traits::{Clock, CredentialHasher, KeyValueStore, SystemClock};
use mdaguard_core::types::{GuardModule, Role, SessionId};
use mdaguard_store::{KeySpace, StoreManager};

use crate::outcome::ModuleOutcome;

/// Builds a [`Guard`], optionally overriding its collaborators.
///
/// Defaults: the store named by `config.store`, an Argon2id hasher tuned by
/// `config.password`, and the system clock.
#[derive(Debug)]
pub struct GuardBuilder {
    config: GuardConfig,
    store: Option<Arc<dyn KeyValueStore>>,
    hasher: Option<Arc<dyn CredentialHasher>>,
    clock: Option<Arc<dyn Clock>>,
}

impl GuardBuilder {
    /// Starts a builder from `config`.
    pub fn new(config: GuardConfig) -> Self {
        Self {
            config,
            store: None,
            hasher: None,
            clock: None,
        }
    }

    /// Uses `store` instead of the configured provider.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Uses `hasher` instead of the default Argon2id hasher.
    pub fn hasher(mut self, hasher: Arc<dyn CredentialHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Uses `clock` for every expiry decision.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validates the configuration and constructs the enabled modules.
    ///
    /// Fails with a `Configuration` error if the token module is enabled
    /// without a secret, a lifetime does not parse, or the session reaper
    /// is requested outside a Tokio runtime.
    pub fn build(self) -> AppResult<Guard> {
        let config = self.config;
        config.validate()?;

        let store = match self.store {
            Some(provider) => {
                StoreManager::from_provider(provider, KeySpace::new(config.store.key_prefix.clone()))
            }
            None => StoreManager::new(&config.store)?,
        };
        let clock: Arc<dyn Clock> = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let modules = config.modules;

        let credentials = if modules.core {
            let hasher: Arc<dyn CredentialHasher> = match self.hasher {
                Some(hasher) => hasher,
                None => Arc::new(Argon2Hasher::new(&config.password)?),
            };
            Some(CredentialStore::new(
                store.provider(),
                store.keys().clone(),
                hasher,
                PasswordValidator::new(&config.password),
                Arc::clone(&clock),
            ))
        } else {
            None
        };

        let sessions = if modules.session {
            Some(Arc::new(SessionRegistry::new(
                store.provider(),
                store.keys().clone(),
                Arc::clone(&clock),
                config.session_ttl()?,
            )))
        } else {
            None
        };

        let reaper = match (&sessions, config.session.reaper_interval_seconds) {
            (Some(registry), secs) if secs > 0 => {
                if tokio::runtime::Handle::try_current().is_err() {
                    return Err(AppError::configuration(
                        "session.reaper_interval_seconds requires a Tokio runtime",
                    ));
                }
                Some(SessionReaper::new(Arc::clone(registry)).spawn(StdDuration::from_secs(secs)))
            }
            _ => None,
        };

        let tokens = if modules.token {
            let secret = config.token.usable_secret().ok_or_else(|| {
                AppError::configuration("Token secret is required when the token module is enabled")
            })?;
            Some(TokenIssuer::new(secret, Arc::clone(&clock), config.token_ttl()?)?)
        } else {
            None
        };

        let roles = if modules.authorization {
            Some(RoleStore::new(store.provider(), store.keys().clone()))
        } else {
            None
        };

        info!(
            core = modules.core,
            session = modules.session,
            token = modules.token,
            authorization = modules.authorization,
            reaper = reaper.is_some(),
            "Guard initialized"
        );

        Ok(Guard {
            inner: Arc::new(GuardInner {
                modules,
                credentials,
                sessions,
                tokens,
                roles,
                reaper: Mutex::new(reaper),
            }),
        })
    }
}

#[derive(Debug)]
struct GuardInner {
    modules: ModuleFlags,
    credentials: Option<CredentialStore>,
    sessions: Option<Arc<SessionRegistry>>,
    tokens: Option<TokenIssuer>,
    roles: Option<RoleStore>,
    reaper: Mutex<Option<ReaperHandle>>,
}

/// Single entry point for authentication and authorization.
///
/// Which modules exist is fixed at construction. Clones share the same
/// modules and state.
#[derive(Debug, Clone)]
pub struct Guard {
    inner: Arc<GuardInner>,
}

impl Guard {
    /// Builds a guard from `config` with default collaborators.
    pub fn new(config: GuardConfig) -> AppResult<Self> {
        GuardBuilder::new(config).build()
    }

    /// Starts a builder for overriding collaborators.
    pub fn builder(config: GuardConfig) -> GuardBuilder {
        GuardBuilder::new(config)
    }

    /// The modules this guard was built with.
    pub fn modules(&self) -> ModuleFlags {
        self.inner.modules
    }

    // ── Core ──────────────────────────────────────────────

    /// Registers an identity with a password.
    ///
    /// Fails with `Conflict` if the identity is taken and with
    /// `ModuleNotConfigured` if the guard has no core module.
    pub async fn register(&self, email: &str, password: &str) -> AppResult<()> {
        self.credentials()?.register(email, password).await
    }

    /// Checks a password against the stored credential.
    ///
    /// Unknown identities and wrong passwords both yield `Ok(false)`. Fails
    /// with `ModuleNotConfigured` if the guard has no core module.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<bool> {
        self.credentials()?.authenticate(email, password).await
    }

    fn credentials(&self) -> AppResult<&CredentialStore> {
        self.inner.credentials.as_ref().ok_or_else(|| {
            debug!(module = %GuardModule::Core, "Module not configured");
            AppError::module_not_configured(format!(
                "The {} module is not configured",
                GuardModule::Core
            ))
        })
    }

    // ── Sessions ──────────────────────────────────────────────

    /// Creates a session for `subject_id` with the configured lifetime.
    pub async fn create_session(&self, subject_id: &str) -> AppResult<ModuleOutcome<SessionId>> {
        match &self.inner.sessions {
            Some(registry) => Ok(ModuleOutcome::Available(registry.create(subject_id).await?)),
            None => Ok(unavailable(GuardModule::Session)),
        }
    }

    /// Creates a session for `subject_id` expiring `ttl` from now.
    pub async fn create_session_with_ttl(
        &self,
        subject_id: &str,
        ttl: Duration,
    ) -> AppResult<ModuleOutcome<SessionId>> {
        match &self.inner.sessions {
            Some(registry) => Ok(ModuleOutcome::Available(
                registry.create_with_ttl(subject_id, ttl).await?,
            )),
            None => Ok(unavailable(GuardModule::Session)),
        }
    }

    /// Returns whether `session_id` names a live session. Expired sessions
    /// are removed on the way.
    pub async fn validate_session(&self, session_id: &str) -> AppResult<ModuleOutcome<bool>> {
        match &self.inner.sessions {
            Some(registry) => Ok(ModuleOutcome::Available(registry.validate(session_id).await?)),
            None => Ok(unavailable(GuardModule::Session)),
        }
    }

    /// Loads a live session record.
    pub async fn session(&self, session_id: &str) -> AppResult<ModuleOutcome<Option<Session>>> {
        match &self.inner.sessions {
            Some(registry) => Ok(ModuleOutcome::Available(registry.get(session_id).await?)),
            None => Ok(unavailable(GuardModule::Session)),
        }
    }

    /// Ends a session. `true` if it existed.
    pub async fn invalidate_session(&self, session_id: &str) -> AppResult<ModuleOutcome<bool>> {
        match &self.inner.sessions {
            Some(registry) => Ok(ModuleOutcome::Available(
                registry.invalidate(session_id).await?,
            )),
            None => Ok(unavailable(GuardModule::Session)),
        }
    }

    /// Ends every session of `subject_id`. Returns how many were removed.
    pub async fn invalidate_subject_sessions(
        &self,
        subject_id: &str,
    ) -> AppResult<ModuleOutcome<u32>> {
        match &self.inner.sessions {
            Some(registry) => Ok(ModuleOutcome::Available(
                registry.invalidate_subject(subject_id).await?,
            )),
            None => Ok(unavailable(GuardModule::Session)),
        }
    }

    /// Sweeps expired sessions now. Returns how many were evicted.
    pub async fn reap_expired_sessions(&self) -> AppResult<ModuleOutcome<u32>> {
        match &self.inner.sessions {
            Some(registry) => Ok(ModuleOutcome::Available(
                SessionReaper::new(Arc::clone(registry)).run_cleanup().await?,
            )),
            None => Ok(unavailable(GuardModule::Session)),
        }
    }

    // ── Tokens ──────────────────────────────────────────────

    /// Issues a signed token carrying `claims` with the configured lifetime.
    ///
    /// `iat` and `exp` are set by the guard; supplying either is a
    /// `Validation` error.
    pub fn issue_token(&self, claims: Claims) -> AppResult<ModuleOutcome<String>> {
        match &self.inner.tokens {
            Some(issuer) => Ok(ModuleOutcome::Available(issuer.issue(claims)?)),
            None => Ok(unavailable(GuardModule::Token)),
        }
    }

    /// Issues a signed token from a JSON object.
    pub fn issue_token_value(&self, claims: Value) -> AppResult<ModuleOutcome<String>> {
        match &self.inner.tokens {
            Some(issuer) => Ok(ModuleOutcome::Available(issuer.issue_value(claims)?)),
            None => Ok(unavailable(GuardModule::Token)),
        }
    }

    /// Issues a signed token that expires `ttl` from now.
    pub fn issue_token_with_ttl(
        &self,
        claims: Claims,
        ttl: Duration,
    ) -> AppResult<ModuleOutcome<String>> {
        match &self.inner.tokens {
            Some(issuer) => Ok(ModuleOutcome::Available(issuer.issue_with_ttl(claims, ttl)?)),
            None => Ok(unavailable(GuardModule::Token)),
        }
    }

    /// Verifies a token and returns its caller-supplied claims, or `None`
    /// for any malformed, forged, or expired token.
    pub fn verify_token(&self, token: &str) -> ModuleOutcome<Option<Claims>> {
        match &self.inner.tokens {
            Some(issuer) => ModuleOutcome::Available(issuer.verify(token)),
            None => unavailable(GuardModule::Token),
        }
    }

    /// Verifies a token and reports why it was rejected.
    pub fn inspect_token(&self, token: &str) -> ModuleOutcome<Result<VerifiedToken, TokenRejection>> {
        match &self.inner.tokens {
            Some(issuer) => ModuleOutcome::Available(issuer.inspect(token)),
            None => unavailable(GuardModule::Token),
        }
    }

    // ── Authorization ──────────────────────────────────────────────

    /// Grants `role` to `subject_id`.
    ///
    /// Idempotent: any successful assignment reports `true`, whether or not
    /// the role was already held.
    pub async fn assign_role(&self, subject_id: &str, role: Role) -> AppResult<ModuleOutcome<bool>> {
        match &self.inner.roles {
            Some(roles) => {
                roles.assign(subject_id, role).await?;
                Ok(ModuleOutcome::Available(true))
            }
            None => Ok(unavailable(GuardModule::Authorization)),
        }
    }

    /// Withdraws `role` from `subject_id`. `true` if it was held.
    pub async fn revoke_role(&self, subject_id: &str, role: Role) -> AppResult<ModuleOutcome<bool>> {
        match &self.inner.roles {
            Some(roles) => Ok(ModuleOutcome::Available(roles.revoke(subject_id, role).await?)),
            None => Ok(unavailable(GuardModule::Authorization)),
        }
    }

    /// Exact role membership.
    pub async fn has_role(&self, subject_id: &str, role: Role) -> AppResult<ModuleOutcome<bool>> {
        match &self.inner.roles {
            Some(roles) => Ok(ModuleOutcome::Available(roles.has(subject_id, role).await?)),
            None => Ok(unavailable(GuardModule::Authorization)),
        }
    }

    /// Whether any held role is at least as privileged as `minimum`.
    pub async fn has_role_at_least(
        &self,
        subject_id: &str,
        minimum: Role,
    ) -> AppResult<ModuleOutcome<bool>> {
        match &self.inner.roles {
            Some(roles) => Ok(ModuleOutcome::Available(
                roles.has_at_least(subject_id, minimum).await?,
            )),
            None => Ok(unavailable(GuardModule::Authorization)),
        }
    }

    /// Roles held by `subject_id`, least privileged first.
    pub async fn roles(&self, subject_id: &str) -> AppResult<ModuleOutcome<Vec<Role>>> {
        match &self.inner.roles {
            Some(roles) => Ok(ModuleOutcome::Available(roles.list(subject_id).await?)),
            None => Ok(unavailable(GuardModule::Authorization)),
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Stops the background session reaper, if one is running. Idempotent.
    pub async fn shutdown(&self) {
        let handle = self.inner.reaper.lock().await.take();
        if let Some(handle) = handle {
            handle.shutdown().await;
            info!("Guard shut down");
        }
    }
}

fn unavailable<T>(module: GuardModule) -> ModuleOutcome<T> {
    debug!(module = %module, "Module not configured");
    ModuleOutcome::Unavailable(module)
}
