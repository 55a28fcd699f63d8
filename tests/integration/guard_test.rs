//! Integration tests for guard construction, credentials, and roles.

mod helpers;

use std::sync::Arc;

use mdaguard::{
    ErrorKind, Guard, GuardConfig, GuardModule, KeyValueStore, ModuleFlags, ModuleOutcome, Role,
};
use mdaguard_store::memory::MemoryStore;

use helpers::TestGuard;

#[tokio::test]
async fn test_register_login_session_flow() {
    let app = TestGuard::new();
    app.register_user("a@x.com", "pw1").await;

    assert!(app.guard.login("a@x.com", "pw1").await.unwrap());
    assert!(!app.guard.login("a@x.com", "wrong").await.unwrap());

    let session_id = app
        .guard
        .create_session("a@x.com")
        .await
        .unwrap()
        .into_option()
        .unwrap();
    assert!(!session_id.is_empty());
    assert!(app.guard.validate_session(session_id.as_str()).await.unwrap().is_true());
}

#[tokio::test]
async fn test_login_unknown_identity_is_false() {
    let app = TestGuard::new();
    assert!(!app.guard.login("nobody@x.com", "pw1").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_registration_keeps_original() {
    let app = TestGuard::new();
    app.register_user("a@x.com", "pw1").await;

    let err = app.guard.register("a@x.com", "pw2").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    assert!(app.guard.login("a@x.com", "pw1").await.unwrap());
    assert!(!app.guard.login("a@x.com", "pw2").await.unwrap());
}

#[tokio::test]
async fn test_password_is_not_stored_in_plaintext() {
    let app = TestGuard::new();
    app.register_user("a@x.com", "plaintext-canary").await;

    let stored = app
        .store
        .get("mdaguard:credential:a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.contains("plaintext-canary"));
    assert!(stored.contains("$argon2id$"));
}

#[tokio::test]
async fn test_password_policy_rejects_short_password() {
    let mut config = TestGuard::config(ModuleFlags::all());
    config.password.min_length = 8;
    let app = TestGuard::with_config(config);

    let err = app.guard.register("a@x.com", "short").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(!app.guard.login("a@x.com", "short").await.unwrap());
}

#[tokio::test]
async fn test_core_absent_login_is_error() {
    let app = TestGuard::with_modules(ModuleFlags::none().with(GuardModule::Session, true));

    let err = app.guard.login("a@x.com", "pw1").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ModuleNotConfigured);

    let err = app.guard.register("a@x.com", "pw1").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ModuleNotConfigured);

    // Sessions still work without the core module.
    let outcome = app.guard.create_session("a@x.com").await.unwrap();
    assert!(outcome.is_available());
}

#[tokio::test]
async fn test_absent_modules_report_unavailable() {
    let app = TestGuard::with_modules(ModuleFlags::default());

    assert_eq!(
        app.guard.create_session("a@x.com").await.unwrap(),
        ModuleOutcome::Unavailable(GuardModule::Session)
    );
    assert_eq!(
        app.guard.validate_session("anything").await.unwrap(),
        ModuleOutcome::Unavailable(GuardModule::Session)
    );
    assert_eq!(
        app.guard
            .issue_token(helpers::claims(serde_json::json!({"sub": "a"})))
            .unwrap(),
        ModuleOutcome::Unavailable(GuardModule::Token)
    );
    assert_eq!(
        app.guard.verify_token("a.b.c"),
        ModuleOutcome::Unavailable(GuardModule::Token)
    );
    assert_eq!(
        app.guard.assign_role("a@x.com", Role::Admin).await.unwrap(),
        ModuleOutcome::Unavailable(GuardModule::Authorization)
    );
    assert!(!app.guard.has_role("a@x.com", Role::Admin).await.unwrap().is_true());
}

#[test]
fn test_token_enabled_without_secret_fails_build() {
    let config = GuardConfig::default().with_modules(ModuleFlags::all());
    let err = Guard::new(config).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[test]
fn test_token_disabled_needs_no_secret() {
    let config = GuardConfig::default()
        .with_modules(ModuleFlags::all().with(GuardModule::Token, false));
    let guard = Guard::new(config).unwrap();
    assert!(!guard.modules().token);
    assert!(guard.modules().session);
}

#[test]
fn test_reaper_outside_runtime_fails_build() {
    let mut config = TestGuard::config(ModuleFlags::all());
    config.session.reaper_interval_seconds = 30;
    let err = Guard::builder(config)
        .store(Arc::new(MemoryStore::new()))
        .build()
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[test]
fn test_unknown_store_provider_fails_build() {
    let mut config = GuardConfig::default();
    config.store.provider = "redis".to_string();
    assert_eq!(Guard::new(config).unwrap_err().kind, ErrorKind::Configuration);
}

#[tokio::test]
async fn test_build_from_toml() {
    let config = GuardConfig::from_toml_str(
        r#"
        [modules]
        core = true
        authorization = true

        [password]
        memory_kib = 8
        iterations = 1
        parallelism = 1
        "#,
    )
    .unwrap();

    let guard = Guard::new(config).unwrap();
    assert!(guard.modules().authorization);
    assert!(!guard.modules().session);

    guard.register("a@x.com", "pw1").await.unwrap();
    assert!(guard.login("a@x.com", "pw1").await.unwrap());
}

#[tokio::test]
async fn test_role_assignment_and_checks() {
    let app = TestGuard::new();

    assert!(app.guard.assign_role("a@x.com", Role::Admin).await.unwrap().is_true());

    assert!(app.guard.has_role("a@x.com", Role::Admin).await.unwrap().is_true());
    assert!(!app.guard.has_role("a@x.com", Role::User).await.unwrap().is_true());
    assert!(!app.guard.has_role("b@x.com", Role::Admin).await.unwrap().is_true());

    assert!(app.guard.has_role_at_least("a@x.com", Role::User).await.unwrap().is_true());
    assert!(!app.guard.has_role_at_least("a@x.com", Role::Superadmin).await.unwrap().is_true());

    app.guard.assign_role("a@x.com", Role::User).await.unwrap();
    assert_eq!(
        app.guard.roles("a@x.com").await.unwrap().into_option().unwrap(),
        vec![Role::User, Role::Admin]
    );

    assert!(app.guard.revoke_role("a@x.com", Role::Admin).await.unwrap().is_true());
    assert!(!app.guard.has_role("a@x.com", Role::Admin).await.unwrap().is_true());
}

#[tokio::test]
async fn test_repeated_assignment_is_success_and_single_entry() {
    let app = TestGuard::new();

    let first = app.guard.assign_role("a@x.com", Role::Admin).await.unwrap();
    let second = app.guard.assign_role("a@x.com", Role::Admin).await.unwrap();
    assert_eq!(first, ModuleOutcome::Available(true));
    assert_eq!(second, ModuleOutcome::Available(true));

    assert_eq!(
        app.guard.roles("a@x.com").await.unwrap().into_option().unwrap(),
        vec![Role::Admin]
    );
}

#[tokio::test]
async fn test_clones_share_state() {
    let app = TestGuard::new();
    let other = app.guard.clone();

    app.register_user("a@x.com", "pw1").await;
    assert!(other.login("a@x.com", "pw1").await.unwrap());
}

#[tokio::test]
async fn test_concurrent_registration_single_winner() {
    let app = TestGuard::new();

    let mut handles = Vec::new();
    for i in 0..8 {
        let guard = app.guard.clone();
        handles.push(tokio::spawn(async move {
            guard.register("race@x.com", &format!("pw{i}")).await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => winners += 1,
            Err(e) => assert_eq!(e.kind, ErrorKind::Conflict),
        }
    }
    assert_eq!(winners, 1);
}
