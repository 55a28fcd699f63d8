//! Integration tests for signed tokens through the guard.

mod helpers;

use chrono::Duration;
use serde_json::json;

use mdaguard::{ErrorKind, GuardConfig, GuardModule, ModuleFlags, TokenRejection};

use helpers::{TestGuard, claims};

fn issue(app: &TestGuard) -> String {
    app.guard
        .issue_token(claims(json!({"sub": "a@x.com", "role": "admin"})))
        .unwrap()
        .into_option()
        .unwrap()
}

#[tokio::test]
async fn test_issue_and_verify_round_trip() {
    let app = TestGuard::new();
    let token = issue(&app);

    let verified = app.guard.verify_token(&token).into_option().flatten().unwrap();
    assert_eq!(verified, claims(json!({"sub": "a@x.com", "role": "admin"})));
}

#[tokio::test]
async fn test_single_character_tamper_is_rejected() {
    let app = TestGuard::new();
    let token = issue(&app);

    for (index, original) in token.char_indices() {
        let replacement = if original == 'A' { 'B' } else { 'A' };
        let mut tampered = token.clone();
        tampered.replace_range(index..index + 1, &replacement.to_string());

        assert_eq!(
            app.guard.verify_token(&tampered).into_option(),
            Some(None),
            "tamper at byte {index} was accepted"
        );
    }
}

#[tokio::test]
async fn test_token_expiry_follows_clock() {
    let app = TestGuard::new();
    let token = app
        .guard
        .issue_token_with_ttl(claims(json!({"sub": "a"})), Duration::seconds(90))
        .unwrap()
        .into_option()
        .unwrap();

    app.clock.advance(Duration::seconds(89));
    assert!(app.guard.verify_token(&token).into_option().flatten().is_some());

    app.clock.advance(Duration::seconds(1));
    assert_eq!(
        app.guard.inspect_token(&token).into_option(),
        Some(Err(TokenRejection::Expired))
    );
}

#[tokio::test]
async fn test_default_token_ttl_from_config() {
    let mut config = TestGuard::config(ModuleFlags::all());
    config.token.default_ttl = "15m".to_string();
    let app = TestGuard::with_config(config);
    let token = issue(&app);

    let verified = app.guard.inspect_token(&token).into_option().unwrap().unwrap();
    assert_eq!(verified.expires_at - verified.issued_at, Duration::minutes(15));
    assert_eq!(verified.subject(), Some("a@x.com"));
}

#[tokio::test]
async fn test_token_from_other_guard_is_rejected() {
    let app = TestGuard::new();
    let other = TestGuard::with_config(
        TestGuard::config(ModuleFlags::all()).with_token_secret("a-different-secret"),
    );
    let foreign = issue(&other);

    assert_eq!(
        app.guard.inspect_token(&foreign).into_option(),
        Some(Err(TokenRejection::BadSignature))
    );
}

#[tokio::test]
async fn test_garbage_tokens_are_rejected() {
    let app = TestGuard::new();
    for token in ["", "abc", "a.b.c", "...."] {
        assert_eq!(app.guard.verify_token(token).into_option(), Some(None));
    }
}

#[tokio::test]
async fn test_reserved_claims_are_refused() {
    let app = TestGuard::new();
    let err = app
        .guard
        .issue_token(claims(json!({"sub": "a", "iat": 0})))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_issue_from_json_value() {
    let app = TestGuard::new();
    let token = app
        .guard
        .issue_token_value(json!({"sub": "a"}))
        .unwrap()
        .into_option()
        .unwrap();
    assert!(app.guard.verify_token(&token).into_option().flatten().is_some());

    let err = app.guard.issue_token_value(json!("sub")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_token_module_disabled() {
    let config = GuardConfig::default().with_modules(ModuleFlags::default());
    let app = TestGuard::with_config(config);
    assert_eq!(
        app.guard.verify_token("a.b.c").missing_module(),
        Some(GuardModule::Token)
    );
}
