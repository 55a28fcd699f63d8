//! Integration tests for session lifecycle through the guard.

mod helpers;

use std::time::Duration as StdDuration;

use chrono::Duration;
use mdaguard::{GuardModule, ModuleFlags};

use helpers::TestGuard;

#[tokio::test]
async fn test_session_expires_at_boundary() {
    let app = TestGuard::new();
    let id = app
        .guard
        .create_session_with_ttl("a@x.com", Duration::minutes(5))
        .await
        .unwrap()
        .into_option()
        .unwrap();

    app.clock.advance(Duration::minutes(5) - Duration::seconds(1));
    assert!(app.guard.validate_session(id.as_str()).await.unwrap().is_true());

    app.clock.advance(Duration::seconds(1));
    assert!(!app.guard.validate_session(id.as_str()).await.unwrap().is_true());
    // Evicted on that lookup.
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_default_ttl_from_config() {
    let mut config = TestGuard::config(ModuleFlags::all());
    config.session.default_ttl = "30m".to_string();
    let app = TestGuard::with_config(config);

    let id = app
        .guard
        .create_session("a@x.com")
        .await
        .unwrap()
        .into_option()
        .unwrap();
    let session = app
        .guard
        .session(id.as_str())
        .await
        .unwrap()
        .into_option()
        .flatten()
        .unwrap();
    assert_eq!(session.subject_id.as_str(), "a@x.com");
    assert_eq!(session.expires_at - session.created_at, Duration::minutes(30));

    app.clock.advance(Duration::minutes(31));
    assert!(!app.guard.validate_session(id.as_str()).await.unwrap().is_true());
}

#[tokio::test]
async fn test_zero_ttl_session_is_never_valid() {
    let app = TestGuard::new();
    let id = app
        .guard
        .create_session_with_ttl("a@x.com", Duration::zero())
        .await
        .unwrap()
        .into_option()
        .unwrap();
    assert!(!app.guard.validate_session(id.as_str()).await.unwrap().is_true());
}

#[tokio::test]
async fn test_unknown_and_empty_ids_are_invalid() {
    let app = TestGuard::new();
    assert!(!app.guard.validate_session("").await.unwrap().is_true());
    assert!(!app.guard.validate_session("forged-id").await.unwrap().is_true());
}

#[tokio::test]
async fn test_session_ids_are_distinct() {
    let app = TestGuard::new();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..50 {
        let id = app
            .guard
            .create_session("a@x.com")
            .await
            .unwrap()
            .into_option()
            .unwrap();
        assert_eq!(id.as_str().len(), 43);
        assert!(seen.insert(id));
    }
}

#[tokio::test]
async fn test_logout_and_logout_everywhere() {
    let app = TestGuard::new();
    let one = app.guard.create_session("a@x.com").await.unwrap().into_option().unwrap();
    let two = app.guard.create_session("a@x.com").await.unwrap().into_option().unwrap();
    let other = app.guard.create_session("b@x.com").await.unwrap().into_option().unwrap();

    assert!(app.guard.invalidate_session(one.as_str()).await.unwrap().is_true());
    assert!(!app.guard.validate_session(one.as_str()).await.unwrap().is_true());
    assert!(app.guard.validate_session(two.as_str()).await.unwrap().is_true());

    assert_eq!(
        app.guard
            .invalidate_subject_sessions("a@x.com")
            .await
            .unwrap()
            .into_option(),
        Some(1)
    );
    assert!(!app.guard.validate_session(two.as_str()).await.unwrap().is_true());
    assert!(app.guard.validate_session(other.as_str()).await.unwrap().is_true());
}

#[tokio::test]
async fn test_manual_reap_removes_only_expired() {
    let app = TestGuard::new();
    app.guard
        .create_session_with_ttl("a@x.com", Duration::seconds(10))
        .await
        .unwrap();
    let live = app
        .guard
        .create_session_with_ttl("b@x.com", Duration::hours(1))
        .await
        .unwrap()
        .into_option()
        .unwrap();

    app.clock.advance(Duration::seconds(11));
    assert_eq!(app.guard.reap_expired_sessions().await.unwrap().into_option(), Some(1));
    assert_eq!(app.store.len(), 1);
    assert!(app.guard.validate_session(live.as_str()).await.unwrap().is_true());
}

#[tokio::test(start_paused = true)]
async fn test_background_reaper_sweeps_expired_sessions() {
    let mut config = TestGuard::config(ModuleFlags::none().with(GuardModule::Session, true));
    config.session.reaper_interval_seconds = 30;
    let app = TestGuard::with_config(config);

    app.guard
        .create_session_with_ttl("a@x.com", Duration::seconds(5))
        .await
        .unwrap();
    app.clock.advance(Duration::seconds(6));
    assert_eq!(app.store.len(), 1);

    tokio::time::sleep(StdDuration::from_secs(31)).await;
    for _ in 0..10 {
        if app.store.is_empty() {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(app.store.is_empty());

    app.guard.shutdown().await;
    // Idempotent.
    app.guard.shutdown().await;
}
