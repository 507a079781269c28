//! Service-level tests for registration and login over the in-memory store.

use std::sync::Arc;

use accounts_api::config::Config;
use accounts_api::domain::{LoginRequest, RegisterRequest};
use accounts_api::errors::AppError;
use accounts_api::infra::InMemoryUserStore;
use accounts_api::services::{AuthService, Authenticator, JwtTokenProvider};

const SECRET: &str = "test-secret-key-for-testing-only-32chars";

fn service() -> (Authenticator, Arc<InMemoryUserStore>) {
    let config = Config::builder(SECRET).build().unwrap();
    let store = Arc::new(InMemoryUserStore::new());
    let tokens = Arc::new(JwtTokenProvider::from_config(&config));
    (Authenticator::new(store.clone(), tokens), store)
}

#[tokio::test]
async fn test_register_then_authenticate() {
    let (auth, _store) = service();

    let user = auth
        .register(RegisterRequest::new("carol", "correct-horse"))
        .await
        .unwrap();

    let found = auth.authenticate("carol", "correct-horse").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));
    assert!(auth.authenticate("carol", "wrong-horse").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_trims_username() {
    let (auth, store) = service();

    let user = auth
        .register(RegisterRequest::new("  dave  ", "correct-horse"))
        .await
        .unwrap();

    assert_eq!(user.username, "dave");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_register_invalid_username_characters() {
    let (auth, store) = service();

    let result = auth
        .register(RegisterRequest::new("bad name!", "correct-horse"))
        .await;

    assert!(matches!(result, Err(AppError::Validation(ref e)) if e.contains("username")));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_register_overlong_username() {
    let (auth, store) = service();

    let result = auth
        .register(RegisterRequest::new("a".repeat(151), "correct-horse"))
        .await;

    assert!(matches!(result, Err(AppError::Validation(ref e)) if e.contains("username")));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_concurrent_duplicate_registrations_keep_one_user() {
    let (auth, store) = service();
    let auth = Arc::new(auth);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let auth = auth.clone();
            tokio::spawn(async move {
                auth.register(RegisterRequest::new("erin", "correct-horse"))
                    .await
                    .is_ok()
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_login_after_deactivation_fails() {
    let (auth, store) = service();
    auth.register(RegisterRequest::new("frank", "correct-horse"))
        .await
        .unwrap();

    assert!(auth.login(LoginRequest::new("frank", "correct-horse")).await.is_ok());

    store.set_active("frank", false).await;
    let result = auth.login(LoginRequest::new("frank", "correct-horse")).await;
    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_login_missing_password() {
    let (auth, _store) = service();

    let result = auth.login(LoginRequest::new("frank", "")).await;

    assert!(matches!(result, Err(AppError::MissingCredentials)));
}
