mod common;

use std::sync::Arc;

use appnav::auth::store::{create_auth_store, AuthIntent, AuthLabel};
use appnav::auth::{AuthError, AuthRepository, Credentials, InMemoryAuthRepository};
use appnav::mvi::Scope;
use common::{next_label, wait_for};

fn sign_in(email: &str, password: &str) -> AuthIntent {
    AuthIntent::SignInWithEmail {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn network_failure_becomes_state_error() {
    let repo = Arc::new(InMemoryAuthRepository::new().with_account("a@b.com", "secret"));
    repo.fail_next(AuthError::from_message("Network request failed: timeout"));
    let store = create_auth_store(repo.clone(), Scope::new());
    let mut states = store.states();

    store.accept(sign_in("a@b.com", "pw"));

    let state = wait_for(&mut states, |s| s.error.is_some()).await;
    let error = state.error.unwrap();
    assert!(matches!(error, AuthError::Network(_)), "got {:?}", error);
    assert_eq!(error.error_type(), "network_error");
    assert!(!state.is_loading);
    assert!(!state.is_authenticated);
    assert!(!repo.is_user_authenticated());
}

#[tokio::test]
async fn successful_sign_in_navigates_home() {
    let repo = Arc::new(InMemoryAuthRepository::new().with_account("a@b.com", "secret"));
    let store = create_auth_store(repo.clone(), Scope::new());
    let mut labels = store.labels();
    let mut states = store.states();

    store.accept(sign_in("a@b.com", "secret"));

    assert_eq!(next_label(&mut labels).await, AuthLabel::NavigateToHome);
    let state = wait_for(&mut states, |s| s.is_authenticated && !s.is_loading).await;
    assert_eq!(state.user.map(|u| u.email), Some("a@b.com".to_string()));
    assert!(repo.is_user_authenticated());
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let repo = Arc::new(InMemoryAuthRepository::new().with_account("a@b.com", "secret"));
    let store = create_auth_store(repo, Scope::new());
    let mut states = store.states();

    store.accept(sign_in("a@b.com", "nope"));

    let state = wait_for(&mut states, |s| s.error.is_some()).await;
    assert!(matches!(state.error, Some(AuthError::InvalidCredentials(_))));

    store.accept(AuthIntent::ClearError);
    wait_for(&mut states, |s| s.error.is_none()).await;
}

#[tokio::test]
async fn bootstrapper_follows_existing_session() {
    let repo = Arc::new(InMemoryAuthRepository::new());
    let user = repo.sign_in_as("known@example.com");
    let store = create_auth_store(repo.clone(), Scope::new());
    let mut states = store.states();

    let state = wait_for(&mut states, |s| s.is_authenticated).await;
    assert_eq!(state.user.map(|u| u.id), Some(user.id));

    repo.set_session(None);
    wait_for(&mut states, |s| !s.is_authenticated && s.user.is_none()).await;
}

#[tokio::test]
async fn sign_out_navigates_to_auth() {
    let repo = Arc::new(InMemoryAuthRepository::new());
    repo.sign_in_as("a@b.com");
    let store = create_auth_store(repo.clone(), Scope::new());
    let mut labels = store.labels();

    store.accept(AuthIntent::SignOut);

    assert_eq!(next_label(&mut labels).await, AuthLabel::NavigateToAuth);
    assert!(!repo.is_user_authenticated());
}

#[tokio::test]
async fn otp_flow_signs_in() {
    let repo = Arc::new(InMemoryAuthRepository::new());
    let store = create_auth_store(repo.clone(), Scope::new());
    let mut labels = store.labels();

    store.accept(AuthIntent::SendEmailOtp {
        email: "otp@example.com".to_string(),
    });
    assert_eq!(next_label(&mut labels).await, AuthLabel::ShowOtpSent);

    store.accept(AuthIntent::SignInWithEmailOtp {
        email: "otp@example.com".to_string(),
        otp: repo.otp_code().to_string(),
    });
    assert_eq!(next_label(&mut labels).await, AuthLabel::NavigateToHome);
    assert_eq!(
        repo.current_user().map(|u| u.email),
        Some("otp@example.com".to_string())
    );
}

#[tokio::test]
async fn delete_account_emits_labels_in_order() {
    let repo = Arc::new(InMemoryAuthRepository::new().with_account("a@b.com", "secret"));
    let store = create_auth_store(repo.clone(), Scope::new());
    let mut labels = store.labels();

    store.accept(sign_in("a@b.com", "secret"));
    assert_eq!(next_label(&mut labels).await, AuthLabel::NavigateToHome);

    store.accept(AuthIntent::DeleteAccount {
        password: "secret".to_string(),
    });
    assert_eq!(next_label(&mut labels).await, AuthLabel::ShowAccountDeleted);
    assert_eq!(next_label(&mut labels).await, AuthLabel::NavigateToAuth);
    assert!(!repo.is_user_authenticated());
}

#[tokio::test]
async fn expired_session_is_not_a_signed_in_user() {
    let repo = Arc::new(InMemoryAuthRepository::new());
    let user = repo.sign_in_as("a@b.com");
    let store = create_auth_store(repo.clone(), Scope::new());
    let mut states = store.states();
    wait_for(&mut states, |s| s.is_authenticated).await;

    repo.set_session(Some(Credentials {
        user,
        access_token: "stale".to_string(),
        refresh_token: None,
        expires_at: Some(1),
    }));

    let state = wait_for(&mut states, |s| !s.is_authenticated).await;
    assert!(state.user.is_none());
}
