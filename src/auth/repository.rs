use async_trait::async_trait;
use futures::stream::BoxStream;

use super::error::AuthError;
use super::model::{unix_now, Credentials, User};

/// A change in the backend session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    SignedIn(Credentials),
    SignedOut,
    Refreshing,
    /// The backend could not report the session.
    Failed(AuthError),
}

/// Authentication backend.
///
/// `session_updates` is hot: each call yields the current session first and
/// then every later change. Action methods update the session stream
/// themselves; callers never push session state.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    fn session_updates(&self) -> BoxStream<'static, SessionUpdate>;

    /// Snapshot of the active session, if any.
    fn current_session(&self) -> Option<Credentials>;

    fn current_user(&self) -> Option<User> {
        self.current_session().map(|credentials| credentials.user)
    }

    /// True while an unexpired session is active.
    fn is_user_authenticated(&self) -> bool {
        self.current_session()
            .is_some_and(|credentials| !credentials.is_expired_at(unix_now()))
    }

    async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User, AuthError>;

    async fn sign_up_with_phone(
        &self,
        phone: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User, AuthError>;

    async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn sign_in_with_phone(&self, phone: &str, password: &str) -> Result<User, AuthError>;

    async fn sign_in_with_email_otp(&self, email: &str, otp: &str) -> Result<User, AuthError>;

    async fn sign_in_with_phone_otp(&self, phone: &str, otp: &str) -> Result<User, AuthError>;

    async fn send_email_otp(&self, email: &str) -> Result<(), AuthError>;

    async fn send_phone_otp(&self, phone: &str) -> Result<(), AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    async fn reset_password(&self, email: &str) -> Result<(), AuthError>;

    async fn update_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<User, AuthError>;

    async fn update_email(&self, new_email: &str, password: &str) -> Result<User, AuthError>;

    async fn update_phone(&self, new_phone: &str, password: &str) -> Result<User, AuthError>;

    async fn update_display_name(&self, display_name: &str) -> Result<User, AuthError>;

    async fn update_avatar_url(&self, avatar_url: &str) -> Result<User, AuthError>;

    async fn delete_account(&self, password: &str) -> Result<(), AuthError>;

    async fn refresh_session(&self) -> Result<User, AuthError>;
}
