//! In-process [`AuthRepository`] backing the CLI and tests.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::watch;
use uuid::Uuid;

use super::error::AuthError;
use super::model::{unix_now, Credentials, User};
use super::repository::{AuthRepository, SessionUpdate};

/// Lifetime of an issued access token.
const SESSION_TTL_SECS: u64 = 3600;
const MIN_PASSWORD_LEN: usize = 6;
const DEFAULT_OTP: &str = "123456";

struct Account {
    user: User,
    password: Option<String>,
}

/// Accounts, passwords and one-time codes held in memory.
///
/// Sign-in and sign-up start a session immediately. OTP codes are always
/// [`InMemoryAuthRepository::otp_code`]. Scripted failures queued with
/// [`InMemoryAuthRepository::fail_next`] are returned by the next action
/// calls, in order.
pub struct InMemoryAuthRepository {
    accounts: Mutex<Vec<Account>>,
    pending_otps: Mutex<HashMap<String, String>>,
    failures: Mutex<VecDeque<AuthError>>,
    session: watch::Sender<SessionUpdate>,
    otp_code: String,
}

impl Default for InMemoryAuthRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        let (session, _) = watch::channel(SessionUpdate::SignedOut);
        Self {
            accounts: Mutex::new(Vec::new()),
            pending_otps: Mutex::new(HashMap::new()),
            failures: Mutex::new(VecDeque::new()),
            session,
            otp_code: DEFAULT_OTP.to_string(),
        }
    }

    /// Register an email account without signing in.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        let user = new_user(email, None, None);
        self.accounts.lock().push(Account {
            user,
            password: Some(password.to_string()),
        });
        self
    }

    /// Start a session for `email`, registering a passwordless account if
    /// none exists.
    pub fn sign_in_as(&self, email: &str) -> User {
        let existing = self.find(|user| user.email == email);
        let user = match existing {
            Some(user) => user,
            None => {
                let user = new_user(email, None, None);
                self.accounts.lock().push(Account {
                    user: user.clone(),
                    password: None,
                });
                user
            }
        };
        self.start_session(user)
    }

    pub fn otp_code(&self) -> &str {
        &self.otp_code
    }

    /// Make the next action call fail with `error`.
    pub fn fail_next(&self, error: AuthError) {
        self.failures.lock().push_back(error);
    }

    /// Replace the session as if the backend pushed it.
    pub fn set_session(&self, credentials: Option<Credentials>) {
        let update = match credentials {
            Some(credentials) => SessionUpdate::SignedIn(credentials),
            None => SessionUpdate::SignedOut,
        };
        self.session.send_replace(update);
    }

    /// Report that the backend is refreshing the session.
    pub fn begin_refresh(&self) {
        self.session.send_replace(SessionUpdate::Refreshing);
    }

    /// Report that the backend could not read the session.
    pub fn report_session_failure(&self, error: AuthError) {
        self.session.send_replace(SessionUpdate::Failed(error));
    }

    fn take_failure(&self) -> Result<(), AuthError> {
        match self.failures.lock().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn find(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        self.accounts
            .lock()
            .iter()
            .find(|account| predicate(&account.user))
            .map(|account| account.user.clone())
    }

    fn start_session(&self, mut user: User) -> User {
        let now = unix_now();
        user.last_sign_in_at = now;
        self.store_user(&user);
        self.session
            .send_replace(SessionUpdate::SignedIn(issue_credentials(user.clone(), now)));
        user
    }

    fn store_user(&self, user: &User) {
        if let Some(account) = self
            .accounts
            .lock()
            .iter_mut()
            .find(|account| account.user.id == user.id)
        {
            account.user = user.clone();
        }
    }

    fn active_user(&self) -> Result<User, AuthError> {
        self.current_user()
            .ok_or_else(|| AuthError::UserNotFound("No user is signed in".to_string()))
    }

    /// Check `password` against the signed-in account.
    fn verify_active_password(&self, password: &str) -> Result<User, AuthError> {
        let user = self.active_user()?;
        let accounts = self.accounts.lock();
        let matches = accounts
            .iter()
            .find(|account| account.user.id == user.id)
            .is_some_and(|account| account.password.as_deref() == Some(password));
        if !matches {
            return Err(AuthError::InvalidCredentials(
                "Incorrect password".to_string(),
            ));
        }
        Ok(user)
    }

    fn sign_in_with_password(
        &self,
        predicate: impl Fn(&User) -> bool,
        password: &str,
    ) -> Result<User, AuthError> {
        let user = {
            let accounts = self.accounts.lock();
            let account = accounts
                .iter()
                .find(|account| predicate(&account.user))
                .ok_or_else(|| AuthError::UserNotFound("User not found".to_string()))?;
            if account.password.as_deref() != Some(password) {
                return Err(AuthError::InvalidCredentials(
                    "Invalid login credentials".to_string(),
                ));
            }
            account.user.clone()
        };
        Ok(self.start_session(user))
    }

    fn sign_in_with_otp(&self, identifier: &str, otp: &str, phone: bool) -> Result<User, AuthError> {
        let expected = self.pending_otps.lock().get(identifier).cloned();
        match expected {
            None => return Err(AuthError::OtpExpired("Code expired".to_string())),
            Some(expected) if expected != otp => {
                return Err(AuthError::InvalidOtp("Invalid code".to_string()))
            }
            Some(_) => {}
        }
        self.pending_otps.lock().remove(identifier);

        let existing = if phone {
            self.find(|user| user.phone.as_deref() == Some(identifier))
        } else {
            self.find(|user| user.email == identifier)
        };
        let mut user = match existing {
            Some(user) => user,
            None => {
                let user = if phone {
                    new_user("", Some(identifier), None)
                } else {
                    new_user(identifier, None, None)
                };
                self.accounts.lock().push(Account {
                    user: user.clone(),
                    password: None,
                });
                user
            }
        };
        if phone {
            user.is_phone_verified = true;
        } else {
            user.is_email_verified = true;
        }
        Ok(self.start_session(user))
    }

    fn register(
        &self,
        email: &str,
        phone: Option<&str>,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User, AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(format!(
                "Password too short: at least {} characters required",
                MIN_PASSWORD_LEN
            )));
        }
        let user = new_user(email, phone, display_name);
        {
            let mut accounts = self.accounts.lock();
            if let Some(phone) = phone {
                if accounts
                    .iter()
                    .any(|a| a.user.phone.as_deref() == Some(phone))
                {
                    return Err(AuthError::PhoneAlreadyExists(
                        "Phone already registered".to_string(),
                    ));
                }
            } else if accounts.iter().any(|a| a.user.email == email) {
                return Err(AuthError::EmailAlreadyExists(
                    "User already registered".to_string(),
                ));
            }
            accounts.push(Account {
                user: user.clone(),
                password: Some(password.to_string()),
            });
        }
        Ok(self.start_session(user))
    }

    fn update_active(&self, apply: impl FnOnce(&mut User)) -> Result<User, AuthError> {
        let mut user = self.active_user()?;
        apply(&mut user);
        self.store_user(&user);
        self.reissue(user.clone());
        Ok(user)
    }

    /// Push a fresh token pair for `user` onto the session stream.
    fn reissue(&self, user: User) {
        self.session
            .send_replace(SessionUpdate::SignedIn(issue_credentials(user, unix_now())));
    }
}

fn new_user(email: &str, phone: Option<&str>, display_name: Option<&str>) -> User {
    User {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        phone: phone.map(str::to_string),
        display_name: display_name.map(str::to_string),
        created_at: unix_now(),
        ..User::default()
    }
}

fn issue_credentials(user: User, now: u64) -> Credentials {
    Credentials {
        user,
        access_token: Uuid::new_v4().to_string(),
        refresh_token: Some(Uuid::new_v4().to_string()),
        expires_at: Some(now + SESSION_TTL_SECS),
    }
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AuthError::InvalidEmail(format!("Invalid email format: {}", email))),
    }
}

fn validate_phone(phone: &str) -> Result<(), AuthError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.len() >= 7 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AuthError::InvalidPhone(format!("Invalid phone format: {}", phone)))
    }
}

#[async_trait]
impl AuthRepository for InMemoryAuthRepository {
    fn session_updates(&self) -> BoxStream<'static, SessionUpdate> {
        let receiver = self.session.subscribe();
        stream::unfold((receiver, true), |(mut receiver, first)| async move {
            if !first && receiver.changed().await.is_err() {
                return None;
            }
            let update = receiver.borrow_and_update().clone();
            Some((update, (receiver, false)))
        })
        .boxed()
    }

    fn current_session(&self) -> Option<Credentials> {
        match &*self.session.borrow() {
            SessionUpdate::SignedIn(credentials) => Some(credentials.clone()),
            _ => None,
        }
    }

    async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User, AuthError> {
        self.take_failure()?;
        validate_email(email)?;
        self.register(email, None, password, display_name)
    }

    async fn sign_up_with_phone(
        &self,
        phone: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User, AuthError> {
        self.take_failure()?;
        validate_phone(phone)?;
        self.register("", Some(phone), password, display_name)
    }

    async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.take_failure()?;
        validate_email(email)?;
        self.sign_in_with_password(|user| user.email == email, password)
    }

    async fn sign_in_with_phone(&self, phone: &str, password: &str) -> Result<User, AuthError> {
        self.take_failure()?;
        validate_phone(phone)?;
        self.sign_in_with_password(|user| user.phone.as_deref() == Some(phone), password)
    }

    async fn sign_in_with_email_otp(&self, email: &str, otp: &str) -> Result<User, AuthError> {
        self.take_failure()?;
        self.sign_in_with_otp(email, otp, false)
    }

    async fn sign_in_with_phone_otp(&self, phone: &str, otp: &str) -> Result<User, AuthError> {
        self.take_failure()?;
        self.sign_in_with_otp(phone, otp, true)
    }

    async fn send_email_otp(&self, email: &str) -> Result<(), AuthError> {
        self.take_failure()?;
        validate_email(email)?;
        self.pending_otps
            .lock()
            .insert(email.to_string(), self.otp_code.clone());
        Ok(())
    }

    async fn send_phone_otp(&self, phone: &str) -> Result<(), AuthError> {
        self.take_failure()?;
        validate_phone(phone)?;
        self.pending_otps
            .lock()
            .insert(phone.to_string(), self.otp_code.clone());
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.take_failure()?;
        self.session.send_replace(SessionUpdate::SignedOut);
        Ok(())
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        self.take_failure()?;
        validate_email(email)
    }

    async fn update_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<User, AuthError> {
        self.take_failure()?;
        let user = self.verify_active_password(current_password)?;
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword("Password too weak".to_string()));
        }
        if let Some(account) = self
            .accounts
            .lock()
            .iter_mut()
            .find(|account| account.user.id == user.id)
        {
            account.password = Some(new_password.to_string());
        }
        Ok(user)
    }

    async fn update_email(&self, new_email: &str, password: &str) -> Result<User, AuthError> {
        self.take_failure()?;
        validate_email(new_email)?;
        self.verify_active_password(password)?;
        if self.find(|user| user.email == new_email).is_some() {
            return Err(AuthError::EmailAlreadyExists(
                "Email already exists".to_string(),
            ));
        }
        self.update_active(|user| {
            user.email = new_email.to_string();
            user.is_email_verified = false;
        })
    }

    async fn update_phone(&self, new_phone: &str, password: &str) -> Result<User, AuthError> {
        self.take_failure()?;
        validate_phone(new_phone)?;
        self.verify_active_password(password)?;
        if self
            .find(|user| user.phone.as_deref() == Some(new_phone))
            .is_some()
        {
            return Err(AuthError::PhoneAlreadyExists(
                "Phone already exists".to_string(),
            ));
        }
        self.update_active(|user| {
            user.phone = Some(new_phone.to_string());
            user.is_phone_verified = false;
        })
    }

    async fn update_display_name(&self, display_name: &str) -> Result<User, AuthError> {
        self.take_failure()?;
        self.update_active(|user| user.display_name = Some(display_name.to_string()))
    }

    async fn update_avatar_url(&self, avatar_url: &str) -> Result<User, AuthError> {
        self.take_failure()?;
        self.update_active(|user| user.avatar_url = Some(avatar_url.to_string()))
    }

    async fn delete_account(&self, password: &str) -> Result<(), AuthError> {
        self.take_failure()?;
        let user = self.verify_active_password(password)?;
        self.accounts
            .lock()
            .retain(|account| account.user.id != user.id);
        self.session.send_replace(SessionUpdate::SignedOut);
        Ok(())
    }

    async fn refresh_session(&self) -> Result<User, AuthError> {
        self.take_failure()?;
        let user = self.active_user()?;
        self.session.send_replace(SessionUpdate::Refreshing);
        self.reissue(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_in_starts_session() {
        let repo = InMemoryAuthRepository::new().with_account("a@b.com", "secret1");
        assert!(!repo.is_user_authenticated());

        let user = repo.sign_in_with_email("a@b.com", "secret1").await.unwrap();

        assert_eq!(user.email, "a@b.com");
        assert!(repo.is_user_authenticated());
        assert_eq!(repo.current_user().map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let repo = InMemoryAuthRepository::new().with_account("a@b.com", "secret1");
        let err = repo.sign_in_with_email("a@b.com", "nope").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));
        assert!(!repo.is_user_authenticated());
    }

    #[tokio::test]
    async fn scripted_failure_is_returned_once() {
        let repo = InMemoryAuthRepository::new().with_account("a@b.com", "secret1");
        repo.fail_next(AuthError::Network("offline".into()));

        let first = repo.sign_in_with_email("a@b.com", "secret1").await;
        let second = repo.sign_in_with_email("a@b.com", "secret1").await;

        assert_eq!(first, Err(AuthError::Network("offline".into())));
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn otp_flow_requires_sent_code() {
        let repo = InMemoryAuthRepository::new();
        let err = repo
            .sign_in_with_email_otp("a@b.com", "123456")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::OtpExpired(_)));

        repo.send_email_otp("a@b.com").await.unwrap();
        let err = repo
            .sign_in_with_email_otp("a@b.com", "000000")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidOtp(_)));

        let code = repo.otp_code().to_string();
        let user = repo.sign_in_with_email_otp("a@b.com", &code).await.unwrap();
        assert!(user.is_email_verified);
    }

    #[tokio::test]
    async fn sign_up_rejects_duplicates_and_weak_passwords() {
        let repo = InMemoryAuthRepository::new().with_account("a@b.com", "secret1");
        let dup = repo.sign_up_with_email("a@b.com", "secret2", None).await;
        assert!(matches!(dup, Err(AuthError::EmailAlreadyExists(_))));

        let weak = repo.sign_up_with_email("c@d.com", "123", None).await;
        assert!(matches!(weak, Err(AuthError::WeakPassword(_))));
    }

    #[tokio::test]
    async fn session_stream_replays_current_then_changes() {
        let repo = InMemoryAuthRepository::new();
        let user = repo.sign_in_as("a@b.com");
        let mut updates = repo.session_updates();

        match updates.next().await {
            Some(SessionUpdate::SignedIn(credentials)) => assert_eq!(credentials.user.id, user.id),
            other => panic!("expected signed-in replay, got {:?}", other),
        }

        repo.sign_out().await.unwrap();
        assert_eq!(updates.next().await, Some(SessionUpdate::SignedOut));
    }

    #[tokio::test]
    async fn delete_account_signs_out() {
        let repo = InMemoryAuthRepository::new().with_account("a@b.com", "secret1");
        repo.sign_in_with_email("a@b.com", "secret1").await.unwrap();

        repo.delete_account("secret1").await.unwrap();

        assert!(!repo.is_user_authenticated());
        let again = repo.sign_in_with_email("a@b.com", "secret1").await;
        assert!(matches!(again, Err(AuthError::UserNotFound(_))));
    }
}
