//! Authentication error classification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by [`AuthRepository`](super::AuthRepository) operations.
///
/// Every variant carries the backend's message so the UI can show it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum AuthError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Phone already exists: {0}")]
    PhoneAlreadyExists(String),

    #[error("Email not verified: {0}")]
    EmailNotVerified(String),

    #[error("Phone not verified: {0}")]
    PhoneNotVerified(String),

    #[error("Weak password: {0}")]
    WeakPassword(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid phone: {0}")]
    InvalidPhone(String),

    #[error("Invalid OTP: {0}")]
    InvalidOtp(String),

    #[error("OTP expired: {0}")]
    OtpExpired(String),

    #[error("Too many attempts: {0}")]
    TooManyAttempts(String),

    #[error("User disabled: {0}")]
    UserDisabled(String),

    #[error("{0}")]
    Generic(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Keyword table used by [`AuthError::from_message`]. First match wins.
const CLASSIFIERS: &[(&[&str], fn(String) -> AuthError)] = &[
    (&["network", "timeout", "connection"], AuthError::Network),
    (
        &[
            "invalid credentials",
            "invalid login",
            "wrong password",
            "incorrect password",
        ],
        AuthError::InvalidCredentials,
    ),
    (
        &["user not found", "no user found", "user does not exist"],
        AuthError::UserNotFound,
    ),
    (
        &[
            "email already registered",
            "user already registered",
            "email already exists",
        ],
        AuthError::EmailAlreadyExists,
    ),
    (
        &["phone already registered", "phone already exists"],
        AuthError::PhoneAlreadyExists,
    ),
    (
        &["email not confirmed", "email not verified", "confirm your email"],
        AuthError::EmailNotVerified,
    ),
    (
        &["phone not confirmed", "phone not verified", "confirm your phone"],
        AuthError::PhoneNotVerified,
    ),
    (
        &[
            "password too weak",
            "password too short",
            "password requirements",
        ],
        AuthError::WeakPassword,
    ),
    (
        &["invalid email", "email format", "malformed email"],
        AuthError::InvalidEmail,
    ),
    (
        &["invalid phone", "phone format", "malformed phone"],
        AuthError::InvalidPhone,
    ),
    (
        &["invalid otp", "invalid code", "wrong otp"],
        AuthError::InvalidOtp,
    ),
    (
        &["otp expired", "code expired", "expired code"],
        AuthError::OtpExpired,
    ),
    (
        &["too many attempts", "rate limit", "too many requests"],
        AuthError::TooManyAttempts,
    ),
    (
        &["user disabled", "account disabled", "user banned"],
        AuthError::UserDisabled,
    ),
];

impl AuthError {
    /// Classify a raw backend message by keyword, case-insensitively.
    ///
    /// Messages matching no keyword become [`AuthError::Generic`].
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_lowercase();
        for (keywords, build) in CLASSIFIERS {
            if keywords.iter().any(|keyword| lowered.contains(keyword)) {
                return build(message);
            }
        }
        AuthError::Generic(message)
    }

    /// The backend message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            AuthError::Network(m)
            | AuthError::InvalidCredentials(m)
            | AuthError::UserNotFound(m)
            | AuthError::EmailAlreadyExists(m)
            | AuthError::PhoneAlreadyExists(m)
            | AuthError::EmailNotVerified(m)
            | AuthError::PhoneNotVerified(m)
            | AuthError::WeakPassword(m)
            | AuthError::InvalidEmail(m)
            | AuthError::InvalidPhone(m)
            | AuthError::InvalidOtp(m)
            | AuthError::OtpExpired(m)
            | AuthError::TooManyAttempts(m)
            | AuthError::UserDisabled(m)
            | AuthError::Generic(m)
            | AuthError::Unknown(m) => m,
        }
    }

    /// Stable tag for logs and analytics.
    pub fn error_type(&self) -> &'static str {
        match self {
            AuthError::Network(_) => "network_error",
            AuthError::InvalidCredentials(_) => "invalid_credentials",
            AuthError::UserNotFound(_) => "user_not_found",
            AuthError::EmailAlreadyExists(_) => "email_already_exists",
            AuthError::PhoneAlreadyExists(_) => "phone_already_exists",
            AuthError::EmailNotVerified(_) => "email_not_verified",
            AuthError::PhoneNotVerified(_) => "phone_not_verified",
            AuthError::WeakPassword(_) => "weak_password",
            AuthError::InvalidEmail(_) => "invalid_email",
            AuthError::InvalidPhone(_) => "invalid_phone",
            AuthError::InvalidOtp(_) => "invalid_otp",
            AuthError::OtpExpired(_) => "otp_expired",
            AuthError::TooManyAttempts(_) => "too_many_attempts",
            AuthError::UserDisabled(_) => "user_disabled",
            AuthError::Generic(_) => "generic_error",
            AuthError::Unknown(_) => "unknown_error",
        }
    }
}
