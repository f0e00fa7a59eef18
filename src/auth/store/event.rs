use crate::auth::{AuthError, User};
use crate::mvi::{Action, Label, Message};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    /// The repository's session changed.
    UserChanged(Option<User>),
}

impl Action for AuthAction {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMessage {
    /// An operation started (`true`); clears any previous error.
    SetLoading(bool),
    /// Session stream update. Leaves loading and error untouched so it
    /// cannot mask the outcome of an in-flight operation.
    UserChanged(Option<User>),
    /// An operation returned the signed-in user.
    UserReceived(User),
    SignedOut,
    /// An operation without a user result succeeded.
    Completed,
    Failed(AuthError),
    ClearError,
}

impl Message for AuthMessage {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthLabel {
    NavigateToHome,
    NavigateToAuth,
    ShowPasswordResetSent,
    ShowOtpSent,
    ShowAccountDeleted,
}

impl Label for AuthLabel {}
