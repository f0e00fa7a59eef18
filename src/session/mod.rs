//! Hot, current-value stream of the authentication session.
//!
//! The observer is the only producer of [`SessionState`] transitions. It
//! seeds itself from the repository snapshot and then follows the
//! repository's update stream until its scope is cancelled.

use std::sync::Arc;

use futures::StreamExt;
use serde::Serialize;
use tokio::sync::watch;

use crate::auth::{unix_now, AuthRepository, Credentials, SessionUpdate, User};
use crate::mvi::Scope;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Unauthenticated,
    Authenticated {
        user: User,
        access_token: String,
        refresh_token: Option<String>,
        expires_at: Option<u64>,
    },
    Refreshing,
    Expired,
}

impl SessionState {
    /// Session for `credentials`, or `Expired` if they expired before `now`.
    pub fn from_credentials(credentials: Credentials, now: u64) -> Self {
        if credentials.is_expired_at(now) {
            return SessionState::Expired;
        }
        SessionState::Authenticated {
            user: credentials.user,
            access_token: credentials.access_token,
            refresh_token: credentials.refresh_token,
            expires_at: credentials.expires_at,
        }
    }

    /// Map a repository update. Failures fail closed.
    pub fn from_update(update: SessionUpdate, now: u64) -> Self {
        match update {
            SessionUpdate::SignedIn(credentials) => Self::from_credentials(credentials, now),
            SessionUpdate::SignedOut => SessionState::Unauthenticated,
            SessionUpdate::Refreshing => SessionState::Refreshing,
            SessionUpdate::Failed(error) => {
                tracing::warn!(
                    error_type = error.error_type(),
                    "session read failed, treating as signed out"
                );
                SessionState::Unauthenticated
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    /// Short variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::Authenticated { .. } => "authenticated",
            SessionState::Refreshing => "refreshing",
            SessionState::Expired => "expired",
        }
    }
}

/// Multi-subscriber session stream.
///
/// New subscribers see the latest value immediately; adding or dropping
/// subscribers never resets or repeats the underlying subscription.
#[derive(Clone)]
pub struct SessionObserver {
    state: watch::Receiver<SessionState>,
}

impl SessionObserver {
    /// Start observing on the current runtime until `scope` is cancelled.
    pub fn start(repository: Arc<dyn AuthRepository>, scope: Scope) -> Self {
        let initial = match repository.current_session() {
            Some(credentials) => SessionState::from_credentials(credentials, unix_now()),
            None => SessionState::Unauthenticated,
        };
        tracing::debug!(session = initial.kind(), "session observer started");

        let (tx, rx) = watch::channel(initial);
        let mut updates = repository.session_updates();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = scope.cancelled() => break,
                    update = updates.next() => {
                        let Some(update) = update else {
                            tracing::debug!("session stream ended, keeping last state");
                            break;
                        };
                        let next = SessionState::from_update(update, unix_now());
                        tx.send_if_modified(|current| {
                            if *current == next {
                                return false;
                            }
                            tracing::info!(
                                from = current.kind(),
                                to = next.kind(),
                                "session changed"
                            );
                            *current = next;
                            true
                        });
                    }
                }
            }
        });

        Self { state: rx }
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// A receiver whose current value is the latest session.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        let mut receiver = self.state.clone();
        receiver.mark_changed();
        receiver
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }
}
