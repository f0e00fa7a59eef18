use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use crate::auth::store::{create_auth_store, AuthIntent, AuthLabel, AuthState, AuthStore};
use crate::auth::AuthRepository;
use crate::mvi::Scope;
use crate::navigation::NavigationCallback;

/// Authentication screen: owns an auth store and turns its navigation
/// labels into router callbacks.
///
/// Other labels are for the rendering layer; subscribe with [`labels`](Self::labels).
pub struct AuthComponent {
    store: AuthStore,
}

impl AuthComponent {
    pub fn new(
        repository: Arc<dyn AuthRepository>,
        scope: Scope,
        on_navigate_home: NavigationCallback,
        on_navigate_auth: NavigationCallback,
    ) -> Self {
        let store = create_auth_store(repository, scope);
        store.bind_labels(move |label| match label {
            AuthLabel::NavigateToHome => on_navigate_home(),
            AuthLabel::NavigateToAuth => on_navigate_auth(),
            AuthLabel::ShowPasswordResetSent
            | AuthLabel::ShowOtpSent
            | AuthLabel::ShowAccountDeleted => {}
        });
        Self { store }
    }

    pub fn state(&self) -> AuthState {
        self.store.state()
    }

    pub fn states(&self) -> watch::Receiver<AuthState> {
        self.store.states()
    }

    pub fn labels(&self) -> broadcast::Receiver<AuthLabel> {
        self.store.labels()
    }

    pub fn accept(&self, intent: AuthIntent) {
        self.store.accept(intent);
    }
}
