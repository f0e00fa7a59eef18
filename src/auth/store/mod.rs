//! Auth store: sign-in, sign-up, OTP and account management flows.

mod bootstrapper;
mod event;
mod executor;
mod intent;
mod reducer;
mod state;

use std::sync::Arc;

use crate::auth::AuthRepository;
use crate::mvi::{Scope, Store};

pub use event::{AuthAction, AuthLabel, AuthMessage};
pub use intent::AuthIntent;
pub use reducer::AuthReducer;
pub use state::AuthState;

use bootstrapper::AuthBootstrapper;
use executor::AuthExecutor;

pub type AuthStore = Store<AuthIntent, AuthState, AuthLabel>;

/// Start an auth store that follows the repository's session stream.
pub fn create_auth_store(repository: Arc<dyn AuthRepository>, scope: Scope) -> AuthStore {
    Store::create(
        "auth",
        AuthState::default(),
        scope,
        AuthBootstrapper::new(Arc::clone(&repository)),
        AuthExecutor::new(repository),
        AuthReducer,
    )
}
