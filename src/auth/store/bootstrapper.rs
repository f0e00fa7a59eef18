use std::sync::Arc;

use futures::StreamExt;

use crate::auth::store::event::AuthAction;
use crate::auth::{unix_now, AuthRepository, SessionUpdate};
use crate::mvi::{Bootstrapper, BootstrapperContext};

/// Follows the repository session stream for the lifetime of the store.
pub(super) struct AuthBootstrapper {
    repository: Arc<dyn AuthRepository>,
}

impl AuthBootstrapper {
    pub(super) fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }
}

impl Bootstrapper for AuthBootstrapper {
    type Action = AuthAction;

    fn invoke(&mut self, context: BootstrapperContext<AuthAction>) {
        let mut updates = self.repository.session_updates();
        let sink = context.clone();
        context.launch(async move {
            while let Some(update) = updates.next().await {
                match update {
                    SessionUpdate::SignedIn(credentials) => {
                        let user = (!credentials.is_expired_at(unix_now()))
                            .then_some(credentials.user);
                        sink.dispatch(AuthAction::UserChanged(user))
                    }
                    SessionUpdate::SignedOut | SessionUpdate::Failed(_) => {
                        sink.dispatch(AuthAction::UserChanged(None))
                    }
                    SessionUpdate::Refreshing => {}
                }
            }
        });
    }
}
