//! Onboarding store: slide paging and the one-time completion write.

mod bootstrapper;
mod event;
mod executor;
mod intent;
mod reducer;
mod state;

use std::sync::Arc;

use crate::mvi::{Scope, Store};
use crate::onboarding::OnboardingRepository;
use crate::telemetry::Logger;

pub use event::{OnboardingAction, OnboardingLabel, OnboardingMessage};
pub use intent::OnboardingIntent;
pub use reducer::OnboardingReducer;
pub use state::OnboardingState;

use bootstrapper::OnboardingBootstrapper;
use executor::OnboardingExecutor;

pub type OnboardingStore = Store<OnboardingIntent, OnboardingState, OnboardingLabel>;

/// Start an onboarding store showing `initial_page` once slides load.
pub fn create_onboarding_store(
    repository: Arc<dyn OnboardingRepository>,
    logger: Arc<dyn Logger>,
    initial_page: usize,
    scope: Scope,
) -> OnboardingStore {
    Store::create(
        "onboarding",
        OnboardingState::loading(initial_page),
        scope,
        OnboardingBootstrapper::new(Arc::clone(&repository)),
        OnboardingExecutor::new(repository, logger),
        OnboardingReducer,
    )
}
