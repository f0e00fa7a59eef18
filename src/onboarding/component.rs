use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::mvi::Scope;
use crate::navigation::NavigationCallback;
use crate::onboarding::store::{
    create_onboarding_store, OnboardingIntent, OnboardingLabel, OnboardingState, OnboardingStore,
};
use crate::onboarding::{OnboardingRepository, Slide};
use crate::telemetry::Logger;

/// Render model derived from [`OnboardingState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingModel {
    pub current_slide: usize,
    pub total_slides: usize,
    pub is_loading: bool,
    pub slides: Vec<Slide>,
    pub is_first_slide: bool,
    pub is_last_slide: bool,
    pub error: Option<String>,
}

impl From<&OnboardingState> for OnboardingModel {
    fn from(state: &OnboardingState) -> Self {
        Self {
            current_slide: state.current_slide,
            total_slides: state.total_slides,
            is_loading: state.is_loading,
            slides: state.slides.clone(),
            is_first_slide: state.current_slide == 0,
            is_last_slide: state.total_slides > 0 && state.current_slide == state.last_index(),
            error: state.error.clone(),
        }
    }
}

pub struct OnboardingComponent {
    store: OnboardingStore,
}

impl OnboardingComponent {
    pub fn new(
        repository: Arc<dyn OnboardingRepository>,
        logger: Arc<dyn Logger>,
        initial_page: usize,
        scope: Scope,
        on_navigate_home: NavigationCallback,
    ) -> Self {
        let store = create_onboarding_store(repository, logger, initial_page, scope);
        store.bind_labels(move |label| match label {
            OnboardingLabel::NavigateToHome => on_navigate_home(),
        });
        Self { store }
    }

    pub fn model(&self) -> OnboardingModel {
        OnboardingModel::from(&self.store.state())
    }

    pub fn states(&self) -> watch::Receiver<OnboardingState> {
        self.store.states()
    }

    pub fn accept(&self, intent: OnboardingIntent) {
        self.store.accept(intent);
    }

    pub fn on_skip(&self) {
        self.accept(OnboardingIntent::SkipOnboarding);
    }

    pub fn on_next(&self) {
        self.accept(OnboardingIntent::NextSlide);
    }

    pub fn on_previous(&self) {
        self.accept(OnboardingIntent::PreviousSlide);
    }

    pub fn on_complete(&self) {
        self.accept(OnboardingIntent::CompleteOnboarding);
    }
}
