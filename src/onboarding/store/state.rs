use serde::Serialize;

use crate::mvi::UiState;
use crate::onboarding::Slide;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OnboardingState {
    pub current_slide: usize,
    pub total_slides: usize,
    pub is_loading: bool,
    pub slides: Vec<Slide>,
    /// The completion write is in flight or has succeeded.
    pub is_completing: bool,
    /// Last completion failure, cleared on retry.
    pub error: Option<String>,
}

impl UiState for OnboardingState {}

impl OnboardingState {
    /// State before slides arrive. `current_slide` is clamped once they do.
    pub fn loading(initial_page: usize) -> Self {
        Self {
            current_slide: initial_page,
            is_loading: true,
            ..Self::default()
        }
    }

    pub fn last_index(&self) -> usize {
        self.total_slides.saturating_sub(1)
    }
}
