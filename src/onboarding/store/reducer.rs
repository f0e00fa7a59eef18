use crate::mvi::Reducer;
use crate::onboarding::store::event::OnboardingMessage;
use crate::onboarding::store::state::OnboardingState;

pub struct OnboardingReducer;

impl Reducer for OnboardingReducer {
    type State = OnboardingState;
    type Message = OnboardingMessage;

    fn reduce(state: Self::State, message: Self::Message) -> Self::State {
        match message {
            OnboardingMessage::SlidesLoaded(slides) => {
                let total_slides = slides.len();
                OnboardingState {
                    current_slide: state.current_slide.min(total_slides.saturating_sub(1)),
                    total_slides,
                    is_loading: false,
                    slides,
                    ..state
                }
            }
            OnboardingMessage::PreviousClicked => OnboardingState {
                current_slide: state.current_slide.saturating_sub(1).min(state.last_index()),
                ..state
            },
            OnboardingMessage::NextClicked => OnboardingState {
                current_slide: state.current_slide.saturating_add(1).min(state.last_index()),
                ..state
            },
            OnboardingMessage::Completing => OnboardingState {
                is_completing: true,
                error: None,
                ..state
            },
            OnboardingMessage::CompletionFailed(error) => OnboardingState {
                is_completing: false,
                error: Some(error),
                ..state
            },
        }
    }
}
