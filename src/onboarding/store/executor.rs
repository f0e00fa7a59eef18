use std::sync::Arc;

use crate::mvi::{ContextOf, Executor};
use crate::onboarding::store::event::{OnboardingAction, OnboardingLabel, OnboardingMessage};
use crate::onboarding::store::intent::OnboardingIntent;
use crate::onboarding::store::state::OnboardingState;
use crate::onboarding::OnboardingRepository;
use crate::telemetry::Logger;

const LOG_TAG: &str = "Onboarding";

/// Completion bookkeeping. Only the store task touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Idle,
    InFlight,
    Done,
}

pub(super) struct OnboardingExecutor {
    repository: Arc<dyn OnboardingRepository>,
    logger: Arc<dyn Logger>,
    completion: Completion,
}

impl OnboardingExecutor {
    pub(super) fn new(repository: Arc<dyn OnboardingRepository>, logger: Arc<dyn Logger>) -> Self {
        Self {
            repository,
            logger,
            completion: Completion::Idle,
        }
    }

    fn complete(&mut self, context: &ContextOf<Self>) {
        if self.completion != Completion::Idle {
            tracing::debug!(
                store = "onboarding",
                completion = ?self.completion,
                "completion already requested"
            );
            return;
        }
        self.completion = Completion::InFlight;
        context.dispatch(OnboardingMessage::Completing);

        let repository = Arc::clone(&self.repository);
        let ctx = context.clone();
        context.launch(async move {
            let error = repository
                .mark_onboarding_completed()
                .await
                .err()
                .map(|e| e.to_string());
            ctx.forward(OnboardingAction::CompletionFinished { error });
        });
    }
}

impl Executor for OnboardingExecutor {
    type Intent = OnboardingIntent;
    type Action = OnboardingAction;
    type State = OnboardingState;
    type Message = OnboardingMessage;
    type Label = OnboardingLabel;

    fn execute_intent(&mut self, intent: OnboardingIntent, context: &ContextOf<Self>) {
        match intent {
            OnboardingIntent::SkipOnboarding => {
                self.logger.info(LOG_TAG, "Skip onboarding clicked");
                self.complete(context);
            }
            OnboardingIntent::CompleteOnboarding => {
                self.logger.info(LOG_TAG, "Completing onboarding clicked");
                self.complete(context);
            }
            OnboardingIntent::NextSlide => context.dispatch(OnboardingMessage::NextClicked),
            OnboardingIntent::PreviousSlide => context.dispatch(OnboardingMessage::PreviousClicked),
        }
    }

    fn execute_action(&mut self, action: OnboardingAction, context: &ContextOf<Self>) {
        match action {
            OnboardingAction::SlidesLoaded(slides) => {
                context.dispatch(OnboardingMessage::SlidesLoaded(slides))
            }
            OnboardingAction::CompletionFinished { error: None } => {
                debug_assert_eq!(self.completion, Completion::InFlight);
                self.completion = Completion::Done;
                context.publish(OnboardingLabel::NavigateToHome);
            }
            OnboardingAction::CompletionFinished { error: Some(error) } => {
                self.logger
                    .error(LOG_TAG, &format!("Failed to mark onboarding completed: {}", error));
                self.completion = Completion::Idle;
                context.dispatch(OnboardingMessage::CompletionFailed(error));
            }
        }
    }
}
