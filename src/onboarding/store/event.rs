use crate::mvi::{Action, Label, Message};
use crate::onboarding::Slide;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingAction {
    SlidesLoaded(Vec<Slide>),
    /// The completion write returned; `error` is set when it failed.
    CompletionFinished { error: Option<String> },
}

impl Action for OnboardingAction {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingMessage {
    SlidesLoaded(Vec<Slide>),
    PreviousClicked,
    NextClicked,
    Completing,
    CompletionFailed(String),
}

impl Message for OnboardingMessage {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingLabel {
    NavigateToHome,
}

impl Label for OnboardingLabel {}
