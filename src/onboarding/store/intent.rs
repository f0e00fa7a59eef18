use crate::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingIntent {
    SkipOnboarding,
    CompleteOnboarding,
    PreviousSlide,
    NextSlide,
}

impl Intent for OnboardingIntent {}
