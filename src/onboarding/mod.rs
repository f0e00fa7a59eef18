//! First-run onboarding: slide content, the persisted "seen" flag, and the
//! onboarding screen store.

mod component;
mod repository;
mod slide;
pub mod store;

pub use component::{OnboardingComponent, OnboardingModel};
pub use repository::{OnboardingRepository, PreferencesOnboardingRepository, HAS_SEEN_ONBOARDING_KEY};
pub use slide::{default_slides, Slide};
