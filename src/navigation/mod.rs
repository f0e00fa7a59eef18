//! Navigation: the root slot router and the tabs sub-router.
//!
//! ```text
//!  deep link ──→ Url ──→ Configuration ──┐
//!                                        ▼
//!  SessionObserver ──→ RootRouter (actor) ──→ RootChild
//!                          ▲                    │
//!                          └─── NavigateToHome ─┘
//! ```

mod child;
mod config;
mod root;
mod tabs;

use std::sync::Arc;

use crate::auth::AuthRepository;
use crate::onboarding::OnboardingRepository;
use crate::telemetry::{Analytics, FeatureFlags, Logger};

pub use child::RootChild;
pub use config::{Configuration, TabConfiguration};
pub use root::{NavigationSnapshot, RootRouter, RouterHandle, RouterOptions, RouterState};
pub use tabs::{TabChild, TabEntry, TabPages, TabsComponent};

/// Callback a child invokes to ask its parent to navigate.
pub type NavigationCallback = Arc<dyn Fn() + Send + Sync>;

/// Collaborators handed down to every child factory.
#[derive(Clone)]
pub struct Dependencies {
    pub auth: Arc<dyn AuthRepository>,
    pub onboarding: Arc<dyn OnboardingRepository>,
    pub logger: Arc<dyn Logger>,
    pub analytics: Arc<dyn Analytics>,
    pub features: Arc<dyn FeatureFlags>,
}
