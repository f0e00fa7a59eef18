//! Child factory for the root slot.

use std::fmt;
use std::sync::Arc;

use crate::auth::AuthComponent;
use crate::mvi::Scope;
use crate::navigation::root::RouterHandle;
use crate::navigation::{Configuration, Dependencies, TabsComponent};
use crate::onboarding::OnboardingComponent;

/// The component occupying the root slot.
#[derive(Clone)]
pub enum RootChild {
    Auth(Arc<AuthComponent>),
    Onboarding(Arc<OnboardingComponent>),
    Tabs(Arc<TabsComponent>),
}

impl RootChild {
    pub fn kind(&self) -> &'static str {
        match self {
            RootChild::Auth(_) => "auth",
            RootChild::Onboarding(_) => "onboarding",
            RootChild::Tabs(_) => "tabs",
        }
    }
}

impl fmt::Debug for RootChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RootChild").field(&self.kind()).finish()
    }
}

/// Build the child for `configuration`, bound to `scope`.
///
/// Navigation labels from the child's store are routed back through `router`.
pub(crate) fn create_child(
    configuration: &Configuration,
    deps: &Dependencies,
    scope: Scope,
    router: &RouterHandle,
) -> RootChild {
    match configuration {
        Configuration::Auth => {
            let home = router.clone();
            let auth = router.clone();
            RootChild::Auth(Arc::new(AuthComponent::new(
                Arc::clone(&deps.auth),
                scope,
                Arc::new(move || home.navigate_to_home()),
                Arc::new(move || auth.navigate_to_auth()),
            )))
        }
        Configuration::Onboarding { page } => {
            let home = router.clone();
            RootChild::Onboarding(Arc::new(OnboardingComponent::new(
                Arc::clone(&deps.onboarding),
                Arc::clone(&deps.logger),
                *page,
                scope,
                Arc::new(move || home.navigate_to_home()),
            )))
        }
        Configuration::Tabs { deep_link } => RootChild::Tabs(Arc::new(TabsComponent::new(
            deps.clone(),
            deep_link.as_ref(),
            scope,
        ))),
    }
}
