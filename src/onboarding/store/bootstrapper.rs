use std::sync::Arc;

use crate::mvi::{Bootstrapper, BootstrapperContext};
use crate::onboarding::store::event::OnboardingAction;
use crate::onboarding::OnboardingRepository;

pub(super) struct OnboardingBootstrapper {
    repository: Arc<dyn OnboardingRepository>,
}

impl OnboardingBootstrapper {
    pub(super) fn new(repository: Arc<dyn OnboardingRepository>) -> Self {
        Self { repository }
    }
}

impl Bootstrapper for OnboardingBootstrapper {
    type Action = OnboardingAction;

    fn invoke(&mut self, context: BootstrapperContext<OnboardingAction>) {
        let repository = Arc::clone(&self.repository);
        let sink = context.clone();
        context.launch(async move {
            let slides = repository.all_slides().await;
            tracing::debug!(store = "onboarding", count = slides.len(), "slides loaded");
            sink.dispatch(OnboardingAction::SlidesLoaded(slides));
        });
    }
}
