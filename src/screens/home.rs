use std::sync::Arc;

use crate::telemetry::{FeatureFlags, Logger, WELCOME_BANNER};

const SCREEN_TITLE: &str = "Home Screen";

/// Home tab. Deep links: `tabs`, `tabs/home`.
pub struct HomeComponent {
    logger: Arc<dyn Logger>,
    show_welcome_banner: bool,
}

impl HomeComponent {
    pub fn new(logger: Arc<dyn Logger>, features: &dyn FeatureFlags) -> Self {
        Self {
            logger,
            show_welcome_banner: features.get(WELCOME_BANNER),
        }
    }

    pub fn title(&self) -> &'static str {
        self.logger.info("Home", "Message from home screen");
        SCREEN_TITLE
    }

    pub fn show_welcome_banner(&self) -> bool {
        self.show_welcome_banner
    }
}
