use std::sync::Arc;

use crate::screens::track_screen_view;
use crate::telemetry::{Analytics, Logger};

const SCREEN_TITLE: &str = "About Screen";

/// About tab. Deep link: `tabs/about`.
pub struct AboutComponent {
    logger: Arc<dyn Logger>,
}

impl AboutComponent {
    pub fn new(logger: Arc<dyn Logger>, analytics: &dyn Analytics) -> Self {
        track_screen_view(analytics, SCREEN_TITLE, "AboutComponent");
        Self { logger }
    }

    pub fn title(&self) -> &'static str {
        self.logger.debug("About", "Message from about screen");
        SCREEN_TITLE
    }
}
