use std::sync::Arc;

use crate::screens::track_screen_view;
use crate::telemetry::{Analytics, Logger};

const SCREEN_TITLE: &str = "Contact Screen";

/// Contact tab. Deep link: `tabs/contact`.
pub struct ContactComponent {
    logger: Arc<dyn Logger>,
}

impl ContactComponent {
    pub fn new(logger: Arc<dyn Logger>, analytics: &dyn Analytics) -> Self {
        track_screen_view(analytics, SCREEN_TITLE, "ContactComponent");
        Self { logger }
    }

    pub fn title(&self) -> &'static str {
        self.logger.debug("Contact", "Message from contact screen");
        SCREEN_TITLE
    }
}
