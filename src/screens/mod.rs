//! Tab screens.
//!
//! Each screen is created when its tab is first selected and lives until
//! the tabs component is disposed.

mod about;
mod contact;
mod home;

pub use about::AboutComponent;
pub use contact::ContactComponent;
pub use home::HomeComponent;

use crate::telemetry::{Analytics, AnalyticsEvent};

/// Record a `screen_view` for a screen component.
fn track_screen_view(analytics: &dyn Analytics, screen_name: &str, screen_class: &str) {
    analytics.track(AnalyticsEvent::ScreenView {
        screen_name: screen_name.to_string(),
        screen_class: Some(screen_class.to_string()),
    });
}
