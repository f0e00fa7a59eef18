//! Fire-and-forget collaborators: logging, analytics and feature flags.
//!
//! Implementations must never fail the caller. Backends are out of scope;
//! the provided implementations forward to `tracing` or read static values.

mod analytics;
mod features;
mod logger;

pub use analytics::{Analytics, AnalyticsEvent, TracingAnalytics};
pub use features::{FeatureFlag, FeatureFlags, StaticFeatureFlags, WELCOME_BANNER};
pub use logger::{LogLevel, Logger, TracingLogger};
