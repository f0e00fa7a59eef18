pub mod auth;
pub mod config;
pub mod deeplink;
pub mod logging;
pub mod mvi;
pub mod navigation;
pub mod onboarding;
pub mod prefs;
pub mod screens;
pub mod session;
pub mod telemetry;
