//! Base trait for intents (user actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent user-initiated requests to a store: button taps,
/// form submissions, navigation gestures. They are handed to the
/// store's executor, never to the reducer directly.
pub trait Intent: Send + 'static {}
