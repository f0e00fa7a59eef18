//! Internal and one-shot event kinds flowing through a store.

/// Events produced by asynchronous sources (bootstrapper, background
/// observers, finished side effects) and handled by the executor.
pub trait Action: Send + 'static {}

/// Pure reducer inputs produced by the executor.
pub trait Message: Send + 'static {}

/// One-shot events published to store subscribers.
///
/// Labels are not part of state and are never replayed to late subscribers.
pub trait Label: Clone + Send + 'static {}
