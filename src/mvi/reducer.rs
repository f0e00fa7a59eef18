//! Reducer trait for MVI architecture.

use super::event::Message;
use super::state::UiState;

/// Reducer transforms state based on messages.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Message) -> State. Every message
/// variant must be handled, and transitions that make no sense for the
/// current state clamp or return the state unchanged rather than panic.
pub trait Reducer: Send + 'static {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The message type this reducer handles.
    type Message: Message;

    /// Process a message and return the new state.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(state: Self::State, message: Self::Message) -> Self::State;
}
