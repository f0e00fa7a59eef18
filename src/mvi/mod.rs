//! Model-View-Intent (MVI) store runtime.
//!
//! A [`Store`] owns one feature's state and drives it through three units:
//!
//! ```text
//!            ┌──────────────┐  Action
//!            │ Bootstrapper │ ─────────┐
//!            └──────────────┘          ▼
//! Intent ──────────────────────→ ┌──────────┐  Message  ┌─────────┐
//!                                │ Executor │ ────────→ │ Reducer │ ──→ State
//!                                └──────────┘           └─────────┘
//!                                     │ Label
//!                                     ▼
//!                                 subscribers
//! ```
//!
//! - **Bootstrapper**: runs once at store creation, emits Actions
//! - **Executor**: turns Intents/Actions into side effects, Messages and Labels
//! - **Reducer**: pure function `(State, Message) -> State`
//!
//! All Messages, Actions and Labels flow through a single queue drained by
//! one task per store, so reduction never interleaves.

mod bootstrapper;
mod event;
mod executor;
mod intent;
mod reducer;
pub mod scope;
mod state;
mod store;

pub use bootstrapper::{Bootstrapper, BootstrapperContext};
pub use event::{Action, Label, Message};
pub use executor::{ContextOf, Executor, ExecutorContext};
pub use intent::Intent;
pub use reducer::Reducer;
pub use scope::Scope;
pub use state::UiState;
pub use store::Store;
