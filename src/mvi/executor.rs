//! Executor trait and the context it uses to talk back to its store.

use std::future::Future;

use tokio::sync::{mpsc, watch};

use super::event::{Action, Label, Message};
use super::intent::Intent;
use super::scope::Scope;
use super::state::UiState;

/// Items drained by the store task, in arrival order.
pub(crate) enum Input<A, M, L> {
    Action(A),
    Message(M),
    Label(L),
}

/// Executes side effects for a store.
///
/// The executor runs on the store's own task: `execute_intent` and
/// `execute_action` are never called concurrently, so fields on `self` can
/// be used for bookkeeping without locks. Slow work (repository calls) must
/// be handed to [`ExecutorContext::launch`] and report back through
/// [`ExecutorContext::dispatch`], [`ExecutorContext::publish`] or
/// [`ExecutorContext::forward`].
pub trait Executor: Send + 'static {
    type Intent: Intent;
    type Action: Action;
    type State: UiState;
    type Message: Message;
    type Label: Label;

    /// Handle a user intent.
    fn execute_intent(&mut self, intent: Self::Intent, context: &ContextOf<Self>);

    /// Handle an action from the bootstrapper or a finished side effect.
    fn execute_action(&mut self, action: Self::Action, context: &ContextOf<Self>) {
        let _ = (action, context);
    }
}

/// The [`ExecutorContext`] type matching an executor's associated types.
pub type ContextOf<E> = ExecutorContext<
    <E as Executor>::State,
    <E as Executor>::Action,
    <E as Executor>::Message,
    <E as Executor>::Label,
>;

/// Handle given to executors for emitting results.
///
/// Cheap to clone; clones can be moved into launched futures. Every emit
/// checks the store scope first, so work that outlives its store cannot
/// mutate state.
pub struct ExecutorContext<S, A, M, L> {
    store: &'static str,
    queue: mpsc::UnboundedSender<Input<A, M, L>>,
    state: watch::Receiver<S>,
    scope: Scope,
}

impl<S, A, M, L> Clone for ExecutorContext<S, A, M, L> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            queue: self.queue.clone(),
            state: self.state.clone(),
            scope: self.scope.clone(),
        }
    }
}

impl<S, A, M, L> ExecutorContext<S, A, M, L>
where
    S: UiState,
    A: Send + 'static,
    M: Send + 'static,
    L: Send + 'static,
{
    pub(crate) fn new(
        store: &'static str,
        queue: mpsc::UnboundedSender<Input<A, M, L>>,
        state: watch::Receiver<S>,
        scope: Scope,
    ) -> Self {
        Self {
            store,
            queue,
            state,
            scope,
        }
    }

    /// Queue a message for the reducer.
    ///
    /// Messages dispatched from one operation are reduced in dispatch order.
    pub fn dispatch(&self, message: M) {
        self.send(Input::Message(message), "message");
    }

    /// Queue a label for subscribers.
    ///
    /// Labels are published after every message queued before them has been
    /// reduced.
    pub fn publish(&self, label: L) {
        self.send(Input::Label(label), "label");
    }

    /// Queue an action back to the executor.
    pub fn forward(&self, action: A) {
        self.send(Input::Action(action), "action");
    }

    /// Latest reduced state.
    ///
    /// Messages still waiting in the queue are not reflected.
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Scope the store is bound to.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Run a side effect on the runtime, bound to the store scope.
    ///
    /// The future is dropped at its next await point once the store is
    /// disposed.
    pub fn launch<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let scope = self.scope.clone();
        let store = self.store;
        tokio::spawn(async move {
            tokio::select! {
                _ = scope.cancelled() => {
                    tracing::trace!(store, "side effect cancelled");
                }
                _ = future => {}
            }
        });
    }

    fn send(&self, input: Input<A, M, L>, kind: &'static str) {
        if self.scope.is_cancelled() {
            tracing::trace!(store = self.store, kind, "dropped after dispose");
            return;
        }
        if self.queue.send(input).is_err() {
            tracing::trace!(store = self.store, kind, "store task gone");
        }
    }
}
