//! Store runtime: a single task per store draining intents and internal events.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};

use super::bootstrapper::{Bootstrapper, BootstrapperContext};
use super::event::Label;
use super::executor::{ContextOf, Executor, ExecutorContext, Input};
use super::intent::Intent;
use super::reducer::Reducer;
use super::scope::Scope;
use super::state::UiState;

/// Label buffer per subscriber. Subscribers that fall further behind skip
/// the oldest labels.
const LABEL_CAPACITY: usize = 64;

/// A running MVI store.
///
/// - `state()` always returns the current snapshot synchronously
/// - `states()` is a current-value stream (new subscribers see the latest state)
/// - `labels()` is a one-shot event stream (no replay for new subscribers)
/// - `accept()` queues an intent and returns immediately
///
/// Dropping the store cancels its scope, which stops the store task and
/// every side effect launched by its executor or bootstrapper.
pub struct Store<I, S, L> {
    name: &'static str,
    intents: mpsc::UnboundedSender<I>,
    state: watch::Receiver<S>,
    labels: broadcast::Sender<L>,
    scope: Scope,
}

struct StoreTask<E: Executor, B> {
    name: &'static str,
    executor: E,
    bootstrapper: B,
    bootstrap: BootstrapperContext<E::Action>,
    context: ContextOf<E>,
    intents: mpsc::UnboundedReceiver<E::Intent>,
    queue: mpsc::UnboundedReceiver<Input<E::Action, E::Message, E::Label>>,
    state: watch::Sender<E::State>,
    labels: broadcast::Sender<E::Label>,
    scope: Scope,
}

impl<I: Intent, S: UiState, L: Label> Store<I, S, L> {
    /// Start a store on the current tokio runtime.
    ///
    /// The bootstrapper is invoked on the store task before the first
    /// intent is handled. Must be called from within a runtime.
    pub fn create<E, R, B>(
        name: &'static str,
        initial_state: S,
        scope: Scope,
        bootstrapper: B,
        executor: E,
        _reducer: R,
    ) -> Self
    where
        E: Executor<Intent = I, State = S, Label = L>,
        R: Reducer<State = S, Message = E::Message>,
        B: Bootstrapper<Action = E::Action>,
    {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(initial_state);
        let (labels_tx, _) = broadcast::channel(LABEL_CAPACITY);

        let context =
            ExecutorContext::new(name, queue_tx.clone(), state_rx.clone(), scope.clone());
        let bootstrap = BootstrapperContext::new(
            Arc::new(move |action| {
                if queue_tx.send(Input::Action(action)).is_err() {
                    tracing::trace!(store = name, kind = "action", "store task gone");
                }
            }),
            scope.clone(),
        );

        let task = StoreTask {
            name,
            executor,
            bootstrapper,
            bootstrap,
            context,
            intents: intent_rx,
            queue: queue_rx,
            state: state_tx,
            labels: labels_tx.clone(),
            scope: scope.clone(),
        };
        tokio::spawn(task.run::<R>());
        tracing::debug!(store = name, "store created");

        Self {
            name,
            intents: intent_tx,
            state: state_rx,
            labels: labels_tx,
            scope,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current state snapshot.
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Current-value stream of state snapshots.
    pub fn states(&self) -> watch::Receiver<S> {
        self.state.clone()
    }

    /// Subscribe to labels published from now on.
    pub fn labels(&self) -> broadcast::Receiver<L> {
        self.labels.subscribe()
    }

    /// Forward labels to `handler` on a task bound to the store scope.
    ///
    /// Subscribes before returning, so no label published after this call
    /// is missed.
    pub fn bind_labels<F>(&self, mut handler: F)
    where
        F: FnMut(L) + Send + 'static,
    {
        let mut labels = self.labels.subscribe();
        let scope = self.scope.clone();
        let name = self.name;
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = scope.cancelled() => break,
                    received = labels.recv() => match received {
                        Ok(label) => handler(label),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(store = name, skipped, "label listener lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        });
    }

    /// Queue an intent. Never blocks; intents sent after dispose are dropped.
    pub fn accept(&self, intent: I) {
        if self.scope.is_cancelled() || self.intents.send(intent).is_err() {
            tracing::debug!(store = self.name, "intent dropped: store disposed");
        }
    }

    /// Stop the store and cancel its in-flight side effects.
    pub fn dispose(&self) {
        if !self.scope.is_cancelled() {
            tracing::debug!(store = self.name, "store disposed");
        }
        self.scope.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.scope.is_cancelled()
    }
}

impl<I, S, L> Drop for Store<I, S, L> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

impl<E, B> StoreTask<E, B>
where
    E: Executor,
    B: Bootstrapper<Action = E::Action>,
{
    async fn run<R>(mut self)
    where
        R: Reducer<State = E::State, Message = E::Message>,
    {
        self.bootstrapper.invoke(self.bootstrap.clone());

        loop {
            tokio::select! {
                biased;
                _ = self.scope.cancelled() => break,
                Some(input) = self.queue.recv() => self.handle_input::<R>(input),
                intent = self.intents.recv() => match intent {
                    Some(intent) => self.executor.execute_intent(intent, &self.context),
                    None => break,
                },
            }
        }

        tracing::debug!(store = self.name, "store task stopped");
    }

    fn handle_input<R>(&mut self, input: Input<E::Action, E::Message, E::Label>)
    where
        R: Reducer<State = E::State, Message = E::Message>,
    {
        match input {
            Input::Action(action) => self.executor.execute_action(action, &self.context),
            Input::Message(message) => {
                let changed = self.state.send_if_modified(|current| {
                    let next = R::reduce(current.clone(), message);
                    if next == *current {
                        false
                    } else {
                        *current = next;
                        true
                    }
                });
                tracing::trace!(store = self.name, changed, "message reduced");
            }
            Input::Label(label) => {
                if self.labels.send(label).is_err() {
                    tracing::trace!(store = self.name, "label published with no subscribers");
                }
            }
        }
    }
}
