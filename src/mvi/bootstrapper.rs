//! Bootstrapper trait: one-shot startup work for a store.

use std::future::Future;
use std::sync::Arc;

use super::event::Action;
use super::scope::Scope;

/// Startup logic that runs exactly once, before the store handles its
/// first intent.
///
/// `invoke` must return quickly; loading belongs in
/// [`BootstrapperContext::launch`]. A bootstrapper can only emit actions.
pub trait Bootstrapper: Send + 'static {
    type Action: Action;

    fn invoke(&mut self, context: BootstrapperContext<Self::Action>);
}

/// Handle a bootstrapper uses to emit actions.
pub struct BootstrapperContext<A> {
    sink: Arc<dyn Fn(A) + Send + Sync>,
    scope: Scope,
}

impl<A> Clone for BootstrapperContext<A> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            scope: self.scope.clone(),
        }
    }
}

impl<A: Send + 'static> BootstrapperContext<A> {
    pub(crate) fn new(sink: Arc<dyn Fn(A) + Send + Sync>, scope: Scope) -> Self {
        Self { sink, scope }
    }

    /// Queue an action for the executor. No-op once the store is disposed.
    pub fn dispatch(&self, action: A) {
        if self.scope.is_cancelled() {
            return;
        }
        (self.sink)(action);
    }

    /// Run startup work on the runtime, bound to the store scope.
    pub fn launch<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let scope = self.scope.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = scope.cancelled() => {}
                _ = future => {}
            }
        });
    }
}
