//! Lifecycle scopes for stores, child components and routers.
//!
//! A [`Scope`] is a cancellation token with parent/child links. Cancelling a
//! scope wakes every task awaiting [`Scope::cancelled`] and cancels all of its
//! child scopes. Cancellation is one-way: a cancelled scope never revives.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Clone)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

struct ScopeInner {
    cancelled: AtomicBool,
    notify: Notify,
    children: Mutex<Vec<Weak<ScopeInner>>>,
}

impl ScopeInner {
    fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            notify: Notify::new(),
            children: Mutex::new(Vec::new()),
        }
    }

    fn cancel(&self) -> bool {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.notify.notify_waiters();

        // Flag is set before draining, so a concurrent `child()` either sees
        // the flag or lands in this list.
        let children = std::mem::take(&mut *self.children.lock());
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
        true
    }
}

impl Scope {
    /// Create a new root scope.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ScopeInner::new()),
        }
    }

    /// Create a scope that is cancelled together with this one.
    ///
    /// A child of an already-cancelled scope starts out cancelled.
    pub fn child(&self) -> Scope {
        let child = Scope::new();
        {
            let mut children = self.inner.children.lock();
            children.retain(|weak| weak.strong_count() > 0);
            children.push(Arc::downgrade(&child.inner));
        }
        if self.is_cancelled() {
            child.cancel();
        }
        child
    }

    /// Cancel this scope and every child scope.
    pub fn cancel(&self) {
        if self.inner.cancel() {
            tracing::trace!("scope cancelled");
        }
    }

    /// Check whether the scope has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolve once the scope is cancelled.
    pub async fn cancelled(&self) {
        // Subscribe to Notify BEFORE checking the flag: otherwise cancel()
        // could fire between the check and the await, and notify_waiters()
        // would find no subscriber.
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
