//! Root slot router.
//!
//! A single actor task owns the active configuration. Session changes,
//! runtime deep links and child navigation requests are all funnelled into
//! it, so two transitions can never race.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

use crate::deeplink::Url;
use crate::mvi::Scope;
use crate::navigation::child::{create_child, RootChild};
use crate::navigation::{Configuration, Dependencies};
use crate::session::{SessionObserver, SessionState};

enum RouterEvent {
    DeepLink(Url),
    NavigateToHome,
    NavigateToAuth,
}

impl RouterEvent {
    fn tag(&self) -> &'static str {
        match self {
            RouterEvent::DeepLink(_) => "deep_link",
            RouterEvent::NavigateToHome => "navigate_to_home",
            RouterEvent::NavigateToAuth => "navigate_to_auth",
        }
    }
}

/// Cheap, cloneable sender for router requests.
#[derive(Clone)]
pub struct RouterHandle {
    events: mpsc::UnboundedSender<RouterEvent>,
}

impl RouterHandle {
    pub fn handle_deep_link(&self, url: Url) {
        self.send(RouterEvent::DeepLink(url));
    }

    /// Re-check the session and onboarding flag and route accordingly.
    pub fn navigate_to_home(&self) {
        self.send(RouterEvent::NavigateToHome);
    }

    pub fn navigate_to_auth(&self) {
        self.send(RouterEvent::NavigateToAuth);
    }

    fn send(&self, event: RouterEvent) {
        let tag = event.tag();
        if self.events.send(event).is_err() {
            tracing::debug!(event = tag, "router stopped, event dropped");
        }
    }
}

/// Serializable navigation state for process restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    pub configuration: Configuration,
    /// Destination deferred until sign-in.
    pub pending_deep_link: Option<Configuration>,
}

/// How the router picks its first configuration.
///
/// Precedence: deep link, then snapshot, then the persisted flags.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    pub deep_link: Option<Url>,
    pub snapshot: Option<NavigationSnapshot>,
}

impl RouterOptions {
    pub fn with_deep_link(mut self, url: Url) -> Self {
        self.deep_link = Some(url);
        self
    }

    /// Parse `raw`; an invalid link opens the default route.
    pub fn with_raw_deep_link(mut self, raw: &str) -> Self {
        self.deep_link = Some(parse_or_default(raw));
        self
    }

    pub fn with_snapshot(mut self, snapshot: NavigationSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }
}

/// What the root slot currently shows.
#[derive(Debug, Clone)]
pub struct RouterState {
    pub configuration: Configuration,
    pub child: RootChild,
    pub pending_deep_link: Option<Configuration>,
}

pub struct RootRouter {
    handle: RouterHandle,
    state: watch::Receiver<RouterState>,
    session: SessionObserver,
    scope: Scope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activation {
    /// Rebuild unless the configuration is equal to the active one.
    Exact,
    /// Keep the active child if it is the same variant.
    SameKind,
}

struct RouterActor {
    deps: Dependencies,
    handle: RouterHandle,
    events: mpsc::UnboundedReceiver<RouterEvent>,
    session: watch::Receiver<SessionState>,
    state: watch::Sender<RouterState>,
    child_scope: Scope,
    scope: Scope,
}

impl RootRouter {
    /// Compute the initial configuration, build its child and start the
    /// router actor on the current runtime.
    pub async fn start(deps: Dependencies, options: RouterOptions) -> Self {
        let scope = Scope::new();
        let session = SessionObserver::start(Arc::clone(&deps.auth), scope.child());
        let mut session_rx = session.subscribe();
        // The initial configuration already reflects this session value.
        let authenticated = session_rx.borrow_and_update().is_authenticated();

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let handle = RouterHandle { events: events_tx };

        let (requested, pending) = initial_request(&deps, authenticated, options).await;
        let (configuration, pending_deep_link) = guard(authenticated, requested, pending);
        tracing::info!(
            configuration = configuration.path_segment_identifier(),
            deferred = pending_deep_link.is_some(),
            "initial configuration"
        );

        let child_scope = scope.child();
        let child = create_child(&configuration, &deps, child_scope.clone(), &handle);
        let (state_tx, state_rx) = watch::channel(RouterState {
            configuration,
            child,
            pending_deep_link,
        });

        let actor = RouterActor {
            deps,
            handle: handle.clone(),
            events: events_rx,
            session: session_rx,
            state: state_tx,
            child_scope,
            scope: scope.clone(),
        };
        tokio::spawn(actor.run());

        Self {
            handle,
            state: state_rx,
            session,
            scope,
        }
    }

    pub fn handle(&self) -> RouterHandle {
        self.handle.clone()
    }

    pub fn handle_deep_link(&self, url: Url) {
        self.handle.handle_deep_link(url);
    }

    /// Parse and route `raw`; an invalid link opens the default route.
    pub fn handle_raw_deep_link(&self, raw: &str) {
        self.handle.handle_deep_link(parse_or_default(raw));
    }

    pub fn navigate_to_home(&self) {
        self.handle.navigate_to_home();
    }

    pub fn state(&self) -> RouterState {
        self.state.borrow().clone()
    }

    /// Current-value stream of router states.
    pub fn configurations(&self) -> watch::Receiver<RouterState> {
        self.state.clone()
    }

    pub fn active_configuration(&self) -> Configuration {
        self.state.borrow().configuration.clone()
    }

    pub fn child(&self) -> RootChild {
        self.state.borrow().child.clone()
    }

    pub fn session(&self) -> SessionState {
        self.session.current()
    }

    /// Snapshot for restore. For tabs, the visible tab becomes the deep-link tail.
    pub fn snapshot(&self) -> NavigationSnapshot {
        let state = self.state.borrow();
        let configuration = match (&state.configuration, &state.child) {
            (Configuration::Tabs { .. }, RootChild::Tabs(tabs)) => Configuration::Tabs {
                deep_link: Some(tabs.active_tab().to_url()),
            },
            (configuration, _) => configuration.clone(),
        };
        NavigationSnapshot {
            configuration,
            pending_deep_link: state.pending_deep_link.clone(),
        }
    }

    /// Stop the router, session observation and the active child.
    pub fn dispose(&self) {
        if !self.scope.is_cancelled() {
            tracing::debug!("router disposed");
        }
        self.scope.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.scope.is_cancelled()
    }
}

impl Drop for RootRouter {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

fn parse_or_default(raw: &str) -> Url {
    Url::parse(raw).unwrap_or_else(|error| {
        tracing::warn!(%error, "invalid deep link, opening default route");
        Url::default()
    })
}

async fn initial_request(
    deps: &Dependencies,
    authenticated: bool,
    options: RouterOptions,
) -> (Configuration, Option<Configuration>) {
    if let Some(url) = options.deep_link {
        return (Configuration::from_deep_link(&url), None);
    }
    if let Some(snapshot) = options.snapshot {
        tracing::debug!("restoring navigation snapshot");
        return (snapshot.configuration, snapshot.pending_deep_link);
    }
    if !authenticated {
        return (Configuration::Auth, None);
    }
    (settled_configuration(deps).await, None)
}

/// Destination for a signed-in user, from the onboarding flag.
///
/// A flag read failure routes to Auth.
async fn settled_configuration(deps: &Dependencies) -> Configuration {
    match deps.onboarding.has_seen_onboarding().await {
        Ok(true) => Configuration::tabs_root(),
        Ok(false) => Configuration::Onboarding { page: 0 },
        Err(error) => {
            tracing::warn!(%error, "failed to read onboarding flag, routing to auth");
            Configuration::Auth
        }
    }
}

/// Apply the sign-in guard.
///
/// Without a session, protected destinations are deferred and Auth is shown.
/// With a session, a deferred destination wins over `requested`.
fn guard(
    authenticated: bool,
    requested: Configuration,
    pending: Option<Configuration>,
) -> (Configuration, Option<Configuration>) {
    if !authenticated {
        if requested.requires_auth() {
            return (Configuration::Auth, Some(requested));
        }
        return (Configuration::Auth, pending);
    }
    match pending {
        Some(deferred) => (deferred, None),
        None => (requested, None),
    }
}

impl RouterActor {
    async fn run(mut self) {
        let mut session_open = true;
        loop {
            tokio::select! {
                biased;
                _ = self.scope.cancelled() => break,
                changed = self.session.changed(), if session_open => {
                    if changed.is_err() {
                        tracing::debug!("session observer stopped");
                        session_open = false;
                    } else {
                        let session = self.session.borrow_and_update().clone();
                        self.on_session(session).await;
                    }
                }
                Some(event) = self.events.recv() => self.on_event(event).await,
            }
        }
        tracing::debug!("router stopped");
    }

    async fn on_session(&mut self, session: SessionState) {
        tracing::debug!(session = session.kind(), "session update");
        match session {
            SessionState::Unauthenticated | SessionState::Expired => {
                self.activate(Configuration::Auth, Activation::SameKind)
            }
            SessionState::Refreshing => {}
            SessionState::Authenticated { .. } => self.settle().await,
        }
    }

    async fn on_event(&mut self, event: RouterEvent) {
        tracing::debug!(event = event.tag(), "router event");
        match event {
            RouterEvent::DeepLink(url) => {
                let requested = Configuration::from_deep_link(&url);
                let (target, pending) = guard(self.authenticated(), requested, None);
                self.set_pending(pending);
                self.activate(target, Activation::Exact);
            }
            RouterEvent::NavigateToHome | RouterEvent::NavigateToAuth => self.settle().await,
        }
    }

    /// Route from the current session snapshot, applying a deferred deep
    /// link once signed in.
    async fn settle(&mut self) {
        let refreshing = *self.session.borrow() == SessionState::Refreshing;
        if refreshing {
            tracing::debug!("session refreshing, holding configuration");
            return;
        }
        if !self.authenticated() {
            self.activate(Configuration::Auth, Activation::SameKind);
            return;
        }
        if let Some(deferred) = self.take_pending() {
            tracing::info!(
                configuration = deferred.path_segment_identifier(),
                "applying deferred deep link"
            );
            self.activate(deferred, Activation::Exact);
            return;
        }
        let target = settled_configuration(&self.deps).await;
        self.activate(target, Activation::SameKind);
    }

    /// Signed in with an unexpired session, per the observer.
    fn authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    fn set_pending(&self, pending: Option<Configuration>) {
        self.state.send_if_modified(|state| {
            if state.pending_deep_link == pending {
                return false;
            }
            state.pending_deep_link = pending;
            true
        });
    }

    fn take_pending(&self) -> Option<Configuration> {
        let mut taken = None;
        self.state.send_if_modified(|state| {
            taken = state.pending_deep_link.take();
            taken.is_some()
        });
        taken
    }

    fn activate(&mut self, target: Configuration, mode: Activation) {
        let current = self.state.borrow().clone();

        // Tabs stay alive across deep links; only the visible tab changes.
        if mode == Activation::Exact {
            if let (Configuration::Tabs { deep_link }, RootChild::Tabs(tabs)) =
                (&target, &current.child)
            {
                tabs.handle_deep_link(deep_link.as_ref());
                self.state.send_if_modified(|state| {
                    if state.configuration == target {
                        return false;
                    }
                    state.configuration = target.clone();
                    true
                });
                return;
            }
        }

        let keep = match mode {
            Activation::Exact => current.configuration == target,
            Activation::SameKind => current.configuration.same_kind(&target),
        };
        if keep {
            return;
        }

        tracing::info!(
            from = current.configuration.path_segment_identifier(),
            to = target.path_segment_identifier(),
            "activating configuration"
        );
        self.child_scope.cancel();
        self.child_scope = self.scope.child();
        let child = create_child(&target, &self.deps, self.child_scope.clone(), &self.handle);
        self.state.send_replace(RouterState {
            configuration: target,
            child,
            pending_deep_link: current.pending_deep_link,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs_about() -> Configuration {
        Configuration::Tabs {
            deep_link: Some(Url::parse("about").unwrap()),
        }
    }

    #[test]
    fn guard_defers_protected_destination() {
        assert_eq!(
            guard(false, tabs_about(), None),
            (Configuration::Auth, Some(tabs_about()))
        );
    }

    #[test]
    fn guard_keeps_auth_and_existing_pending() {
        assert_eq!(
            guard(false, Configuration::Auth, Some(tabs_about())),
            (Configuration::Auth, Some(tabs_about()))
        );
    }

    #[test]
    fn guard_applies_pending_when_signed_in() {
        assert_eq!(
            guard(true, Configuration::Auth, Some(tabs_about())),
            (tabs_about(), None)
        );
        assert_eq!(guard(true, tabs_about(), None), (tabs_about(), None));
    }

    #[test]
    fn invalid_raw_link_opens_default_route() {
        let url = parse_or_default("app://x/tabs?broken");
        assert_eq!(Configuration::from_deep_link(&url), Configuration::tabs_root());
    }

    #[test]
    fn raw_deep_link_option_parses() {
        let options = RouterOptions::default().with_raw_deep_link("app://x/tabs/about");
        assert_eq!(
            options.deep_link.map(|url| Configuration::from_deep_link(&url)),
            Some(tabs_about())
        );
    }
}
