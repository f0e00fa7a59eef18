//! Tabs sub-router with bring-to-front semantics.
//!
//! Tab children are created on first selection and kept until the tabs
//! component is disposed; switching tabs only reorders the stack.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use uuid::Uuid;

use crate::deeplink::Url;
use crate::mvi::Scope;
use crate::navigation::{Dependencies, TabConfiguration};
use crate::screens::{AboutComponent, ContactComponent, HomeComponent};

#[derive(Clone)]
pub enum TabChild {
    Home(Arc<HomeComponent>),
    About(Arc<AboutComponent>),
    Contact(Arc<ContactComponent>),
}

impl TabChild {
    pub fn title(&self) -> &'static str {
        match self {
            TabChild::Home(home) => home.title(),
            TabChild::About(about) => about.title(),
            TabChild::Contact(contact) => contact.title(),
        }
    }
}

/// An instantiated tab. `id` identifies the instance, not the tab.
#[derive(Clone)]
pub struct TabEntry {
    pub id: Uuid,
    pub child: TabChild,
}

/// Ordered tab stack; the last element is the visible tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabPages {
    pub stack: Vec<TabConfiguration>,
}

impl TabPages {
    pub fn active(&self) -> TabConfiguration {
        self.stack.last().copied().unwrap_or(TabConfiguration::Home)
    }
}

pub struct TabsComponent {
    deps: Dependencies,
    entries: Mutex<Vec<(TabConfiguration, TabEntry)>>,
    pages: watch::Sender<TabPages>,
    scope: Scope,
}

impl TabsComponent {
    /// Create the tabs with the tab named by `deep_link` in front.
    pub fn new(deps: Dependencies, deep_link: Option<&Url>, scope: Scope) -> Self {
        let initial = TabConfiguration::from_deep_link(deep_link);
        let entry = create_tab(&deps, initial);
        tracing::debug!(tab = initial.path_segment_identifier(), "tabs created");
        let (pages, _) = watch::channel(TabPages {
            stack: vec![initial],
        });
        Self {
            deps,
            entries: Mutex::new(vec![(initial, entry)]),
            pages,
            scope,
        }
    }

    /// Bring `tab` to the front, creating it on first selection.
    ///
    /// Selecting the visible tab, or any tab after dispose, is a no-op.
    pub fn select(&self, tab: TabConfiguration) {
        if self.scope.is_cancelled() {
            tracing::debug!(tab = tab.path_segment_identifier(), "tabs disposed, ignoring select");
            return;
        }

        // Published under the lock so `pages` never lags `entries`.
        let mut entries = self.entries.lock();
        if entries.last().is_some_and(|(active, _)| *active == tab) {
            return;
        }
        let entry = match entries.iter().position(|(config, _)| *config == tab) {
            Some(index) => entries.remove(index),
            None => (tab, create_tab(&self.deps, tab)),
        };
        entries.push(entry);
        let stack = entries.iter().map(|(config, _)| *config).collect();
        self.pages.send_replace(TabPages { stack });
        drop(entries);

        tracing::info!(tab = tab.path_segment_identifier(), "tab selected");
    }

    /// Select by display index. Out-of-range indices are ignored.
    pub fn select_tab(&self, index: usize) {
        match TabConfiguration::ALL.get(index) {
            Some(tab) => self.select(*tab),
            None => tracing::warn!(index, "tab index out of range"),
        }
    }

    pub fn select_home(&self) {
        self.select(TabConfiguration::Home);
    }

    pub fn select_about(&self) {
        self.select(TabConfiguration::About);
    }

    pub fn select_contact(&self) {
        self.select(TabConfiguration::Contact);
    }

    /// Route a deep-link tail, e.g. `about`, to its tab.
    pub fn handle_deep_link(&self, deep_link: Option<&Url>) {
        self.select(TabConfiguration::from_deep_link(deep_link));
    }

    pub fn active_tab(&self) -> TabConfiguration {
        self.pages.borrow().active()
    }

    pub fn stack(&self) -> Vec<TabConfiguration> {
        self.pages.borrow().stack.clone()
    }

    pub fn pages(&self) -> watch::Receiver<TabPages> {
        self.pages.subscribe()
    }

    /// The instance for `tab`, if it has been selected before.
    pub fn child(&self, tab: TabConfiguration) -> Option<TabEntry> {
        self.entries
            .lock()
            .iter()
            .find(|(config, _)| *config == tab)
            .map(|(_, entry)| entry.clone())
    }

    pub fn active_child(&self) -> Option<TabEntry> {
        self.child(self.active_tab())
    }

    /// Cancel the tabs scope and drop every tab child.
    pub fn dispose(&self) {
        self.scope.cancel();
        self.entries.lock().clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.scope.is_cancelled()
    }
}

fn create_tab(deps: &Dependencies, tab: TabConfiguration) -> TabEntry {
    let child = match tab {
        TabConfiguration::Home => TabChild::Home(Arc::new(HomeComponent::new(
            Arc::clone(&deps.logger),
            deps.features.as_ref(),
        ))),
        TabConfiguration::About => TabChild::About(Arc::new(AboutComponent::new(
            Arc::clone(&deps.logger),
            deps.analytics.as_ref(),
        ))),
        TabConfiguration::Contact => TabChild::Contact(Arc::new(ContactComponent::new(
            Arc::clone(&deps.logger),
            deps.analytics.as_ref(),
        ))),
    };
    TabEntry {
        id: Uuid::new_v4(),
        child,
    }
}
