//! Route configurations and their deep-link path segments.

use std::mem;

use serde::{Deserialize, Serialize};

use crate::deeplink::{Url, PAGE_PARAMETER};

const AUTH: &str = "auth";
const ONBOARDING: &str = "onboarding";
const TABS: &str = "tabs";
const HOME: &str = "home";
const ABOUT: &str = "about";
const CONTACT: &str = "contact";

/// Destination held by the root slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Configuration {
    Auth,
    /// Onboarding starting at slide `page`.
    Onboarding { page: usize },
    /// Tabs, with the deep-link tail that picks the initial tab.
    Tabs { deep_link: Option<Url> },
}

impl Configuration {
    pub fn tabs_root() -> Self {
        Configuration::Tabs { deep_link: None }
    }

    pub fn path_segment_identifier(&self) -> &'static str {
        match self {
            Configuration::Auth => AUTH,
            Configuration::Onboarding { .. } => ONBOARDING,
            Configuration::Tabs { .. } => TABS,
        }
    }

    /// Pick a configuration from the first path segment of `url`.
    ///
    /// Unknown or missing segments select the tabs root; the remaining
    /// segments are passed to the tabs sub-router.
    pub fn from_deep_link(url: &Url) -> Self {
        let (segment, rest) = url.consume_path_segment();
        match segment.as_deref() {
            Some(AUTH) => Configuration::Auth,
            Some(ONBOARDING) => Configuration::Onboarding { page: url.page() },
            Some(TABS) => Configuration::Tabs {
                deep_link: non_empty(rest),
            },
            Some(other) => {
                tracing::debug!(segment = other, "unknown deep-link segment, opening tabs");
                Configuration::Tabs {
                    deep_link: non_empty(rest),
                }
            }
            None => Configuration::tabs_root(),
        }
    }

    /// Deep link path and query that select this configuration.
    pub fn to_url(&self) -> Url {
        let mut url = match self {
            Configuration::Tabs {
                deep_link: Some(tail),
            } => tail.clone(),
            _ => Url::default(),
        };
        url.path_segments
            .insert(0, self.path_segment_identifier().to_string());
        if let Configuration::Onboarding { page } = self {
            url.parameters
                .insert(PAGE_PARAMETER.to_string(), page.to_string());
        }
        url
    }

    /// True when both are the same variant, ignoring payload.
    pub fn same_kind(&self, other: &Configuration) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    /// True for destinations that need a signed-in user.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Configuration::Auth)
    }
}

fn non_empty(url: Url) -> Option<Url> {
    if url == Url::default() {
        None
    } else {
        Some(url)
    }
}

/// A page of the tabs sub-router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabConfiguration {
    Home,
    About,
    Contact,
}

impl TabConfiguration {
    /// All tabs in display order.
    pub const ALL: [TabConfiguration; 3] = [
        TabConfiguration::Home,
        TabConfiguration::About,
        TabConfiguration::Contact,
    ];

    pub fn path_segment_identifier(self) -> &'static str {
        match self {
            TabConfiguration::Home => HOME,
            TabConfiguration::About => ABOUT,
            TabConfiguration::Contact => CONTACT,
        }
    }

    pub fn from_path_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.path_segment_identifier() == segment)
    }

    /// Tab named by the first segment of `url`; Home when absent or unknown.
    pub fn from_deep_link(url: Option<&Url>) -> Self {
        url.and_then(|url| url.consume_path_segment().0)
            .and_then(|segment| Self::from_path_segment(&segment))
            .unwrap_or(TabConfiguration::Home)
    }

    pub fn index(self) -> usize {
        match self {
            TabConfiguration::Home => 0,
            TabConfiguration::About => 1,
            TabConfiguration::Contact => 2,
        }
    }

    /// Deep-link tail selecting this tab.
    pub fn to_url(self) -> Url {
        Url {
            path_segments: vec![self.path_segment_identifier().to_string()],
            ..Url::default()
        }
    }
}
