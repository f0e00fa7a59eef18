use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An analytics event with its backend name and parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    ScreenView {
        screen_name: String,
        screen_class: Option<String>,
    },
    ButtonClick {
        button_name: String,
        screen_name: Option<String>,
    },
    SelectContent {
        content_type: String,
        item_id: String,
    },
    SelectItem {
        item_list_name: String,
        item_id: String,
    },
    Error {
        error_message: String,
        screen_name: Option<String>,
    },
    ElementTap {
        element_name: String,
        screen_name: Option<String>,
    },
    Custom {
        name: String,
        params: BTreeMap<String, String>,
    },
}

impl AnalyticsEvent {
    pub fn screen_view(screen_name: impl Into<String>) -> Self {
        AnalyticsEvent::ScreenView {
            screen_name: screen_name.into(),
            screen_class: None,
        }
    }

    /// Backend event name.
    pub fn name(&self) -> &str {
        match self {
            AnalyticsEvent::ScreenView { .. } => "screen_view",
            AnalyticsEvent::ButtonClick { .. } => "button_click",
            AnalyticsEvent::SelectContent { .. } => "select_content",
            AnalyticsEvent::SelectItem { .. } => "select_item",
            AnalyticsEvent::Error { .. } => "error",
            AnalyticsEvent::ElementTap { .. } => "element_tap",
            AnalyticsEvent::Custom { name, .. } => name,
        }
    }

    /// Backend parameters. Absent optional values are omitted.
    pub fn params(&self) -> BTreeMap<String, String> {
        fn put(map: &mut BTreeMap<String, String>, key: &str, value: Option<&String>) {
            if let Some(value) = value {
                map.insert(key.to_string(), value.clone());
            }
        }

        let mut params = BTreeMap::new();
        match self {
            AnalyticsEvent::ScreenView {
                screen_name,
                screen_class,
            } => {
                put(&mut params, "screen_name", Some(screen_name));
                put(&mut params, "screen_class", screen_class.as_ref());
            }
            AnalyticsEvent::ButtonClick {
                button_name,
                screen_name,
            } => {
                put(&mut params, "button_name", Some(button_name));
                put(&mut params, "screen_name", screen_name.as_ref());
            }
            AnalyticsEvent::SelectContent {
                content_type,
                item_id,
            } => {
                put(&mut params, "content_type", Some(content_type));
                put(&mut params, "item_id", Some(item_id));
            }
            AnalyticsEvent::SelectItem {
                item_list_name,
                item_id,
            } => {
                put(&mut params, "item_list_name", Some(item_list_name));
                put(&mut params, "item_id", Some(item_id));
            }
            AnalyticsEvent::Error {
                error_message,
                screen_name,
            } => {
                put(&mut params, "error_message", Some(error_message));
                put(&mut params, "screen_name", screen_name.as_ref());
            }
            AnalyticsEvent::ElementTap {
                element_name,
                screen_name,
            } => {
                put(&mut params, "element_name", Some(element_name));
                put(&mut params, "screen_name", screen_name.as_ref());
            }
            AnalyticsEvent::Custom { params: custom, .. } => {
                params.extend(custom.clone());
            }
        }
        params
    }
}

/// Analytics sink.
pub trait Analytics: Send + Sync {
    fn track(&self, event: AnalyticsEvent);

    fn track_all(&self, events: Vec<AnalyticsEvent>) {
        for event in events {
            self.track(event);
        }
    }
}

/// Analytics sink that records events as `tracing` records.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        tracing::info!(event = event.name(), params = ?event.params(), "analytics");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_view_params() {
        let event = AnalyticsEvent::ScreenView {
            screen_name: "About".into(),
            screen_class: Some("AboutComponent".into()),
        };
        assert_eq!(event.name(), "screen_view");
        let params = event.params();
        assert_eq!(params.get("screen_name").map(String::as_str), Some("About"));
        assert_eq!(
            params.get("screen_class").map(String::as_str),
            Some("AboutComponent")
        );
    }

    #[test]
    fn optional_params_are_omitted() {
        let event = AnalyticsEvent::ElementTap {
            element_name: "cta".into(),
            screen_name: None,
        };
        assert_eq!(event.params().len(), 1);
    }

    #[test]
    fn custom_event_uses_its_own_name() {
        let event = AnalyticsEvent::Custom {
            name: "promo_shown".into(),
            params: BTreeMap::from([("slot".to_string(), "top".to_string())]),
        };
        assert_eq!(event.name(), "promo_shown");
        assert_eq!(event.params().get("slot").map(String::as_str), Some("top"));
    }
}
