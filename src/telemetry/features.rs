use std::collections::HashMap;

/// A boolean feature flag with its fallback value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureFlag {
    pub key: &'static str,
    pub default: bool,
}

/// Shows the welcome banner on the home tab.
pub const WELCOME_BANNER: FeatureFlag = FeatureFlag {
    key: "welcome_banner",
    default: false,
};

/// Feature flag lookup. Unknown flags resolve to their default.
pub trait FeatureFlags: Send + Sync {
    fn get(&self, flag: FeatureFlag) -> bool;
}

/// Flags fixed at construction, typically from the `[features]` config table.
#[derive(Debug, Default, Clone)]
pub struct StaticFeatureFlags {
    values: HashMap<String, bool>,
}

impl StaticFeatureFlags {
    pub fn new(values: HashMap<String, bool>) -> Self {
        Self { values }
    }
}

impl FeatureFlags for StaticFeatureFlags {
    fn get(&self, flag: FeatureFlag) -> bool {
        self.values.get(flag.key).copied().unwrap_or(flag.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_flag_uses_default() {
        let flags = StaticFeatureFlags::default();
        assert!(!flags.get(WELCOME_BANNER));
    }

    #[test]
    fn configured_flag_overrides_default() {
        let flags =
            StaticFeatureFlags::new(HashMap::from([("welcome_banner".to_string(), true)]));
        assert!(flags.get(WELCOME_BANNER));
    }
}
