use std::collections::HashMap;

use parking_lot::Mutex;

use super::{PreferenceStore, PrefsError};

/// Non-persistent preferences.
#[derive(Debug, Default)]
pub struct InMemoryPreferences {
    values: Mutex<HashMap<String, bool>>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryPreferences {
    fn get_bool(&self, key: &str) -> Result<Option<bool>, PrefsError> {
        Ok(self.values.lock().get(key).copied())
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), PrefsError> {
        self.values.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PrefsError> {
        self.values.lock().remove(key);
        Ok(())
    }
}
