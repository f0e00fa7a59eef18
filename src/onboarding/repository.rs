use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::onboarding::slide::{default_slides, Slide};
use crate::prefs::{PreferenceStore, PrefsError};

/// Preference key for the persisted onboarding flag.
pub const HAS_SEEN_ONBOARDING_KEY: &str = "has_seen_onboarding";

#[async_trait]
pub trait OnboardingRepository: Send + Sync {
    /// `false` when the flag was never written.
    async fn has_seen_onboarding(&self) -> Result<bool, PrefsError>;

    async fn mark_onboarding_completed(&self) -> Result<(), PrefsError>;

    async fn reset_onboarding_status(&self) -> Result<(), PrefsError>;

    async fn all_slides(&self) -> Vec<Slide>;
}

/// Onboarding state kept in a [`PreferenceStore`].
///
/// Writes are serialized through an async lock and run on the blocking pool.
pub struct PreferencesOnboardingRepository {
    prefs: Arc<dyn PreferenceStore>,
    write_lock: Mutex<()>,
}

impl PreferencesOnboardingRepository {
    pub fn new(prefs: Arc<dyn PreferenceStore>) -> Self {
        Self {
            prefs,
            write_lock: Mutex::new(()),
        }
    }

    async fn write_flag(&self, value: bool) -> Result<(), PrefsError> {
        let _guard = self.write_lock.lock().await;
        let prefs = Arc::clone(&self.prefs);
        tokio::task::spawn_blocking(move || prefs.set_bool(HAS_SEEN_ONBOARDING_KEY, value))
            .await
            .map_err(|e| PrefsError::Task(e.to_string()))?
    }
}

#[async_trait]
impl OnboardingRepository for PreferencesOnboardingRepository {
    async fn has_seen_onboarding(&self) -> Result<bool, PrefsError> {
        let prefs = Arc::clone(&self.prefs);
        let stored = tokio::task::spawn_blocking(move || prefs.get_bool(HAS_SEEN_ONBOARDING_KEY))
            .await
            .map_err(|e| PrefsError::Task(e.to_string()))??;
        Ok(stored.unwrap_or(false))
    }

    async fn mark_onboarding_completed(&self) -> Result<(), PrefsError> {
        tracing::info!("marking onboarding completed");
        self.write_flag(true).await
    }

    async fn reset_onboarding_status(&self) -> Result<(), PrefsError> {
        tracing::info!("resetting onboarding status");
        self.write_flag(false).await
    }

    async fn all_slides(&self) -> Vec<Slide> {
        default_slides()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::InMemoryPreferences;

    #[tokio::test]
    async fn unseen_by_default_then_marked() {
        let repo = PreferencesOnboardingRepository::new(Arc::new(InMemoryPreferences::new()));
        assert!(!repo.has_seen_onboarding().await.unwrap());

        repo.mark_onboarding_completed().await.unwrap();
        assert!(repo.has_seen_onboarding().await.unwrap());

        repo.reset_onboarding_status().await.unwrap();
        assert!(!repo.has_seen_onboarding().await.unwrap());
    }

    #[tokio::test]
    async fn slides_are_the_default_deck() {
        let repo = PreferencesOnboardingRepository::new(Arc::new(InMemoryPreferences::new()));
        let slides = repo.all_slides().await;
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[0].title, "Mission");
        assert_eq!(slides[2].icon, "🤝");
    }
}
