//! Shared test utilities and fakes.

#![allow(dead_code, unused_imports)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use appnav::auth::InMemoryAuthRepository;
use appnav::navigation::Dependencies;
use appnav::onboarding::{default_slides, OnboardingRepository, Slide};
use appnav::prefs::PrefsError;
use appnav::telemetry::{
    Analytics, AnalyticsEvent, LogLevel, Logger, StaticFeatureFlags,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::TempDir;
use tokio::sync::{broadcast, watch};

/// Upper bound for anything a test waits on.
pub const WAIT: Duration = Duration::from_secs(2);

// -- Telemetry fakes ----------------------------------------------------------

#[derive(Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingAnalytics {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().clone()
    }

    pub fn screen_views(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                AnalyticsEvent::ScreenView { screen_name, .. } => Some(screen_name.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        self.events.lock().push(event);
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(LogLevel, String, String)>>,
}

impl RecordingLogger {
    pub fn entries(&self) -> Vec<(LogLevel, String, String)> {
        self.entries.lock().clone()
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.lock().iter().filter(|(l, _, _)| *l == level).count()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, tag: &str, message: &str) {
        self.entries
            .lock()
            .push((level, tag.to_string(), message.to_string()));
    }
}

// -- Onboarding fake ----------------------------------------------------------

/// Onboarding repository that counts writes and can be scripted to fail.
pub struct FakeOnboardingRepository {
    seen: Mutex<bool>,
    slides: Vec<Slide>,
    mark_calls: AtomicUsize,
    write_failures: Mutex<VecDeque<String>>,
    read_failure: Mutex<Option<String>>,
    write_delay: Mutex<Duration>,
}

impl FakeOnboardingRepository {
    pub fn new(seen: bool) -> Self {
        Self::with_slides(seen, default_slides())
    }

    pub fn with_slides(seen: bool, slides: Vec<Slide>) -> Self {
        Self {
            seen: Mutex::new(seen),
            slides,
            mark_calls: AtomicUsize::new(0),
            write_failures: Mutex::new(VecDeque::new()),
            read_failure: Mutex::new(None),
            write_delay: Mutex::new(Duration::ZERO),
        }
    }

    pub fn mark_calls(&self) -> usize {
        self.mark_calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> bool {
        *self.seen.lock()
    }

    /// Make the next write fail with `message`.
    pub fn fail_next_write(&self, message: &str) {
        self.write_failures.lock().push_back(message.to_string());
    }

    /// Make every flag read fail until cleared.
    pub fn fail_reads(&self, message: Option<&str>) {
        *self.read_failure.lock() = message.map(str::to_string);
    }

    /// Delay every write, keeping a completion in flight.
    pub fn set_write_delay(&self, delay: Duration) {
        *self.write_delay.lock() = delay;
    }

    async fn write(&self, value: bool) -> Result<(), PrefsError> {
        let delay = *self.write_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.write_failures.lock().pop_front() {
            return Err(PrefsError::Task(message));
        }
        *self.seen.lock() = value;
        Ok(())
    }
}

#[async_trait]
impl OnboardingRepository for FakeOnboardingRepository {
    async fn has_seen_onboarding(&self) -> Result<bool, PrefsError> {
        if let Some(message) = self.read_failure.lock().clone() {
            return Err(PrefsError::Task(message));
        }
        Ok(*self.seen.lock())
    }

    async fn mark_onboarding_completed(&self) -> Result<(), PrefsError> {
        self.mark_calls.fetch_add(1, Ordering::SeqCst);
        self.write(true).await
    }

    async fn reset_onboarding_status(&self) -> Result<(), PrefsError> {
        self.write(false).await
    }

    async fn all_slides(&self) -> Vec<Slide> {
        self.slides.clone()
    }
}

// -- Dependency bundle --------------------------------------------------------

/// Fakes behind a [`Dependencies`] bundle, kept concrete for assertions.
pub struct Harness {
    pub auth: Arc<InMemoryAuthRepository>,
    pub onboarding: Arc<FakeOnboardingRepository>,
    pub logger: Arc<RecordingLogger>,
    pub analytics: Arc<RecordingAnalytics>,
    pub features: Arc<StaticFeatureFlags>,
}

impl Harness {
    pub fn new(seen_onboarding: bool) -> Self {
        Self {
            auth: Arc::new(InMemoryAuthRepository::new()),
            onboarding: Arc::new(FakeOnboardingRepository::new(seen_onboarding)),
            logger: Arc::new(RecordingLogger::default()),
            analytics: Arc::new(RecordingAnalytics::default()),
            features: Arc::new(StaticFeatureFlags::default()),
        }
    }

    /// Signed in as `user@example.com`.
    pub fn signed_in(seen_onboarding: bool) -> Self {
        let harness = Self::new(seen_onboarding);
        harness.auth.sign_in_as("user@example.com");
        harness
    }

    pub fn deps(&self) -> Dependencies {
        Dependencies {
            auth: self.auth.clone(),
            onboarding: self.onboarding.clone(),
            logger: self.logger.clone(),
            analytics: self.analytics.clone(),
            features: self.features.clone(),
        }
    }
}

// -- Waiting ------------------------------------------------------------------

/// Wait until the watched value satisfies `predicate`, returning it.
///
/// Panics after [`WAIT`].
pub async fn wait_for<T, F>(receiver: &mut watch::Receiver<T>, mut predicate: F) -> T
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    tokio::time::timeout(WAIT, receiver.wait_for(|value| predicate(value)))
        .await
        .expect("timed out waiting for state")
        .expect("state channel closed")
        .clone()
}

/// Receive the next label, panicking after [`WAIT`].
pub async fn next_label<L: Clone>(labels: &mut broadcast::Receiver<L>) -> L {
    tokio::time::timeout(WAIT, labels.recv())
        .await
        .expect("timed out waiting for label")
        .expect("label channel closed")
}

/// Assert that no label arrives within `window`.
pub async fn assert_no_label<L: Clone + std::fmt::Debug>(
    labels: &mut broadcast::Receiver<L>,
    window: Duration,
) {
    if let Ok(Ok(label)) = tokio::time::timeout(window, labels.recv()).await {
        panic!("unexpected label {:?}", label);
    }
}

/// Poll `condition` until it holds, panicking after [`WAIT`].
pub async fn eventually<F: FnMut() -> bool>(mut condition: F) {
    let start = std::time::Instant::now();
    while !condition() {
        assert!(start.elapsed() < WAIT, "condition not met within {:?}", WAIT);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

// -- Filesystem ---------------------------------------------------------------

/// Create a temporary config file with `content`.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
