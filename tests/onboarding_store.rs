mod common;

use std::sync::Arc;
use std::time::Duration;

use appnav::mvi::Scope;
use appnav::onboarding::store::{create_onboarding_store, OnboardingIntent, OnboardingLabel};
use appnav::onboarding::{OnboardingComponent, Slide};
use appnav::telemetry::LogLevel;
use common::{
    assert_no_label, eventually, next_label, wait_for, FakeOnboardingRepository, RecordingLogger,
};

fn slides(count: usize) -> Vec<Slide> {
    (0..count)
        .map(|i| Slide {
            title: format!("Slide {}", i),
            description: String::new(),
            icon: "•".to_string(),
            background_image: None,
        })
        .collect()
}

#[tokio::test]
async fn complete_marks_once_and_navigates_once() {
    let repo = Arc::new(FakeOnboardingRepository::new(false));
    repo.set_write_delay(Duration::from_millis(20));
    let logger = Arc::new(RecordingLogger::default());
    let store = create_onboarding_store(repo.clone(), logger.clone(), 0, Scope::new());
    let mut labels = store.labels();

    store.accept(OnboardingIntent::CompleteOnboarding);
    store.accept(OnboardingIntent::CompleteOnboarding);
    store.accept(OnboardingIntent::SkipOnboarding);

    assert_eq!(next_label(&mut labels).await, OnboardingLabel::NavigateToHome);
    assert_no_label(&mut labels, Duration::from_millis(50)).await;

    store.accept(OnboardingIntent::CompleteOnboarding);
    assert_no_label(&mut labels, Duration::from_millis(50)).await;

    assert_eq!(repo.mark_calls(), 1);
    assert!(repo.seen());
    assert!(logger.count(LogLevel::Info) >= 1);
}

#[tokio::test]
async fn slides_load_and_paging_clamps() {
    let repo = Arc::new(FakeOnboardingRepository::with_slides(false, slides(3)));
    let store = create_onboarding_store(
        repo,
        Arc::new(RecordingLogger::default()),
        0,
        Scope::new(),
    );
    let mut states = store.states();
    wait_for(&mut states, |s| !s.is_loading).await;

    store.accept(OnboardingIntent::PreviousSlide);
    for _ in 0..5 {
        store.accept(OnboardingIntent::NextSlide);
    }
    let state = wait_for(&mut states, |s| s.current_slide == 2).await;
    assert_eq!(state.total_slides, 3);

    // Settle: any extra NextSlide must have been clamped.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(store.state().current_slide, 2);
}

#[tokio::test]
async fn initial_page_is_clamped_to_slide_count() {
    let repo = Arc::new(FakeOnboardingRepository::with_slides(false, slides(2)));
    let store = create_onboarding_store(
        repo,
        Arc::new(RecordingLogger::default()),
        9,
        Scope::new(),
    );
    let mut states = store.states();
    let state = wait_for(&mut states, |s| !s.is_loading).await;
    assert_eq!(state.current_slide, 1);
}

#[tokio::test]
async fn failed_completion_sets_error_and_allows_retry() {
    let repo = Arc::new(FakeOnboardingRepository::new(false));
    repo.fail_next_write("disk full");
    let logger = Arc::new(RecordingLogger::default());
    let store = create_onboarding_store(repo.clone(), logger.clone(), 0, Scope::new());
    let mut states = store.states();
    let mut labels = store.labels();

    store.accept(OnboardingIntent::CompleteOnboarding);
    let failed = wait_for(&mut states, |s| s.error.is_some()).await;
    assert!(!failed.is_completing);
    assert!(failed.error.unwrap().contains("disk full"));
    assert_eq!(logger.count(LogLevel::Error), 1);

    store.accept(OnboardingIntent::CompleteOnboarding);
    assert_eq!(next_label(&mut labels).await, OnboardingLabel::NavigateToHome);
    assert_eq!(repo.mark_calls(), 2);
    assert!(store.state().error.is_none());
}

#[tokio::test]
async fn disposed_store_ignores_intents() {
    let repo = Arc::new(FakeOnboardingRepository::new(false));
    let store = create_onboarding_store(
        repo.clone(),
        Arc::new(RecordingLogger::default()),
        0,
        Scope::new(),
    );
    store.dispose();
    assert!(store.is_disposed());

    store.accept(OnboardingIntent::CompleteOnboarding);
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(repo.mark_calls(), 0);
}

#[tokio::test]
async fn dispose_cancels_in_flight_completion() {
    let repo = Arc::new(FakeOnboardingRepository::new(false));
    repo.set_write_delay(Duration::from_millis(50));
    let store = create_onboarding_store(
        repo.clone(),
        Arc::new(RecordingLogger::default()),
        0,
        Scope::new(),
    );
    let mut states = store.states();
    let mut labels = store.labels();

    store.accept(OnboardingIntent::CompleteOnboarding);
    let before = wait_for(&mut states, |s| s.is_completing).await;
    store.dispose();

    assert_no_label(&mut labels, Duration::from_millis(150)).await;
    assert_eq!(store.state(), before);
    assert_eq!(repo.mark_calls(), 1);
    assert!(!repo.seen());
}

#[tokio::test]
async fn component_forwards_navigation_and_exposes_model() {
    let repo = Arc::new(FakeOnboardingRepository::with_slides(false, slides(3)));
    let navigated = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = navigated.clone();
    let component = OnboardingComponent::new(
        repo,
        Arc::new(RecordingLogger::default()),
        0,
        Scope::new(),
        Arc::new(move || {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }),
    );

    let mut states = component.states();
    wait_for(&mut states, |s| !s.is_loading).await;
    let model = component.model();
    assert!(model.is_first_slide);
    assert!(!model.is_last_slide);
    assert_eq!(model.total_slides, 3);

    component.on_next();
    component.on_next();
    wait_for(&mut states, |s| s.current_slide == 2).await;
    assert!(component.model().is_last_slide);

    component.on_complete();
    eventually(|| navigated.load(std::sync::atomic::Ordering::SeqCst) == 1).await;
}
