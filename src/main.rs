use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use appnav::auth::InMemoryAuthRepository;
use appnav::config::{AppConfig, ConfigStore};
use appnav::logging::init_tracing;
use appnav::navigation::{Dependencies, RootChild, RootRouter, RouterOptions};
use appnav::onboarding::{OnboardingRepository, PreferencesOnboardingRepository};
use appnav::prefs::FilePreferences;
use appnav::telemetry::{StaticFeatureFlags, TracingAnalytics, TracingLogger};
use clap::Parser;

/// Resolve the screen an app launch would show and print it as JSON.
#[derive(Parser, Debug)]
#[command(name = "appnav", version)]
struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Deep link the app is launched with.
    #[arg(long, value_name = "URL")]
    deep_link: Option<String>,

    /// Start with a session for this email.
    #[arg(long, value_name = "EMAIL")]
    signed_in: Option<String>,

    /// Persist the onboarding-completed flag before routing.
    #[arg(long, conflicts_with = "reset_onboarding")]
    seen_onboarding: bool,

    /// Clear the onboarding-completed flag before routing.
    #[arg(long)]
    reset_onboarding: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = ConfigStore::open(config_path)
        .context("failed to load configuration")?
        .get();

    let data_dir = config.storage.resolved_data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data dir {}", data_dir.display()))?;
    let prefs = Arc::new(FilePreferences::in_dir(&data_dir));
    tracing::debug!(path = %prefs.path().display(), "preferences file");

    let onboarding = Arc::new(PreferencesOnboardingRepository::new(prefs));
    if cli.seen_onboarding {
        onboarding.mark_onboarding_completed().await?;
    }
    if cli.reset_onboarding {
        onboarding.reset_onboarding_status().await?;
    }

    let auth = Arc::new(InMemoryAuthRepository::new());
    if let Some(email) = &cli.signed_in {
        let user = auth.sign_in_as(email);
        tracing::info!(user = %user.id, "signed in");
    }

    let deps = Dependencies {
        auth,
        onboarding,
        logger: Arc::new(TracingLogger),
        analytics: Arc::new(TracingAnalytics),
        features: Arc::new(StaticFeatureFlags::new(config.features.clone())),
    };

    let mut options = RouterOptions::default();
    if let Some(raw) = &cli.deep_link {
        options = options.with_raw_deep_link(raw);
    }

    let router = RootRouter::start(deps, options).await;
    let snapshot = router.snapshot();
    let screen = match router.child() {
        RootChild::Tabs(tabs) => tabs
            .active_child()
            .map(|entry| entry.child.title())
            .unwrap_or_default(),
        child => child.kind(),
    };
    let link = snapshot
        .configuration
        .to_url()
        .to_deep_link(&config.deep_link.scheme, &config.deep_link.host);

    let output = serde_json::json!({
        "configuration": snapshot.configuration,
        "pending_deep_link": snapshot.pending_deep_link,
        "deep_link": link,
        "screen": screen,
        "session": router.session(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    router.dispose();
    Ok(())
}
