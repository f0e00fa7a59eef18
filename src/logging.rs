use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a log file. Unset means stderr.
pub const LOG_FILE_ENV: &str = "APPNAV_LOG";

/// Initialize tracing.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. When `APPNAV_LOG`
/// names a path, records are appended there instead of stderr, so the
/// JSON printed on stdout stays clean either way.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let timer = fmt::time::UtcTime::rfc_3339();

    let log_path = std::env::var(LOG_FILE_ENV).ok();
    let file = log_path.as_ref().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("Warning: Failed to open log file {}: {}", path, e))
            .ok()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match file {
        Some(file) => registry
            .with(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_timer(timer),
            )
            .init(),
        None => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_timer(timer),
            )
            .init(),
    }
}
