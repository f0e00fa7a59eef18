use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
}

/// Application log sink injected into screen components.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, tag: &str, message: &str);

    fn debug(&self, tag: &str, message: &str) {
        self.log(LogLevel::Debug, tag, message);
    }

    fn info(&self, tag: &str, message: &str) {
        self.log(LogLevel::Info, tag, message);
    }

    fn warn(&self, tag: &str, message: &str) {
        self.log(LogLevel::Warn, tag, message);
    }

    fn error(&self, tag: &str, message: &str) {
        self.log(LogLevel::Error, tag, message);
    }
}

/// Logger that forwards to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, tag: &str, message: &str) {
        match level {
            LogLevel::Verbose => tracing::trace!(tag, "{}", message),
            LogLevel::Debug => tracing::debug!(tag, "{}", message),
            LogLevel::Info => tracing::info!(tag, "{}", message),
            LogLevel::Warn => tracing::warn!(tag, "{}", message),
            LogLevel::Error => tracing::error!(tag, "{}", message),
        }
    }
}
