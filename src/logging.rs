//! File-based logging
//!
//! The renderer owns the terminal or window, so tracing output goes to a
//! rolling file instead of stdout.

use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Initialize the logging system.
///
/// Logs are written to `<directory>/<file_prefix>.YYYY-MM-DD` with daily
/// rotation. `RUST_LOG` overrides `default_filter`.
///
/// The returned guard flushes buffered lines when dropped; keep it alive for
/// the lifetime of the application.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    if !config.directory.exists() {
        fs::create_dir_all(&config.directory)?;
    }

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, &config.directory, &config.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))?;

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Logging initialized - logs written to {}/", config.directory.display());

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            directory: dir.path().join("logs"),
            file_prefix: "keyid-test".to_string(),
            default_filter: "keyid=trace".to_string(),
        };

        // Another test in this binary may already own the global subscriber
        let _guard = init_logging(&config);
        assert!(config.directory.exists());
    }
}
