use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

const LOG_FILE_PREFIX: &str = "journal-entry-proxy.log";

pub fn get_log_dir(dir: &str) -> AppResult<PathBuf> {
    let log_dir = PathBuf::from(dir);

    if !log_dir.exists() {
        fs::create_dir_all(&log_dir).map_err(|e| {
            AppError::Config(format!("Failed to create log directory {:?}: {}", log_dir, e))
        })?;
    }

    Ok(log_dir)
}

/// Build the filter: `RUST_LOG` wins, otherwise the configured level
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(level.trim().to_lowercase()).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Initialize logger system
///
/// Always logs to the console. When `log_dir` is set, also writes a daily
/// rolling file; keep the returned guard alive until exit so it gets flushed.
pub fn init_logger(level: &str, log_dir: Option<&str>) -> Option<WorkerGuard> {
    // Capture log macro logs
    let _ = tracing_log::LogTracer::init();

    let console_layer = fmt::Layer::new()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    let (file_layer, guard) = match log_dir.map(get_log_dir) {
        Some(Ok(dir)) => {
            // Daily rolling file, no ANSI colors
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_level(true);
            (Some(layer), Some(guard))
        }
        Some(Err(e)) => {
            eprintln!("Failed to initialize log directory: {}", e);
            (None, None)
        }
        None => (None, None),
    };

    // try_init so a second call (tests) does not panic
    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(console_layer)
        .with(file_layer)
        .try_init();

    info!(file_logging = guard.is_some(), "Logger system initialized");

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_log_dir_creates_directory() {
        let dir =
            std::env::temp_dir().join(format!("journal-proxy-logs-{}", uuid::Uuid::new_v4()));
        let path = dir.to_string_lossy().to_string();

        let created = get_log_dir(&path).unwrap();
        assert!(created.is_dir());

        let _ = fs::remove_dir_all(created);
    }

    #[test]
    fn test_build_filter_accepts_uppercase_level() {
        if std::env::var("RUST_LOG").is_err() {
            let filter = build_filter("DEBUG");
            assert_eq!(
                filter.max_level_hint(),
                Some(tracing_subscriber::filter::LevelFilter::DEBUG)
            );
        }
    }
}
