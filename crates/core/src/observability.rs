//! Structured logging setup
//!
//! JSON logs go to stdout by default. When `CAREMATCH_LOG_DIR` is set, they are
//! written to `<dir>/<service>.log.<date>` with daily rotation instead.

use crate::error::CoreError;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub service_name: String,
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    pub log_dir: Option<PathBuf>,
}

impl LogConfig {
    pub fn from_env(service_name: &str, level: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            level: level.to_string(),
            log_dir: std::env::var_os("CAREMATCH_LOG_DIR").map(PathBuf::from),
        }
    }
}

/// Install the global subscriber. Calling it twice returns an error.
pub fn init_logging(config: &LogConfig) -> Result<(), CoreError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true)
        .json();

    let result = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| {
                CoreError::LoggingError(format!("cannot create {}: {}", dir.display(), e))
            })?;
            let appender =
                tracing_appender::rolling::daily(dir, format!("{}.log", config.service_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = LOG_GUARD.set(guard);
            builder.with_writer(writer).try_init()
        }
        None => builder.try_init(),
    };

    result.map_err(|e| CoreError::LoggingError(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        file_output = config.log_dir.is_some(),
        "Logging initialized"
    );
    Ok(())
}
