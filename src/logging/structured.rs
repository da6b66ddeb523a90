//! Structured logging setup using tracing
//!
//! Builds a subscriber from a resolved [`LoggingConfig`]: one layer per
//! enabled destination, each with its own level filter.

use crate::config::schema::logging::{
    LoggingConfig, RotationSettings, DESTINATION_CONSOLE, DESTINATION_FILE,
};
use crate::error::{ConfigError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Prefix of log file names
const LOG_FILE_PREFIX: &str = "nexaframe";

/// Guard that must be kept alive for the duration of the program
/// to ensure logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }
}

/// Initialize the global subscriber from the Logging domain
///
/// # Errors
///
/// Returns an error if the level is not recognised, the log directory cannot
/// be created, or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(&config.level)?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.has_destination(DESTINATION_CONSOLE) {
        let console_layer = tracing_subscriber::fmt::layer().with_target(true);
        if config.format.eq_ignore_ascii_case("json") {
            layers.push(console_layer.json().with_filter(build_filter(level)).boxed());
        } else {
            layers.push(console_layer.with_filter(build_filter(level)).boxed());
        }
    }

    let file_guard = if config.has_destination(DESTINATION_FILE) {
        std::fs::create_dir_all(&config.directory)?;

        let (non_blocking, guard) = tracing_appender::non_blocking(build_file_appender(config)?);
        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(non_blocking)
            .with_filter(build_filter(level));

        layers.push(file_layer.boxed());
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| ConfigError::Logging(format!("Failed to install subscriber: {e}")))?;

    tracing::info!(
        level = %level,
        destinations = ?config.destinations,
        directory = %config.directory,
        "Logging initialized"
    );

    Ok(LoggingGuard::new(file_guard))
}

/// Builds the rolling file appender for the file destination
///
/// # Errors
///
/// Returns an error if the appender cannot open a file in `config.directory`.
pub fn build_file_appender(config: &LoggingConfig) -> Result<RollingFileAppender> {
    let mut builder = RollingFileAppender::builder()
        .rotation(rotation_for(&config.rotation))
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log");

    if config.rotation.enabled && config.rotation.max_files > 0 {
        builder = builder.max_log_files(config.rotation.max_files);
    }

    builder.build(&config.directory).map_err(|e| {
        ConfigError::Logging(format!(
            "Failed to create log file in {}: {e}",
            config.directory
        ))
    })
}

/// Map rotation settings onto an appender rotation
///
/// Unrecognised intervals rotate daily.
fn rotation_for(settings: &RotationSettings) -> Rotation {
    if !settings.enabled {
        return Rotation::NEVER;
    }

    match settings.interval.to_ascii_lowercase().as_str() {
        "1m" | "minutely" => Rotation::MINUTELY,
        "1h" | "hourly" => Rotation::HOURLY,
        "1d" | "daily" => Rotation::DAILY,
        other => {
            tracing::warn!(interval = other, "Unsupported rotation interval, rotating daily");
            Rotation::DAILY
        }
    }
}

/// `RUST_LOG` when set, otherwise the configured level
fn build_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()))
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(ConfigError::Logging(format!(
            "Invalid log level: {level_str}. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}
