//! Subscriber setup
//!
//! Human-readable lines go to stderr so that stdout stays free for the
//! JSON printed by `record` and `status --json`. With
//! `logging.local_enabled` every event is also written as one JSON object
//! per line to `<local_path>/invenio-migrator.log`.

use crate::config::LoggingConfig;
use crate::domain::{MigratorError, Result};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// File name inside `logging.local_path`
pub const LOG_FILE_NAME: &str = "invenio-migrator.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Flushes buffered file output when dropped
///
/// Keep it alive until the process exits.
#[must_use]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Installs the global subscriber
///
/// `RUST_LOG` takes precedence over `log_level` when set.
///
/// # Errors
///
/// A `Configuration` error for an unknown level or when the log directory
/// cannot be created.
pub fn init_logging(log_level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(log_level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("invenio_migrator={level}")));

    let mut layers: Vec<BoxedLayer> = vec![tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter.clone())
        .boxed()];

    let file_guard = if config.local_enabled {
        let (layer, guard) = json_file_layer(config, filter)?;
        layers.push(layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry().with(layers).init();

    tracing::debug!(
        level = %level,
        file = config.local_enabled,
        path = %config.local_path,
        rotation = %config.local_rotation,
        "Logging initialized"
    );

    Ok(LoggingGuard { _file: file_guard })
}

fn json_file_layer(config: &LoggingConfig, filter: EnvFilter) -> Result<(BoxedLayer, WorkerGuard)> {
    let dir = Path::new(&config.local_path);
    std::fs::create_dir_all(dir).map_err(|e| {
        MigratorError::configuration(
            "logging.local_path",
            format!("Failed to create log directory {}: {e}", dir.display()),
        )
    })?;

    let appender = RollingFileAppender::new(rotation(&config.local_rotation), dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();

    Ok((layer, guard))
}

fn parse_log_level(value: &str) -> Result<Level> {
    value.trim().parse::<Level>().map_err(|_| {
        MigratorError::configuration(
            "log_level",
            format!("Invalid log level: {value}. Must be one of: trace, debug, info, warn, error"),
        )
    })
}

/// Validation restricts the setting to daily, hourly or never
fn rotation(value: &str) -> Rotation {
    match value {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}
