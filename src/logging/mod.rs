//! Logging
//!
//! Events are emitted with `tracing` and structured fields (`record_id`,
//! `draft_id`, `status`, `attempt`). [`init_logging`] installs a stderr
//! console layer and, when enabled, a rolling JSON file layer.
//!
//! The macros below keep the field names of recurring events consistent
//! between the service and the adapters.
//!
//! ```no_run
//! use invenio_migrator::config::LoggingConfig;
//! use invenio_migrator::logging::init_logging;
//!
//! let _guard = init_logging("info", &LoggingConfig::default()).expect("logging");
//! tracing::info!(record_id = "15411009", "Record migrated");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a migration run
///
/// # Example
///
/// ```no_run
/// use invenio_migrator::log_migration_start;
///
/// log_migration_start!("*", true);
/// ```
#[macro_export]
macro_rules! log_migration_start {
    ($query:expr, $dry_run:expr) => {
        tracing::info!(query = %$query, dry_run = $dry_run, "Starting migration");
    };
}

/// Log a successfully migrated record
///
/// # Example
///
/// ```no_run
/// use invenio_migrator::log_record_migrated;
///
/// log_record_migrated!("15411009", "abcd-1234");
/// ```
#[macro_export]
macro_rules! log_record_migrated {
    ($source_id:expr, $target_id:expr) => {
        tracing::info!(
            record_id = %$source_id,
            target_id = %$target_id,
            "Record migrated"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use invenio_migrator::log_error_with_context;
/// use invenio_migrator::domain::MigratorError;
///
/// let error = MigratorError::configuration("target.api_token", "is required");
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use invenio_migrator::log_retry_attempt;
///
/// log_retry_attempt!(2, 4, 4000u64, "429 Too Many Requests");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $delay_ms:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            delay_ms = $delay_ms,
            reason = %$reason,
            "Rate limited, retrying"
        );
    };
}
