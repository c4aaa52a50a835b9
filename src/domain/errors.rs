//! Domain error types
//!
//! This module defines the error hierarchy for the migrator. All errors are
//! domain-specific and don't expose third-party HTTP client types.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Main migrator error type
///
/// This is the primary error type used throughout the application.
/// It wraps the specific error kinds raised by the provider, mapper,
/// consumer and migration service.
#[derive(Debug, Error)]
pub enum MigratorError {
    /// Missing or invalid setting
    #[error("Configuration error for '{key}': {reason}")]
    Configuration { key: String, reason: String },

    /// Transport, protocol or schema failure against a repository API
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Rate-limit retries exhausted
    #[error("Rate limit exceeded after {attempts} attempts: {message}")]
    RateLimitExceeded { attempts: u32, message: String },

    /// A source record could not be mapped
    #[error(transparent)]
    Mapping(#[from] RecordMappingError),

    /// A mapped record is missing required fields
    #[error(transparent)]
    Validation(#[from] RecordValidationError),

    /// Batch-level migration failure
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// A mapped record did not pass mapper validation
    #[error("Invalid mapped record: {0}")]
    InvalidMappedRecord(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MigratorError {
    /// Shorthand for a configuration error
    pub fn configuration(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// True for mapping and validation failures of a single record
    pub fn is_record_error(&self) -> bool {
        matches!(self, Self::Mapping(_) | Self::Validation(_))
    }
}

/// Repository API errors
///
/// Authentication failures are a distinct kind; every other failure carries
/// the HTTP status (absent for network-level failures) and the parsed error
/// body when the server returned one.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credentials were rejected (401)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Any other request failure
    #[error("{message}{}", status_suffix(.status))]
    RequestFailed {
        message: String,
        status: Option<u16>,
        body: Option<Value>,
    },
}

impl ApiError {
    /// Creates a request failure without status or body
    pub fn request(message: impl Into<String>) -> Self {
        Self::RequestFailed {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Creates a request failure from an HTTP response status and body
    pub fn with_status(message: impl Into<String>, status: u16, body: Option<Value>) -> Self {
        Self::RequestFailed {
            message: message.into(),
            status: Some(status),
            body,
        }
    }

    /// HTTP status associated with this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed(_) => Some(401),
            Self::RequestFailed { status, .. } => *status,
        }
    }

    /// Parsed error body, if the server returned one
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::AuthenticationFailed(_) => None,
            Self::RequestFailed { body, .. } => body.as_ref(),
        }
    }
}

/// Raised when a source record cannot be mapped to the target schema
#[derive(Debug, Clone, Error)]
#[error("Failed to map record {record_id}{}", self.details())]
pub struct RecordMappingError {
    /// Identifier of the source record
    pub record_id: String,

    /// Offending field, if known
    pub field: Option<String>,

    /// Why mapping failed
    pub reason: Option<String>,
}

impl RecordMappingError {
    /// Creates a mapping error for a record
    pub fn new(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            field: None,
            reason: None,
        }
    }

    /// Sets the offending field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    fn details(&self) -> String {
        let mut out = String::new();
        if let Some(field) = &self.field {
            out.push_str(&format!(" (field: {field})"));
        }
        if let Some(reason) = &self.reason {
            out.push_str(&format!(": {reason}"));
        }
        out
    }
}

/// Raised when an assembled record lacks required fields
#[derive(Debug, Clone, Error)]
#[error("Record validation failed for {record_id}{}", self.details())]
pub struct RecordValidationError {
    /// Identifier of the source record
    pub record_id: String,

    /// Every missing or empty required field
    pub missing_fields: Vec<String>,

    /// Fields present but invalid
    pub invalid_fields: Vec<String>,
}

impl RecordValidationError {
    /// Creates a validation error listing missing fields
    pub fn new(record_id: impl Into<String>, missing_fields: Vec<String>) -> Self {
        Self {
            record_id: record_id.into(),
            missing_fields,
            invalid_fields: Vec::new(),
        }
    }

    fn details(&self) -> String {
        let mut parts = Vec::new();
        if !self.missing_fields.is_empty() {
            parts.push(format!("Missing: {}", self.missing_fields.join(", ")));
        }
        if !self.invalid_fields.is_empty() {
            parts.push(format!("Invalid: {}", self.invalid_fields.join(", ")));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!(": {}", parts.join("; "))
        }
    }
}

/// A record that failed during a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRecord {
    /// Source record identifier
    pub id: String,

    /// Error text
    pub error: String,
}

impl FailedRecord {
    /// Creates a failed record entry
    pub fn new(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            error: error.into(),
        }
    }
}

/// Batch-level migration failure carrying every failure seen so far
#[derive(Debug, Clone, Error)]
#[error("{message}{}", self.details())]
pub struct MigrationError {
    /// What stopped the batch
    pub message: String,

    /// Failures accumulated before the batch stopped
    pub failed_records: Vec<FailedRecord>,
}

impl MigrationError {
    /// Creates a migration error
    pub fn new(message: impl Into<String>, failed_records: Vec<FailedRecord>) -> Self {
        Self {
            message: message.into(),
            failed_records,
        }
    }

    fn details(&self) -> String {
        if self.failed_records.is_empty() {
            String::new()
        } else {
            format!(": Failed records: {}", self.failed_records.len())
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status: {s})")).unwrap_or_default()
}

// Conversion from std::io::Error
impl From<std::io::Error> for MigratorError {
    fn from(err: std::io::Error) -> Self {
        MigratorError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MigratorError {
    fn from(err: serde_json::Error) -> Self {
        MigratorError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MigratorError {
    fn from(err: toml::de::Error) -> Self {
        MigratorError::configuration("toml", format!("TOML parse error: {err}"))
    }
}
