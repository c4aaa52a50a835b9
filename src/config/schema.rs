//! Configuration schema types
//!
//! This module defines the configuration structure for the migrator. The
//! configuration is assembled once at startup and passed by reference into
//! each component's constructor.

use crate::config::SecretString;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main migrator configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigratorConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Source repository (Zenodo-style)
    pub source: SourceConfig,

    /// Target repository (InvenioRDM)
    pub target: TargetConfig,

    /// Migration behaviour
    #[serde(default)]
    pub migration: MigrationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MigratorConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.source.validate(&self.environment)?;
        self.target.validate(&self.environment)?;
        self.migration.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Source repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// API base URL, e.g. `https://zenodo.org/api`
    #[serde(default = "default_source_base_url")]
    pub base_url: String,

    /// Community whose records are migrated
    pub community_id: String,

    /// Optional bearer token
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Fixed delay applied before every request
    #[serde(default = "default_source_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Records per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Sort order passed to the search endpoint
    #[serde(default = "default_sort")]
    pub sort: String,

    /// Include every version of a record, not only the latest
    #[serde(default = "default_true")]
    pub all_versions: bool,

    /// TLS certificate verification enabled
    ///
    /// Cannot be disabled in production environments.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Earliest publication date to migrate (YYYY-MM-DD, inclusive)
    #[serde(default)]
    pub start_date: Option<String>,

    /// Latest publication date to migrate (YYYY-MM-DD, inclusive)
    #[serde(default)]
    pub end_date: Option<String>,
}

impl SourceConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        validate_base_url("source.base_url", &self.base_url)?;

        if self.community_id.trim().is_empty() {
            return Err("source.community_id cannot be empty".to_string());
        }

        if !(1..=1000).contains(&self.page_size) {
            return Err(format!(
                "source.page_size must be between 1 and 1000, got {}",
                self.page_size
            ));
        }

        if self.timeout_seconds == 0 {
            return Err("source.timeout_seconds must be > 0".to_string());
        }

        let start = parse_date("source.start_date", self.start_date.as_deref())?;
        let end = parse_date("source.end_date", self.end_date.as_deref())?;
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(format!(
                    "source.start_date ({start}) must not be after source.end_date ({end})"
                ));
            }
        }

        if *environment == Environment::Production && !self.tls_verify {
            return Err(tls_in_production_error("source"));
        }

        Ok(())
    }

    /// Publication date window as parsed dates
    ///
    /// Returns `(None, None)` for bounds that are unset. Bounds are
    /// checked by [`MigratorConfig::validate`], so unparseable values are
    /// treated as unset here.
    pub fn date_window(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let parse = |v: &Option<String>| {
            v.as_deref()
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        };
        (parse(&self.start_date), parse(&self.end_date))
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_source_base_url(),
            community_id: String::new(),
            api_token: None,
            request_delay_ms: default_source_request_delay_ms(),
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
            sort: default_sort(),
            all_versions: true,
            tls_verify: true,
            start_date: None,
            end_date: None,
        }
    }
}

/// Target repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// API base URL, e.g. `https://inveniordm.example.org/api`
    pub base_url: String,

    /// Bearer token; required
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Community that receives submission requests; none disables the review workflow
    #[serde(default)]
    pub community_id: Option<String>,

    /// Fixed delay applied before review-workflow requests
    #[serde(default = "default_target_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Maximum retries on rate limiting
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// Timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// Cannot be disabled in production environments.
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl TargetConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        validate_base_url("target.base_url", &self.base_url)?;

        if self
            .api_token
            .as_ref()
            .map(|t| t.expose_secret().is_empty())
            .unwrap_or(true)
        {
            return Err("target.api_token cannot be empty".to_string());
        }

        if self.max_retries > 10 {
            return Err(format!(
                "target.max_retries must be <= 10, got {}",
                self.max_retries
            ));
        }

        if self.timeout_seconds == 0 {
            return Err("target.timeout_seconds must be > 0".to_string());
        }

        if *environment == Environment::Production && !self.tls_verify {
            return Err(tls_in_production_error("target"));
        }

        Ok(())
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            api_token: None,
            community_id: None,
            request_delay_ms: default_target_request_delay_ms(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
        }
    }
}

/// Migration behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Abort the batch on the first per-record failure
    #[serde(default)]
    pub stop_on_error: bool,

    /// Carry the source DOI over as an external PID
    #[serde(default = "default_true")]
    pub include_pids: bool,

    /// Enable files on created drafts
    #[serde(default)]
    pub include_files: bool,

    /// Stop after this many records in one run
    #[serde(default)]
    pub max_records: Option<usize>,

    /// Note attached to review submissions
    #[serde(default = "default_review_content")]
    pub review_content: String,
}

impl MigrationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_records == Some(0) {
            return Err("migration.max_records must be > 0 when set".to_string());
        }
        Ok(())
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            stop_on_error: false,
            include_pids: true,
            include_files: false,
            max_records: None,
            review_content: default_review_content(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_base_url(key: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{key} cannot be empty"));
    }

    let url = Url::parse(value).map_err(|e| format!("{key} is not a valid URL: {e}"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("{key} must start with http:// or https://"));
    }

    Ok(())
}

fn parse_date(key: &str, value: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match value {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| format!("{key} must be a date in YYYY-MM-DD format, got '{s}'")),
    }
}

fn tls_in_production_error(section: &str) -> String {
    format!(
        "TLS certificate verification cannot be disabled in production environments. \
        Set '{section}.tls_verify = true', or use environment = \"development\" or \"staging\"."
    )
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_source_base_url() -> String {
    "https://zenodo.org/api".to_string()
}

fn default_source_request_delay_ms() -> u64 {
    2000
}

fn default_target_request_delay_ms() -> u64 {
    1000
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> usize {
    100
}

fn default_sort() -> String {
    "newest".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    1000
}

fn default_review_content() -> String {
    "Auto-migrated record".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
