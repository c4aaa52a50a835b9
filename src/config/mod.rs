//! Configuration management for the migrator.
//!
//! # Overview
//!
//! The migrator reads a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `INVENIO_MIGRATOR_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use invenio_migrator::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("migrator.toml")?;
//!
//! println!("Source: {}", config.source.base_url);
//! println!("Target: {}", config.target.base_url);
//! println!("Stop on error: {}", config.migration.stop_on_error);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`SourceConfig`] - Source repository connection, paging and date window
//! - [`TargetConfig`] - Target repository connection and retry policy
//! - [`MigrationConfig`] - Stop-on-error, PID and file handling, review text
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [source]
//! base_url = "https://zenodo.org/api"
//! community_id = "my-community"
//!
//! [target]
//! base_url = "https://inveniordm.example.org/api"
//! api_token = "${TARGET_API_TOKEN}"
//! community_id = "a1b2c3d4-0000-0000-0000-000000000000"
//!
//! [migration]
//! stop_on_error = false
//! include_pids = true
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, Environment, LoggingConfig, MigrationConfig, MigratorConfig, SourceConfig,
    TargetConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
