//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod accept;
pub mod init;
pub mod migrate;
pub mod record;
pub mod status;
pub mod validate;

use crate::adapters::invenio::InvenioClient;
use crate::adapters::zenodo::ZenodoClient;
use crate::config::MigratorConfig;
use crate::core::mapping::ZenodoToInvenioMapper;
use crate::core::migration::{MigrationOptions, MigrationService};
use crate::domain::{MigratorError, Result};
use std::sync::Arc;

/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for connection or initialisation errors
pub const EXIT_CONNECTION: i32 = 4;

/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Wires the HTTP clients and the mapper into a migration service
pub(crate) fn build_service(config: &MigratorConfig) -> Result<MigrationService> {
    let provider = ZenodoClient::new(&config.source)?;
    let consumer = InvenioClient::new(&config.target)?;
    let mapper = ZenodoToInvenioMapper::from_config(&config.migration);

    Ok(MigrationService::new(
        Arc::new(provider),
        Arc::new(consumer),
        Arc::new(mapper),
        MigrationOptions::from_config(config),
    ))
}

/// Exit code for a failure to set up clients
pub(crate) fn setup_exit_code(error: &MigratorError) -> i32 {
    match error {
        MigratorError::Configuration { .. } => EXIT_CONFIG,
        _ => EXIT_CONNECTION,
    }
}

/// Loads configuration, printing the failure
pub(crate) fn load_or_report(config_path: &str) -> std::result::Result<MigratorConfig, i32> {
    crate::config::load_config(config_path).map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        println!("❌ Failed to load configuration file");
        println!("   Error: {e}");
        EXIT_CONFIG
    })
}
