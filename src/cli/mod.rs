//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the migrator using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Invenio Migrator - Zenodo to InvenioRDM migration tool
#[derive(Parser, Debug)]
#[command(name = "invenio-migrator")]
#[command(version, about, long_about = None)]
#[command(author = "Invenio Migrator Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "migrator.toml", env = "INVENIO_MIGRATOR_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "INVENIO_MIGRATOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Migrate records from the source community to the target repository
    Migrate(commands::migrate::MigrateArgs),

    /// Migrate a single record by source id
    Record(commands::record::RecordArgs),

    /// Accept a pending community-submission request
    Accept(commands::accept::AcceptArgs),

    /// Check connectivity to both repositories
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
