// Invenio Migrator - Zenodo to InvenioRDM migration tool
// Copyright (c) 2025 Invenio Migrator Contributors
// Licensed under the MIT License

//! # Invenio Migrator - Zenodo to InvenioRDM
//!
//! Invenio Migrator moves the records of a Zenodo community into an
//! InvenioRDM repository, submitting each one as a draft and routing it
//! through the target community's review workflow.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Reading** records page by page from a Zenodo-style `/records` API
//! - **Mapping** each record into the InvenioRDM draft schema with validation
//! - **Submitting** drafts with rate-limit aware retry and backoff
//! - **Reviewing** drafts through community-submission requests
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (mapping, migration orchestration, previews)
//! - [`adapters`] - External integrations (Zenodo, InvenioRDM, retry)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use invenio_migrator::adapters::invenio::InvenioClient;
//! use invenio_migrator::adapters::zenodo::ZenodoClient;
//! use invenio_migrator::config::load_config;
//! use invenio_migrator::core::mapping::ZenodoToInvenioMapper;
//! use invenio_migrator::core::migration::{MigrateRequest, MigrationOptions, MigrationService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("migrator.toml")?;
//!
//!     let service = MigrationService::new(
//!         Arc::new(ZenodoClient::new(&config.source)?),
//!         Arc::new(InvenioClient::new(&config.target)?),
//!         Arc::new(ZenodoToInvenioMapper::from_config(&config.migration)),
//!         MigrationOptions::from_config(&config),
//!     );
//!
//!     let request = MigrateRequest {
//!         dry_run: true,
//!         ..MigrateRequest::default()
//!     };
//!     let result = service.migrate_records(&request).await?;
//!
//!     println!("Mapped {} records", result.success_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Mapping
//!
//! Mapping is a pure function of the source record:
//!
//! ```rust
//! use invenio_migrator::core::mapping::creators::split_name;
//!
//! let name = split_name("van der Berg").unwrap();
//! assert_eq!(name.family, "Berg");
//! assert_eq!(name.given, "van der");
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], an alias over
//! [`domain::MigratorError`]:
//!
//! ```rust,no_run
//! use invenio_migrator::domain::MigratorError;
//!
//! fn example() -> Result<(), MigratorError> {
//!     let config = invenio_migrator::config::load_config("migrator.toml")?;
//!     println!("{}", config.source.community_id);
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! The migrator uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(record_id = "15411009", "Record migrated");
//! warn!(record_id = "15411010", error = "DOI is required", "Failed to process record");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
