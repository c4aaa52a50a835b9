//! Core business logic for the migrator.
//!
//! # Modules
//!
//! - [`mapping`] - Zenodo to InvenioRDM record mapping and validation
//! - [`migration`] - Batch orchestration, single-record migration and previews
//!
//! # Migration Workflow
//!
//! 1. **Fetch**: Pull records lazily from the source, page by page
//! 2. **Map**: Transform each record into an InvenioRDM draft
//! 3. **Submit**: Create the draft on the target
//! 4. **Review**: Open a community-submission request and submit it
//! 5. **Report**: Log successes and every failed record
//!
//! # Example
//!
//! ```rust,no_run
//! use invenio_migrator::adapters::invenio::InvenioClient;
//! use invenio_migrator::adapters::zenodo::ZenodoClient;
//! use invenio_migrator::config::load_config;
//! use invenio_migrator::core::mapping::ZenodoToInvenioMapper;
//! use invenio_migrator::core::migration::{MigrateRequest, MigrationOptions, MigrationService};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("migrator.toml")?;
//!
//! let service = MigrationService::new(
//!     Arc::new(ZenodoClient::new(&config.source)?),
//!     Arc::new(InvenioClient::new(&config.target)?),
//!     Arc::new(ZenodoToInvenioMapper::from_config(&config.migration)),
//!     MigrationOptions::from_config(&config),
//! );
//!
//! let result = service.migrate_records(&MigrateRequest::default()).await?;
//!
//! println!("Successful: {}", result.success_count);
//! println!("Failed: {}", result.failed_records.len());
//! # Ok(())
//! # }
//! ```

pub mod mapping;
pub mod migration;
