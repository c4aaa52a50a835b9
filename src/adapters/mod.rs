//! External system integrations.
//!
//! This module provides adapters for the two repositories a migration
//! talks to:
//!
//! - [`zenodo`] - Zenodo-style source repository (read)
//! - [`invenio`] - InvenioRDM target repository (write, review workflow)
//! - [`traits`] - [`RecordProvider`](traits::RecordProvider) and
//!   [`RecordConsumer`](traits::RecordConsumer) abstractions
//! - [`retry`] - exponential backoff on rate limiting
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with mock implementations. The migration service only sees
//! the traits.
//!
//! ```rust,no_run
//! use invenio_migrator::adapters::invenio::InvenioClient;
//! use invenio_migrator::adapters::traits::RecordConsumer;
//! use invenio_migrator::config::{secret_string, TargetConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TargetConfig {
//!     base_url: "https://inveniordm.example.org/api".to_string(),
//!     api_token: Some(secret_string("token".to_string())),
//!     ..TargetConfig::default()
//! };
//!
//! let client = InvenioClient::new(&config)?;
//! assert!(client.validate_connection().await);
//! # Ok(())
//! # }
//! ```

pub(crate) mod http;
pub mod invenio;
pub mod retry;
pub mod traits;
pub mod zenodo;
