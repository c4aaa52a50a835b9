//! InvenioRDM target repository
//!
//! - [`client`] - `RecordConsumer` for drafts and the community review workflow
//! - [`models`] - request bodies and embedded error parsing

pub mod client;
pub mod models;

pub use client::InvenioClient;
