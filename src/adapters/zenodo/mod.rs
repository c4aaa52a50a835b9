//! Zenodo-style source repository
//!
//! - [`client`] - `RecordProvider` over the `/records` search API
//! - [`models`] - search page response models

pub mod client;
pub mod models;

pub use client::ZenodoClient;
