//! Migration orchestration
//!
//! - [`service`] - the provider → mapper → consumer pipeline
//! - [`summary`] - per-run success and failure accounting
//! - [`preview`] - map-only runs dumped to a JSON file

pub mod preview;
pub mod service;
pub mod summary;

pub use preview::{write_preview, PreviewEntry, PreviewOutcome};
pub use service::{
    MigrateRequest, MigrationOptions, MigrationService, MigrationStatus, RecordSelection,
    SingleRecordOutcome,
};
pub use summary::MigrationBatchResult;
