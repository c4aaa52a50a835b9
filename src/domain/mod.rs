//! Domain models and types for the migrator.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`RecordId`]) accepting numeric or string ids
//! - **Source records** ([`SourceRecord`]) as read from the source repository
//! - **Mapped records** ([`MappedRecord`]) in the InvenioRDM draft schema
//! - **Error types** ([`MigratorError`], [`ApiError`], [`RecordMappingError`],
//!   [`RecordValidationError`], [`MigrationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, MigratorError>`]:
//!
//! ```rust
//! use invenio_migrator::domain::{MigratorError, Result};
//!
//! fn example() -> Result<()> {
//!     let record: serde_json::Value = serde_json::from_str("{\"id\": 1}")?;
//!     assert!(record.is_object());
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod mapped;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{
    ApiError, FailedRecord, MigrationError, MigratorError, RecordMappingError,
    RecordValidationError,
};
pub use ids::RecordId;
pub use mapped::{
    Access, Affiliation, CreatedRecord, CreatorEntry, FilesOptions, Identifier, LocalizedTitle,
    MappedMetadata, MappedRecord, PersonOrOrg, PidEntry, Pids, RelatedIdentifier,
    RelatedResourceType, ResourceTypeRef, Subject, VocabularyTerm, COMMUNITY_SUBMISSION,
};
pub use record::{SourceCreator, SourceMetadata, SourceRecord, SourceResourceType};
pub use result::Result;
