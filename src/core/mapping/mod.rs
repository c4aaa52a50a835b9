//! Record mapping between repository schemas
//!
//! A [`RecordMapper`] is a pure transformation of one [`SourceRecord`] into
//! one [`MappedRecord`]. Implementations validate both sides: the source
//! before mapping and the assembled draft after it.
//!
//! - [`creators`] - creator mapping and name splitting
//! - [`related`] - related identifier normalisation
//! - [`vocabulary`] - relation type and resource type tables
//! - [`mapper`] - the Zenodo to InvenioRDM mapper

pub mod creators;
pub mod mapper;
pub mod related;
pub mod vocabulary;

pub use mapper::ZenodoToInvenioMapper;

use crate::domain::{MappedRecord, Result, SourceRecord};
use serde::{Deserialize, Serialize};

/// Formats and required fields a mapper declares
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSchema {
    pub source_format: String,
    pub target_format: String,
    pub version: String,
    pub required_fields: Vec<String>,
}

/// Transformation of source records into target drafts
pub trait RecordMapper: Send + Sync {
    /// Short name reported in status output
    fn mapper_type(&self) -> &'static str;

    /// True when the record can be handed to [`RecordMapper::map_record`]
    fn validate_source_record(&self, record: &SourceRecord) -> bool {
        !record.is_empty()
    }

    /// Maps one record
    ///
    /// # Errors
    ///
    /// `Mapping` when a mandatory source field is unusable, `Validation`
    /// when the assembled draft lacks required fields.
    fn map_record(&self, record: &SourceRecord) -> Result<MappedRecord>;

    /// True when the draft has every required field
    fn validate_mapped_record(&self, record: &MappedRecord) -> bool;

    fn mapping_schema(&self) -> MappingSchema;
}
