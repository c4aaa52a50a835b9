//! Preview dumps of mapped records
//!
//! A preview maps every selected record without submitting anything and
//! writes the results to one pretty-printed JSON array.

use crate::domain::{MappedRecord, RecordId, Result, SourceRecord};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One element of a preview dump
#[derive(Debug, Clone, Serialize)]
pub struct PreviewEntry {
    pub source_id: Option<RecordId>,
    pub source_record: SourceRecord,
    #[serde(flatten)]
    pub outcome: PreviewOutcome,
}

/// Mapped draft, or the reason mapping failed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewOutcome {
    MappedRecord(Box<MappedRecord>),
    MappingError(String),
}

impl PreviewEntry {
    pub fn mapped(source_record: SourceRecord, mapped: MappedRecord) -> Self {
        Self {
            source_id: source_record.id.clone(),
            source_record,
            outcome: PreviewOutcome::MappedRecord(Box::new(mapped)),
        }
    }

    pub fn failed(source_record: SourceRecord, error: impl ToString) -> Self {
        Self {
            source_id: source_record.id.clone(),
            source_record,
            outcome: PreviewOutcome::MappingError(error.to_string()),
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self.outcome, PreviewOutcome::MappedRecord(_))
    }
}

/// Writes a preview dump, creating parent directories as needed
///
/// # Errors
///
/// Returns an `Io` error if the directory or file cannot be written.
pub fn write_preview(path: impl AsRef<Path>, entries: &[PreviewEntry]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;

    tracing::info!(
        path = %path.display(),
        records = entries.len(),
        "Saved {} records to {}",
        entries.len(),
        path.display()
    );
    Ok(())
}
