//! Zenodo to InvenioRDM record mapper

use super::creators::map_creators;
use super::related::map_related_identifiers;
use super::vocabulary::resource_type_id;
use super::{MappingSchema, RecordMapper};
use crate::config::MigrationConfig;
use crate::domain::{
    Access, FilesOptions, MappedMetadata, MappedRecord, PidEntry, Pids, RecordMappingError,
    RecordValidationError, ResourceTypeRef, Result, SourceRecord, Subject, COMMUNITY_SUBMISSION,
};

const MAPPING_VERSION: &str = "1.0";

/// Maps Zenodo records into InvenioRDM community-submission drafts
///
/// # Example
///
/// ```
/// use invenio_migrator::core::mapping::{RecordMapper, ZenodoToInvenioMapper};
/// use invenio_migrator::domain::SourceRecord;
/// use serde_json::json;
///
/// let source = SourceRecord::from_value(json!({
///     "id": 123,
///     "doi": "10.5281/zenodo.123",
///     "metadata": {
///         "title": "Sea surface temperatures",
///         "creators": [{"name": "Doe, John"}],
///         "resource_type": {"type": "dataset"}
///     }
/// }))
/// .unwrap();
///
/// let mapped = ZenodoToInvenioMapper::new(true).map_record(&source).unwrap();
/// assert_eq!(mapped.title(), Some("Sea surface temperatures"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ZenodoToInvenioMapper {
    include_pids: bool,
}

impl ZenodoToInvenioMapper {
    pub fn new(include_pids: bool) -> Self {
        Self { include_pids }
    }

    pub fn from_config(config: &MigrationConfig) -> Self {
        Self::new(config.include_pids)
    }

    pub fn include_pids(&self) -> bool {
        self.include_pids
    }

    /// Every missing or empty required field of a draft
    pub fn missing_fields(&self, record: &MappedRecord) -> Vec<String> {
        let mut missing = Vec::new();

        if record.access.is_none() {
            missing.push("access".to_string());
        }
        if record.metadata.is_none() {
            missing.push("metadata".to_string());
        }
        if self.include_pids && record.pids.is_none() {
            missing.push("pids".to_string());
        }

        if let Some(metadata) = &record.metadata {
            match metadata.title.as_deref() {
                None => missing.push("metadata.title".to_string()),
                Some(title) if title.trim().is_empty() => {
                    missing.push("metadata.title (empty)".to_string())
                }
                Some(_) => {}
            }
            match &metadata.creators {
                None => missing.push("metadata.creators".to_string()),
                Some(creators) if creators.is_empty() => {
                    missing.push("metadata.creators (empty)".to_string())
                }
                Some(_) => {}
            }
            if metadata.resource_type.is_none() {
                missing.push("metadata.resource_type".to_string());
            }
        }

        missing
    }
}

impl RecordMapper for ZenodoToInvenioMapper {
    fn mapper_type(&self) -> &'static str {
        "zenodo_to_inveniordm"
    }

    fn map_record(&self, record: &SourceRecord) -> Result<MappedRecord> {
        let record_id = record.display_id();
        if let Some(reason) = &record.malformed {
            return Err(RecordMappingError::new(&record_id)
                .with_reason(format!("Malformed source record: {reason}"))
                .into());
        }
        let metadata = &record.metadata;

        let doi = record
            .doi
            .as_deref()
            .filter(|doi| !doi.trim().is_empty())
            .ok_or_else(|| {
                RecordMappingError::new(&record_id)
                    .with_field("doi")
                    .with_reason("DOI is required")
            })?;

        let source_type = metadata
            .resource_type
            .as_ref()
            .and_then(|rt| rt.kind.as_deref());
        let resource_type = resource_type_id(source_type);
        if source_type != Some(resource_type) {
            tracing::warn!(
                record_id = %record_id,
                source_type = source_type.unwrap_or_default(),
                "Unknown resource type, defaulting to {resource_type}"
            );
        }

        let subjects = metadata
            .keywords
            .iter()
            .flatten()
            .filter(|keyword| !keyword.is_empty())
            .map(|keyword| Subject {
                subject: keyword.clone(),
            })
            .collect();

        let mapped = MappedRecord {
            access: Some(Access::public()),
            files: Some(FilesOptions { enabled: true }),
            metadata: Some(MappedMetadata {
                title: metadata.title.clone(),
                resource_type: Some(ResourceTypeRef {
                    id: resource_type.to_string(),
                }),
                description: metadata.description.clone(),
                creators: Some(map_creators(&metadata.creators, &record_id)),
                publication_date: metadata.publication_date.clone(),
                subjects,
                related_identifiers: map_related_identifiers(
                    doi,
                    &metadata.related_identifiers,
                    self.include_pids,
                    &record_id,
                ),
            }),
            pids: self.include_pids.then(|| Pids {
                doi: PidEntry {
                    identifier: doi.to_string(),
                    provider: "external".to_string(),
                },
            }),
            kind: Some(COMMUNITY_SUBMISSION.to_string()),
        };

        let missing = self.missing_fields(&mapped);
        if !missing.is_empty() {
            return Err(RecordValidationError::new(record_id, missing).into());
        }

        Ok(mapped)
    }

    fn validate_mapped_record(&self, record: &MappedRecord) -> bool {
        self.missing_fields(record).is_empty()
    }

    fn mapping_schema(&self) -> MappingSchema {
        let mut required_fields = vec!["access".to_string(), "metadata".to_string()];
        if self.include_pids {
            required_fields.push("pids".to_string());
        }
        required_fields.extend(
            ["metadata.title", "metadata.creators", "metadata.resource_type"]
                .into_iter()
                .map(String::from),
        );

        MappingSchema {
            source_format: "zenodo".to_string(),
            target_format: "inveniordm".to_string(),
            version: MAPPING_VERSION.to_string(),
            required_fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MigratorError;
    use serde_json::{json, Value};

    fn source(value: Value) -> SourceRecord {
        SourceRecord::from_value(value).unwrap()
    }

    fn complete() -> SourceRecord {
        source(json!({
            "id": 123,
            "doi": "10.5281/zenodo.123",
            "metadata": {
                "title": "Test Record",
                "description": "A description",
                "publication_date": "2024-01-15",
                "creators": [
                    {"name": "Doe, John", "orcid": "0000-0002-1825-0097", "affiliation": "CERN"},
                    {"name": "Ali-MacLachlan"}
                ],
                "resource_type": {"type": "software"},
                "keywords": ["climate", "", null, "ocean"],
                "related_identifiers": [
                    {"identifier": "10.1/x", "scheme": "doi", "relation": "isCitedBy"},
                    {"identifier": "10.1/y", "scheme": "doi", "relation": "isfriendof"}
                ]
            }
        }))
    }

    #[test]
    fn test_map_complete_record() {
        let mapped = ZenodoToInvenioMapper::new(true).map_record(&complete()).unwrap();
        let value = serde_json::to_value(&mapped).unwrap();

        assert_eq!(value["access"], json!({"record": "public", "files": "public"}));
        assert_eq!(value["files"], json!({"enabled": true}));
        assert_eq!(value["type"], "community-submission");
        assert_eq!(
            value["pids"],
            json!({"doi": {"identifier": "10.5281/zenodo.123", "provider": "external"}})
        );

        let metadata = &value["metadata"];
        assert_eq!(metadata["title"], "Test Record");
        assert_eq!(metadata["resource_type"], json!({"id": "software"}));
        assert_eq!(metadata["publication_date"], "2024-01-15");
        assert_eq!(
            metadata["subjects"],
            json!([{"subject": "climate"}, {"subject": "ocean"}])
        );

        let creators = metadata["creators"].as_array().unwrap();
        assert_eq!(creators.len(), 2);
        assert_eq!(creators[0]["person_or_org"]["given_name"], "John");
        assert_eq!(creators[0]["affiliations"], json!([{"name": "CERN"}]));
        assert_eq!(creators[1]["person_or_org"]["given_name"], "");

        let related = metadata["related_identifiers"].as_array().unwrap();
        assert_eq!(related.len(), 2);
        assert_eq!(related[0]["identifier"], "10.5281/zenodo.123");
        assert_eq!(related[0]["relation_type"]["id"], "isderivedfrom");
        assert_eq!(related[1]["relation_type"]["id"], "iscitedby");
    }

    #[test]
    fn test_missing_doi_is_mapping_error() {
        let mut record = complete();
        record.doi = None;

        let err = ZenodoToInvenioMapper::new(true).map_record(&record).unwrap_err();
        match err {
            MigratorError::Mapping(e) => {
                assert_eq!(e.record_id, "123");
                assert_eq!(e.field.as_deref(), Some("doi"));
            }
            other => panic!("unexpected error: {other}"),
        }

        record.doi = Some("  ".to_string());
        let err = ZenodoToInvenioMapper::new(false).map_record(&record).unwrap_err();
        assert!(err.to_string().to_lowercase().contains("doi"));
    }

    #[test]
    fn test_malformed_record_is_mapping_error() {
        let record = SourceRecord::from_value_lossy(json!({
            "id": 2,
            "doi": "10.5281/zenodo.2",
            "metadata": {"title": "T", "creators": "nobody"}
        }));

        let err = ZenodoToInvenioMapper::new(true).map_record(&record).unwrap_err();
        match err {
            MigratorError::Mapping(e) => {
                assert_eq!(e.record_id, "2");
                assert!(e.field.is_none());
                assert!(e.reason.unwrap().starts_with("Malformed source record"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_pids_omitted_when_disabled() {
        let mapped = ZenodoToInvenioMapper::new(false).map_record(&complete()).unwrap();
        assert!(mapped.pids.is_none());

        let value = serde_json::to_value(&mapped).unwrap();
        assert!(value.get("pids").is_none());

        let related = value["metadata"]["related_identifiers"].as_array().unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0]["relation_type"]["id"], "iscitedby");
    }

    #[test]
    fn test_unknown_resource_type_defaults_to_dataset() {
        let record = source(json!({
            "id": 1,
            "doi": "10.1/a",
            "metadata": {"title": "T", "creators": [{"name": "A"}], "resource_type": {"type": "lesson"}}
        }));
        let mapped = ZenodoToInvenioMapper::new(true).map_record(&record).unwrap();
        assert_eq!(mapped.metadata.unwrap().resource_type.unwrap().id, "dataset");

        let record = source(json!({
            "id": 1,
            "doi": "10.1/a",
            "metadata": {"title": "T", "creators": [{"name": "A"}]}
        }));
        let mapped = ZenodoToInvenioMapper::new(true).map_record(&record).unwrap();
        assert_eq!(mapped.metadata.unwrap().resource_type.unwrap().id, "dataset");
    }

    #[test]
    fn test_validation_error_lists_every_field() {
        let record = source(json!({
            "id": 7,
            "doi": "10.1/a",
            "metadata": {"title": "   ", "creators": [{"name": ""}]}
        }));

        let err = ZenodoToInvenioMapper::new(true).map_record(&record).unwrap_err();
        match err {
            MigratorError::Validation(e) => {
                assert_eq!(e.record_id, "7");
                assert_eq!(
                    e.missing_fields,
                    vec!["metadata.title (empty)", "metadata.creators (empty)"]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_fields_on_partial_record() {
        let mapper = ZenodoToInvenioMapper::new(true);
        let empty = MappedRecord {
            access: None,
            files: None,
            metadata: None,
            pids: None,
            kind: None,
        };
        assert_eq!(mapper.missing_fields(&empty), vec!["access", "metadata", "pids"]);
        assert!(!mapper.validate_mapped_record(&empty));

        let no_metadata_fields = MappedRecord {
            access: Some(Access::public()),
            metadata: Some(MappedMetadata::default()),
            ..empty
        };
        assert_eq!(
            ZenodoToInvenioMapper::new(false).missing_fields(&no_metadata_fields),
            vec!["metadata.title", "metadata.creators", "metadata.resource_type"]
        );
    }

    #[test]
    fn test_validate_mapped_record_accepts_mapped_output() {
        let mapper = ZenodoToInvenioMapper::new(true);
        let mapped = mapper.map_record(&complete()).unwrap();
        assert!(mapper.validate_mapped_record(&mapped));

        let mut without_pids = mapped;
        without_pids.pids = None;
        assert!(!mapper.validate_mapped_record(&without_pids));
        assert!(ZenodoToInvenioMapper::new(false).validate_mapped_record(&without_pids));
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let mapper = ZenodoToInvenioMapper::new(true);
        let record = complete();
        assert_eq!(mapper.map_record(&record).unwrap(), mapper.map_record(&record).unwrap());
    }

    #[test]
    fn test_validate_source_record() {
        let mapper = ZenodoToInvenioMapper::new(true);
        assert!(mapper.validate_source_record(&complete()));
        assert!(!mapper.validate_source_record(&SourceRecord::default()));
    }

    #[test]
    fn test_mapping_schema() {
        let schema = ZenodoToInvenioMapper::new(true).mapping_schema();
        assert_eq!(schema.source_format, "zenodo");
        assert_eq!(schema.target_format, "inveniordm");
        assert_eq!(schema.version, "1.0");
        assert!(schema.required_fields.contains(&"pids".to_string()));

        let schema = ZenodoToInvenioMapper::new(false).mapping_schema();
        assert!(!schema.required_fields.contains(&"pids".to_string()));
    }
}
