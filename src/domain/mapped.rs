//! Target-side record model
//!
//! [`MappedRecord`] is the draft payload sent to the InvenioRDM records
//! endpoint. Required parts are `Option` so that a hand-built or partially
//! assembled record can still be validated and reported field by field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request type tag carried by every mapped record
pub const COMMUNITY_SUBMISSION: &str = "community-submission";

/// Draft record in the target schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FilesOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MappedMetadata>,

    /// Persistent identifiers, absent when PIDs are not migrated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pids: Option<Pids>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl MappedRecord {
    /// Enables or disables file upload on the draft
    pub fn set_files_enabled(&mut self, enabled: bool) {
        self.files = Some(FilesOptions { enabled });
    }

    /// Title, if present
    pub fn title(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.title.as_deref())
    }
}

/// Visibility of the record and its files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access {
    pub record: String,
    pub files: String,
}

impl Access {
    /// Public record with public files
    pub fn public() -> Self {
        Self {
            record: "public".to_string(),
            files: "public".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesOptions {
    pub enabled: bool,
}

/// Metadata block of a mapped record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappedMetadata {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceTypeRef>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creators: Option<Vec<CreatorEntry>>,

    #[serde(default)]
    pub publication_date: Option<String>,

    #[serde(default)]
    pub subjects: Vec<Subject>,

    #[serde(default)]
    pub related_identifiers: Vec<RelatedIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTypeRef {
    pub id: String,
}

/// Creator in the target schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorEntry {
    pub person_or_org: PersonOrOrg,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliations: Option<Vec<Affiliation>>,
}

/// Person part of a creator entry
///
/// `given_name` is always serialized as a string, `""` when the name
/// has no given part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonOrOrg {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub family_name: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<Vec<Identifier>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub identifier: String,
    pub scheme: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub subject: String,
}

/// English label of a vocabulary term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedTitle {
    pub en: String,
}

/// Vocabulary term with a human-readable label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyTerm {
    pub id: String,
    pub title: LocalizedTitle,
}

impl VocabularyTerm {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: LocalizedTitle { en: label.into() },
        }
    }
}

/// Resource type of a related identifier
///
/// Bare strings from the source are normalised into [`VocabularyTerm`];
/// any other shape is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelatedResourceType {
    Term(VocabularyTerm),
    Other(Value),
}

/// Related identifier in the target schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedIdentifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    pub relation_type: VocabularyTerm,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<RelatedResourceType>,

    /// Other fields copied from the source entry
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pids {
    pub doi: PidEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PidEntry {
    pub identifier: String,
    pub provider: String,
}

/// Draft as acknowledged by the target repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedRecord {
    /// Identifier assigned by the target
    pub id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
