//! Source record model
//!
//! Records read from the source repository. Only the fields the mapper
//! reads are typed; everything else is carried through `extra` so that a
//! record can be written back out unchanged in preview dumps.

use super::ids::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// A record as returned by the source repository
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Source identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    /// Persistent identifier, required for mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    /// Descriptive metadata
    #[serde(default, skip_serializing_if = "SourceMetadata::is_empty")]
    pub metadata: SourceMetadata,

    /// Fields not read by the mapper
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Why the raw hit did not fit this model, see [`SourceRecord::from_value_lossy`]
    #[serde(skip)]
    pub malformed: Option<String>,
}

impl SourceRecord {
    /// Builds a record from a raw JSON hit; `null` becomes an empty record
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
    }

    /// Builds a record from a raw hit without failing
    ///
    /// A hit that does not fit the typed model keeps its readable `id` and
    /// `doi`, carries every other field in `extra` and records the parse
    /// error in `malformed`, so that the mapper rejects just this record.
    pub fn from_value_lossy(value: Value) -> Self {
        if value.is_null() {
            return Self::default();
        }

        let error = match Self::deserialize(&value) {
            Ok(record) => return record,
            Err(e) => e.to_string(),
        };

        let mut extra = match value {
            Value::Object(map) => map,
            other => Map::from_iter([("value".to_string(), other)]),
        };
        let id = extra.remove("id").and_then(|raw| match raw {
            Value::String(s) => RecordId::from_str(&s).ok(),
            Value::Number(n) => RecordId::new(n.to_string()).ok(),
            _ => None,
        });
        let doi = extra
            .remove("doi")
            .and_then(|raw| raw.as_str().map(str::to_string));

        Self {
            id,
            doi,
            metadata: SourceMetadata::default(),
            extra,
            malformed: Some(error),
        }
    }

    /// True when the record carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.doi.is_none()
            && self.metadata.is_empty()
            && self.extra.is_empty()
            && self.malformed.is_none()
    }

    /// Identifier for log lines and error reports
    pub fn display_id(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Metadata block of a source record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<SourceCreator>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<SourceResourceType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Publication date, usually `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,

    /// Free-text keywords; null entries are tolerated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<Option<String>>,

    /// Related identifiers in whatever shape the source produced
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_identifiers: Vec<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SourceMetadata {
    /// True when no metadata field is present
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.creators.is_empty()
            && self.resource_type.is_none()
            && self.description.is_none()
            && self.publication_date.is_none()
            && self.keywords.is_empty()
            && self.related_identifiers.is_empty()
            && self.extra.is_empty()
    }
}

/// Creator entry on a source record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceCreator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SourceCreator {
    /// Creates a creator with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Resource type tag on a source record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceResourceType {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
