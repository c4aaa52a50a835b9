//! Identifier types
//!
//! Source repositories hand out record ids either as JSON numbers
//! (`15411009`) or strings (`"abcd-1234"`). Both are normalised into
//! [`RecordId`], which always renders as a string.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use invenio_migrator::domain::ids::RecordId;
/// use std::str::FromStr;
///
/// let id = RecordId::from_str("15411009").unwrap();
/// assert_eq!(id.as_str(), "15411009");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new RecordId, rejecting blank input
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Record ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the record ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => RecordId::new(s).map_err(serde::de::Error::custom),
            Raw::Number(n) => Ok(RecordId(n.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_rejects_blank() {
        assert!(RecordId::new("").is_err());
        assert!(RecordId::new("   ").is_err());
    }

    #[test]
    fn test_record_id_from_str_trims() {
        let id = RecordId::from_str(" 123 ").unwrap();
        assert_eq!(id.as_str(), "123");
    }

    #[test]
    fn test_record_id_deserializes_number_and_string() {
        let numeric: RecordId = serde_json::from_str("15411009").unwrap();
        let textual: RecordId = serde_json::from_str("\"abc-1\"").unwrap();

        assert_eq!(numeric.as_str(), "15411009");
        assert_eq!(textual.to_string(), "abc-1");
    }

    #[test]
    fn test_record_id_serializes_as_string() {
        let id = RecordId::new("42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }
}
