//! Creator mapping and name splitting

use crate::domain::{
    Affiliation, CreatorEntry, Identifier, PersonOrOrg, RecordMappingError, SourceCreator,
};

/// A personal name split into family and given parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitName {
    pub family: String,
    /// Never absent; empty when the name has no given part
    pub given: String,
}

/// Splits a display name into family and given parts
///
/// - `"Family, Given"`: split on the first comma, both sides trimmed.
/// - Otherwise whitespace tokens: the last token is the family name and
///   the rest, joined by single spaces, the given name.
/// - A single token is the family name with an empty given name.
///
/// Returns `None` when the name is blank.
pub fn split_name(full_name: &str) -> Option<SplitName> {
    let full_name = full_name.trim();
    if full_name.is_empty() {
        return None;
    }

    if let Some((family, given)) = full_name.split_once(',') {
        return Some(SplitName {
            family: family.trim().to_string(),
            given: given.trim().to_string(),
        });
    }

    let mut tokens: Vec<&str> = full_name.split_whitespace().collect();
    let family = tokens.pop().unwrap_or_default().to_string();

    Some(SplitName {
        family,
        given: tokens.join(" "),
    })
}

/// Maps one source creator
///
/// # Errors
///
/// Fails when the name is missing or blank.
pub fn map_creator(
    creator: &SourceCreator,
    record_id: &str,
) -> Result<CreatorEntry, RecordMappingError> {
    let full_name = creator.name.as_deref().unwrap_or_default().trim();
    let split = split_name(full_name).ok_or_else(|| {
        RecordMappingError::new(record_id)
            .with_field("creator.name")
            .with_reason("Empty name")
    })?;

    let identifiers = non_blank(creator.orcid.as_deref()).map(|orcid| {
        vec![Identifier {
            identifier: orcid.to_string(),
            scheme: "orcid".to_string(),
        }]
    });

    let affiliations = non_blank(creator.affiliation.as_deref()).map(|name| {
        vec![Affiliation {
            name: name.to_string(),
        }]
    });

    Ok(CreatorEntry {
        person_or_org: PersonOrOrg {
            kind: "personal".to_string(),
            name: full_name.to_string(),
            family_name: split.family,
            given_name: split.given,
            identifiers,
        },
        affiliations,
    })
}

/// Maps every creator, dropping the ones that fail with a warning
pub fn map_creators(creators: &[SourceCreator], record_id: &str) -> Vec<CreatorEntry> {
    creators
        .iter()
        .filter_map(|creator| match map_creator(creator, record_id) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(record_id = %record_id, error = %e, "Skipping creator");
                None
            }
        })
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
