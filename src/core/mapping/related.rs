//! Related identifier mapping

use super::vocabulary::{relation_label, DERIVED_FROM};
use crate::domain::{RelatedIdentifier, RelatedResourceType, VocabularyTerm};
use serde_json::Value;

/// Entry linking a migrated record back to its source DOI
pub fn source_doi_entry(doi: &str) -> RelatedIdentifier {
    RelatedIdentifier {
        scheme: Some("doi".to_string()),
        identifier: Some(doi.to_string()),
        relation_type: VocabularyTerm::new(
            DERIVED_FROM,
            relation_label(DERIVED_FROM).unwrap_or("Is derived from"),
        ),
        resource_type: Some(RelatedResourceType::Term(VocabularyTerm::new(
            "publication",
            "Publication",
        ))),
        extra: serde_json::Map::new(),
    }
}

/// Relation type id of a source entry, lowercased
///
/// The legacy `relation` field wins over `relation_type`, which may be a
/// bare string or an object with an `id`.
fn relation_id(item: &serde_json::Map<String, Value>) -> Option<String> {
    if let Some(relation) = item.get("relation") {
        return relation.as_str().map(str::to_lowercase);
    }

    match item.get("relation_type")? {
        Value::String(id) => Some(id.to_lowercase()),
        Value::Object(term) => term.get("id").and_then(Value::as_str).map(str::to_lowercase),
        _ => None,
    }
}

/// `"journal_article"` becomes `"Journal article"`
fn titleize(id: &str) -> String {
    let spaced = id.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Maps one source related-identifier entry
///
/// Returns `None` when the entry is not an object or its relation type is
/// outside the known vocabulary. Unknown fields are carried over.
pub fn map_related_identifier(item: &Value) -> Option<RelatedIdentifier> {
    let object = item.as_object()?;
    let relation = relation_id(object)?;
    let label = relation_label(&relation)?;

    let mut extra = object.clone();
    extra.remove("relation");
    extra.remove("relation_type");

    let scheme = extra.remove("scheme").and_then(|v| v.as_str().map(str::to_string));
    let identifier = extra
        .remove("identifier")
        .and_then(|v| v.as_str().map(str::to_string));

    let resource_type = extra.remove("resource_type").map(|value| match value {
        Value::String(id) => {
            let id = id.to_lowercase();
            let label = titleize(&id);
            RelatedResourceType::Term(VocabularyTerm::new(id, label))
        }
        other => serde_json::from_value(other.clone())
            .map(RelatedResourceType::Term)
            .unwrap_or(RelatedResourceType::Other(other)),
    });

    Some(RelatedIdentifier {
        scheme,
        identifier,
        relation_type: VocabularyTerm::new(relation, label),
        resource_type,
        extra,
    })
}

/// Maps the related identifiers of a record
///
/// With `include_source_doi` the link back to `doi` comes first.
/// Entries that cannot be mapped are dropped with a warning.
pub fn map_related_identifiers(
    doi: &str,
    items: &[Value],
    include_source_doi: bool,
    record_id: &str,
) -> Vec<RelatedIdentifier> {
    let mut related = Vec::with_capacity(items.len() + 1);
    if include_source_doi {
        related.push(source_doi_entry(doi));
    }

    for item in items {
        match map_related_identifier(item) {
            Some(mapped) => related.push(mapped),
            None => tracing::warn!(
                record_id = %record_id,
                item = %item,
                "Dropping related identifier with unknown relation type"
            ),
        }
    }

    related
}
