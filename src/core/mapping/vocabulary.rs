//! Controlled vocabularies used by the mapper

/// Relation types accepted by the target, with their English labels
pub const RELATION_TYPES: &[(&str, &str)] = &[
    ("cites", "Cites"),
    ("compiles", "Compiles"),
    ("continues", "Continues"),
    ("describes", "Describes"),
    ("documents", "Documents"),
    ("hasmetadata", "Has metadata"),
    ("haspart", "Has part"),
    ("hasversion", "Has version"),
    ("isalternateidentifier", "Is alternate identifier"),
    ("iscitedby", "Is cited by"),
    ("iscompiledby", "Is compiled by"),
    ("iscontinuedby", "Is continued by"),
    ("isderivedfrom", "Is derived from"),
    ("isdescribedby", "Is described by"),
    ("isdocumentedby", "Is documented by"),
    ("isidenticalto", "Is identical to"),
    ("ismetadatafor", "Is metadata for"),
    ("isnewversionof", "Is new version of"),
    ("isobsoletedby", "Is obsoleted by"),
    ("isoriginalformof", "Is original form of"),
    ("ispartof", "Is part of"),
    ("ispreviousversionof", "Is previous version of"),
    ("ispublishedin", "Is published in"),
    ("isreferencedby", "Is referenced by"),
    ("isrequiredby", "Is required by"),
    ("isreviewedby", "Is reviewed by"),
    ("issourceof", "Is source of"),
    ("issupplementedby", "Is supplemented by"),
    ("issupplementto", "Is supplement to"),
    ("isvariantformof", "Is variant form of"),
    ("isversionof", "Is version of"),
    ("obsoletes", "Obsoletes"),
    ("references", "References"),
    ("requires", "Requires"),
    ("reviews", "Reviews"),
];

/// Source resource types carried over unchanged; anything else maps to [`DEFAULT_RESOURCE_TYPE`]
pub const RESOURCE_TYPES: &[&str] = &[
    "dataset",
    "publication-article",
    "presentation",
    "software",
    "poster",
    "image",
];

pub const DEFAULT_RESOURCE_TYPE: &str = "dataset";

/// Relation id of the link back to the source DOI
pub const DERIVED_FROM: &str = "isderivedfrom";

/// English label for a relation type id
pub fn relation_label(id: &str) -> Option<&'static str> {
    RELATION_TYPES
        .binary_search_by(|(key, _)| (*key).cmp(id))
        .ok()
        .map(|i| RELATION_TYPES[i].1)
}

/// Target resource type id for a source type tag
///
/// Unknown or missing tags fall back to `dataset`.
pub fn resource_type_id(source_type: Option<&str>) -> &'static str {
    source_type
        .and_then(|t| RESOURCE_TYPES.iter().find(|known| **known == t))
        .copied()
        .unwrap_or(DEFAULT_RESOURCE_TYPE)
}
