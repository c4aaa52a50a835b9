//! Zenodo REST API response models

use serde::Deserialize;
use serde_json::Value;

/// One page of a `/records` search
#[derive(Debug, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub hits: SearchHits,

    #[serde(default)]
    pub links: PageLinks,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchHits {
    /// Raw record hits; converted to `SourceRecord` one at a time
    #[serde(default)]
    pub hits: Vec<Value>,

    #[serde(default, deserialize_with = "deserialize_total")]
    pub total: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageLinks {
    /// Absolute URL of the next page, query included
    #[serde(default)]
    pub next: Option<String>,
}

// Accepts both `"total": 12` and `"total": {"value": 12}`
fn deserialize_total<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::Object(map)) => map.get("value").and_then(Value::as_u64).unwrap_or(0),
        _ => 0,
    })
}
