//! InvenioRDM REST API payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field-level error embedded in an InvenioRDM response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: String,

    #[serde(default)]
    pub messages: Vec<String>,
}

impl FieldError {
    /// Renders as `field: msg1; msg2`
    pub fn describe(&self) -> String {
        let field = if self.field.is_empty() { "<record>" } else { &self.field };
        format!("{}: {}", field, self.messages.join("; "))
    }
}

/// Extracts a non-empty `errors` list from a response body
///
/// InvenioRDM can answer draft creation with a success status while still
/// reporting validation errors in the body.
pub fn embedded_errors(body: &Value) -> Option<Vec<FieldError>> {
    let errors = body.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }

    Some(
        errors
            .iter()
            .map(|e| {
                serde_json::from_value::<FieldError>(e.clone()).unwrap_or_else(|_| FieldError {
                    field: String::new(),
                    messages: vec![e.to_string()],
                })
            })
            .collect(),
    )
}

/// `{content, format}` note attached to request actions
#[derive(Debug, Clone, Serialize)]
pub struct ActionPayload<'a> {
    pub content: &'a str,
    pub format: &'static str,
}

/// Body of request actions (`submit-review`, `accept`)
#[derive(Debug, Clone, Serialize)]
pub struct ActionRequest<'a> {
    pub payload: ActionPayload<'a>,
}

impl<'a> ActionRequest<'a> {
    pub fn html(content: &'a str) -> Self {
        Self {
            payload: ActionPayload {
                content,
                format: "html",
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Receiver<'a> {
    pub community: &'a str,
}

/// Body of the community-submission review request
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRequest<'a> {
    pub receiver: Receiver<'a>,
    #[serde(rename = "type")]
    pub kind: &'static str,
}
