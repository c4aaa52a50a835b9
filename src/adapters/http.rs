//! Shared HTTP plumbing for the repository clients

use crate::config::SecretString;
use crate::domain::{ApiError, MigratorError, Result};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

/// Builds an HTTP client with the given timeout and TLS policy
pub(crate) fn build_client(timeout_seconds: u64, tls_verify: bool) -> Result<Client> {
    let mut builder = ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_seconds))
        .connect_timeout(Duration::from_secs(timeout_seconds.min(30)))
        .user_agent(concat!("invenio-migrator/", env!("CARGO_PKG_VERSION")));

    if !tls_verify {
        tracing::warn!("TLS certificate verification is disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| ApiError::request(format!("Failed to build HTTP client: {e}")).into())
}

/// Adds a bearer token when one is configured
pub(crate) fn with_bearer(request: RequestBuilder, token: Option<&SecretString>) -> RequestBuilder {
    match token {
        Some(token) => request.header(reqwest::header::AUTHORIZATION, token.expose_secret().bearer()),
        None => request,
    }
}

/// Sends a request, mapping transport failures and non-success statuses
pub(crate) async fn send(request: RequestBuilder, context: &str) -> Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::request(format!("{context}: {e}")))?;

    if response.status().is_success() {
        Ok(response)
    } else {
        Err(error_from_response(response, context).await.into())
    }
}

/// Parses a success response body as JSON; an empty body yields `Null`
pub(crate) async fn json_body(response: Response, context: &str) -> Result<Value> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::request(format!("{context}: failed to read response: {e}")))?;

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text).map_err(|e| {
        MigratorError::Api(ApiError::request(format!(
            "{context}: invalid JSON response: {e}"
        )))
    })
}

/// Converts a non-success response into an [`ApiError`]
///
/// 401 becomes an authentication failure. Any other status keeps the
/// parsed body when it is JSON.
pub(crate) async fn error_from_response(response: Response, context: &str) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<Value>(&text).ok();

    if status == StatusCode::UNAUTHORIZED {
        return ApiError::AuthenticationFailed(format!("{context}: invalid or expired API token"));
    }

    let detail = body
        .as_ref()
        .and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| text.chars().take(200).collect());

    let reason = status.canonical_reason().unwrap_or("HTTP error");
    let message = if detail.is_empty() {
        format!("{context}: {reason}")
    } else {
        format!("{context}: {reason}: {detail}")
    };

    ApiError::with_status(message, status.as_u16(), body)
}
