//! InvenioRDM REST API client
//!
//! Creates drafts and drives the community-submission workflow
//! (review request, submit for review, accept). Every write goes through
//! [`retry_with_backoff`], so rate-limited calls are retried with
//! exponential backoff.

use super::models::{embedded_errors, ActionRequest, Receiver, ReviewRequest};
use crate::adapters::http;
use crate::adapters::retry::{retry_with_backoff, RetryPolicy};
use crate::adapters::traits::RecordConsumer;
use crate::config::{SecretString, TargetConfig};
use crate::domain::{
    ApiError, CreatedRecord, MappedRecord, MigratorError, Result, COMMUNITY_SUBMISSION,
};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Target consumer backed by the InvenioRDM REST API
pub struct InvenioClient {
    base_url: String,
    client: Client,
    token: SecretString,
    request_delay: Duration,
    retry: RetryPolicy,
}

impl InvenioClient {
    /// Creates a client from target configuration
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error when no API token is configured,
    /// or an API error if the HTTP client cannot be built.
    pub fn new(config: &TargetConfig) -> Result<Self> {
        let token = match &config.api_token {
            Some(token) if !token.expose_secret().is_empty() => token.clone(),
            _ => {
                return Err(MigratorError::configuration(
                    "target.api_token",
                    "TARGET_API_TOKEN is required",
                ))
            }
        };

        let client = http::build_client(config.timeout_seconds, config.tls_verify)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            token,
            request_delay: Duration::from_millis(config.request_delay_ms),
            retry: RetryPolicy::from_config(config),
        })
    }

    /// Replaces the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn pause(&self) {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
    }

    /// Sends one JSON request and checks the body for embedded errors
    async fn request<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        context: &str,
    ) -> Result<Value> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let request = http::with_bearer(request, Some(&self.token));

        let response = http::send(request, context).await?;
        let status = response.status().as_u16();
        let body = http::json_body(response, context).await?;

        if let Some(errors) = embedded_errors(&body) {
            let details: Vec<String> = errors.iter().map(|e| e.describe()).collect();
            return Err(ApiError::with_status(
                format!("{context}: validation errors: {}", details.join(", ")),
                status,
                Some(body),
            )
            .into());
        }

        Ok(body)
    }

    /// Sends a request under the retry policy
    async fn request_with_retry<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        context: &str,
    ) -> Result<Value> {
        retry_with_backoff(&self.retry, || {
            self.request(method.clone(), path, body, context)
        })
        .await
    }
}

#[async_trait]
impl RecordConsumer for InvenioClient {
    fn consumer_type(&self) -> &'static str {
        "inveniordm"
    }

    async fn create_record(&self, record: &MappedRecord) -> Result<CreatedRecord> {
        let body = self
            .request_with_retry(Method::POST, "records", Some(record), "Failed to create record")
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Draft creation failed");
                e
            })?;

        let created: CreatedRecord = serde_json::from_value(body).map_err(|e| {
            ApiError::request(format!("Failed to create record: unexpected response: {e}"))
        })?;

        tracing::debug!(draft_id = %created.id, "Draft created");
        Ok(created)
    }

    async fn create_review_request(&self, draft_id: &str, community_id: &str) -> Result<Value> {
        self.pause().await;

        let body = ReviewRequest {
            receiver: Receiver {
                community: community_id,
            },
            kind: COMMUNITY_SUBMISSION,
        };
        let response = self
            .request_with_retry(
                Method::PUT,
                &format!("records/{draft_id}/draft/review"),
                Some(&body),
                "Failed to create review request",
            )
            .await?;

        tracing::debug!(draft_id = %draft_id, community_id = %community_id, "Review request created");
        Ok(response)
    }

    async fn submit_review(&self, draft_id: &str, content: &str) -> Result<Value> {
        self.pause().await;

        let response = self
            .request_with_retry(
                Method::POST,
                &format!("records/{draft_id}/draft/actions/submit-review"),
                Some(&ActionRequest::html(content)),
                "Failed to submit review",
            )
            .await?;

        tracing::debug!(draft_id = %draft_id, "Review submitted");
        Ok(response)
    }

    async fn accept_request(&self, request_id: &str, content: &str) -> Result<Value> {
        self.pause().await;

        let response = self
            .request_with_retry(
                Method::POST,
                &format!("requests/{request_id}/actions/accept"),
                Some(&ActionRequest::html(content)),
                "Failed to accept request",
            )
            .await?;

        tracing::info!(request_id = %request_id, "Request accepted");
        Ok(response)
    }

    async fn get_record(&self, id: &str) -> Option<Value> {
        match self
            .request::<Value>(Method::GET, &format!("records/{id}"), None, "Failed to get record")
            .await
        {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::error!(record_id = %id, error = %e, "Failed to get target record");
                None
            }
        }
    }

    async fn validate_connection(&self) -> bool {
        let request = http::with_bearer(self.client.get(self.url("")), Some(&self.token));

        match request.send().await {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "Target connection check failed");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Target connection check failed");
                false
            }
        }
    }
}
