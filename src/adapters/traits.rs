//! Provider and consumer abstractions
//!
//! The migration service depends only on these traits, so the HTTP clients
//! can be swapped for in-memory doubles in tests.

use crate::domain::{CreatedRecord, MappedRecord, RecordId, Result, SourceRecord};
use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;

/// Per-call overrides of the provider's paging settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Records per page
    pub page_size: Option<usize>,

    /// Sort order
    pub sort: Option<String>,

    /// Include every version of each record
    pub all_versions: Option<bool>,
}

/// Read access to the source repository
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// Short name reported in status snapshots
    fn provider_type(&self) -> &'static str;

    /// Lazily enumerates records matching `query` (`*` when `None`)
    ///
    /// Each call returns a fresh stream. Pages are fetched only as the
    /// stream is polled and enumeration ends when a page has no next link.
    fn get_records(
        &self,
        query: Option<String>,
        options: QueryOptions,
    ) -> BoxStream<'_, Result<SourceRecord>>;

    /// Fetches one record; `Ok(None)` when the source reports it missing
    async fn get_record(&self, id: &RecordId) -> Result<Option<SourceRecord>>;

    /// Best-effort total of records matching `query`; 0 on any failure
    async fn get_record_count(&self, query: Option<&str>) -> u64;

    /// Probes the source; never fails
    async fn validate_connection(&self) -> bool;
}

/// Write access to the target repository
#[async_trait]
pub trait RecordConsumer: Send + Sync {
    /// Short name reported in status snapshots
    fn consumer_type(&self) -> &'static str;

    /// Creates a draft from a mapped record
    async fn create_record(&self, record: &MappedRecord) -> Result<CreatedRecord>;

    /// Registers a community-submission request for a draft
    async fn create_review_request(&self, draft_id: &str, community_id: &str) -> Result<Value>;

    /// Submits the draft's request for review with a note
    async fn submit_review(&self, draft_id: &str, content: &str) -> Result<Value>;

    /// Accepts a request (curator action)
    async fn accept_request(&self, request_id: &str, content: &str) -> Result<Value>;

    /// Fetches a record; `None` on any failure
    async fn get_record(&self, id: &str) -> Option<Value>;

    /// Probes the target; never fails
    async fn validate_connection(&self) -> bool;
}
