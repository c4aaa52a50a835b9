//! Zenodo REST API client
//!
//! Paginated, community-scoped read access to `/records`. Every request is
//! preceded by the configured fixed delay to stay inside the source's
//! request budget.

use super::models::SearchPage;
use crate::adapters::http;
use crate::adapters::traits::{QueryOptions, RecordProvider};
use crate::config::SourceConfig;
use crate::domain::{MigratorError, RecordId, Result, SourceRecord};
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::{self, BoxStream, StreamExt};
use reqwest::Client;
use std::collections::VecDeque;
use std::time::Duration;

const DEFAULT_QUERY: &str = "*";

/// Source provider backed by a Zenodo-style `/records` API
///
/// # Example
///
/// ```no_run
/// use futures::TryStreamExt;
/// use invenio_migrator::adapters::traits::{QueryOptions, RecordProvider};
/// use invenio_migrator::adapters::zenodo::ZenodoClient;
/// use invenio_migrator::config::SourceConfig;
///
/// # async fn example() -> invenio_migrator::domain::Result<()> {
/// let config = SourceConfig {
///     community_id: "my-community".to_string(),
///     ..SourceConfig::default()
/// };
/// let client = ZenodoClient::new(&config)?;
///
/// let mut records = client.get_records(None, QueryOptions::default());
/// while let Some(record) = records.try_next().await? {
///     println!("{}", record.display_id());
/// }
/// # Ok(())
/// # }
/// ```
pub struct ZenodoClient {
    base_url: String,
    client: Client,
    config: SourceConfig,
    date_window: (Option<NaiveDate>, Option<NaiveDate>),
}

/// Where the next page comes from
enum NextPage {
    /// First page, built from search parameters
    Search(Vec<(&'static str, String)>),
    /// Server-supplied link, parameters already embedded
    Link(String),
    Done,
}

struct Cursor {
    buffered: VecDeque<serde_json::Value>,
    next: NextPage,
}

impl ZenodoClient {
    /// Creates a client from source configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = http::build_client(config.timeout_seconds, config.tls_verify)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            date_window: config.date_window(),
            config: config.clone(),
        })
    }

    fn records_url(&self) -> String {
        format!("{}/records", self.base_url)
    }

    fn search_params(
        &self,
        query: Option<&str>,
        options: &QueryOptions,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("q", query.unwrap_or(DEFAULT_QUERY).to_string()),
            ("communities", self.config.community_id.clone()),
            (
                "size",
                options.page_size.unwrap_or(self.config.page_size).to_string(),
            ),
            (
                "sort",
                options
                    .sort
                    .clone()
                    .unwrap_or_else(|| self.config.sort.clone()),
            ),
            (
                "all_versions",
                options
                    .all_versions
                    .unwrap_or(self.config.all_versions)
                    .to_string(),
            ),
        ]
    }

    /// Issues one GET after the configured delay and parses the JSON body
    async fn get_json(
        &self,
        url: &str,
        params: Option<&[(&'static str, String)]>,
    ) -> Result<serde_json::Value> {
        if self.config.request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.request_delay_ms)).await;
        }

        let mut request = self.client.get(url);
        if let Some(params) = params {
            request = request.query(params);
        }
        let request = http::with_bearer(request, self.config.api_token.as_ref());

        tracing::debug!(url = %url, "Requesting source records");
        let response = http::send(request, "Source request failed").await?;
        http::json_body(response, "Source request failed").await
    }

    async fn get_page(
        &self,
        url: &str,
        params: Option<&[(&'static str, String)]>,
    ) -> Result<SearchPage> {
        let body = self.get_json(url, params).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// True when the record's publication date falls inside the window
    ///
    /// Records without a parseable date are kept.
    fn in_date_window(&self, record: &SourceRecord) -> bool {
        let (start, end) = self.date_window;
        if start.is_none() && end.is_none() {
            return true;
        }

        let Some(raw) = record.metadata.publication_date.as_deref() else {
            return true;
        };

        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e),
            Err(_) => {
                tracing::debug!(
                    record_id = %record.display_id(),
                    publication_date = %raw,
                    "Unparseable publication date, keeping record"
                );
                true
            }
        }
    }
}

#[async_trait]
impl RecordProvider for ZenodoClient {
    fn provider_type(&self) -> &'static str {
        "zenodo"
    }

    fn get_records(
        &self,
        query: Option<String>,
        options: QueryOptions,
    ) -> BoxStream<'_, Result<SourceRecord>> {
        let url = self.records_url();
        let params = self.search_params(query.as_deref(), &options);
        let cursor = Cursor {
            buffered: VecDeque::new(),
            next: NextPage::Search(params),
        };

        stream::try_unfold(cursor, move |mut cursor| {
            let url = url.clone();
            async move {
                loop {
                    if let Some(hit) = cursor.buffered.pop_front() {
                        let record = SourceRecord::from_value_lossy(hit);
                        if let Some(reason) = &record.malformed {
                            tracing::warn!(
                                record_id = %record.display_id(),
                                error = %reason,
                                "Source record does not match the expected schema"
                            );
                        }
                        if !self.in_date_window(&record) {
                            tracing::debug!(
                                record_id = %record.display_id(),
                                "Skipping record outside date range"
                            );
                            continue;
                        }
                        return Ok::<_, MigratorError>(Some((record, cursor)));
                    }

                    let page = match std::mem::replace(&mut cursor.next, NextPage::Done) {
                        NextPage::Done => return Ok(None),
                        NextPage::Search(params) => self.get_page(&url, Some(params.as_slice())).await?,
                        NextPage::Link(link) => self.get_page(&link, None).await?,
                    };

                    tracing::debug!(
                        hits = page.hits.hits.len(),
                        has_next = page.links.next.is_some(),
                        "Fetched page of source records"
                    );

                    cursor.buffered = page.hits.hits.into();
                    cursor.next = page
                        .links
                        .next
                        .map(NextPage::Link)
                        .unwrap_or(NextPage::Done);
                }
            }
        })
        .boxed()
    }

    async fn get_record(&self, id: &RecordId) -> Result<Option<SourceRecord>> {
        let url = format!("{}/{}", self.records_url(), id);

        match self.get_json(&url, None).await {
            Ok(body) => Ok(Some(SourceRecord::from_value_lossy(body))),
            Err(MigratorError::Api(e)) if e.status() == Some(404) => {
                tracing::info!(record_id = %id, "Source record not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn get_record_count(&self, query: Option<&str>) -> u64 {
        let options = QueryOptions {
            page_size: Some(1),
            ..QueryOptions::default()
        };
        let params = self.search_params(query, &options);

        match self.get_page(&self.records_url(), Some(params.as_slice())).await {
            Ok(page) => page.hits.total,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to get record count");
                0
            }
        }
    }

    async fn validate_connection(&self) -> bool {
        let options = QueryOptions {
            page_size: Some(1),
            ..QueryOptions::default()
        };
        let params = self.search_params(None, &options);

        match self.get_json(&self.records_url(), Some(params.as_slice())).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Source connection check failed");
                false
            }
        }
    }
}
