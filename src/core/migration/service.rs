//! Migration service - orchestrates provider, mapper and consumer
//!
//! Records are pulled one at a time from the provider's stream, mapped and
//! submitted in provider order. Per-record failures are collected in a
//! [`MigrationBatchResult`]; with `stop_on_error` the first failure aborts
//! the run and the stream is simply not polled again.

use super::preview::PreviewEntry;
use super::summary::MigrationBatchResult;
use crate::adapters::traits::{QueryOptions, RecordConsumer, RecordProvider};
use crate::config::MigratorConfig;
use crate::core::mapping::{MappingSchema, RecordMapper};
use crate::domain::{
    ApiError, CreatedRecord, MappedRecord, MigrationError, MigratorError, RecordId, Result,
    SourceRecord,
};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Run-wide settings of the migration service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Abort the batch on the first failed record
    pub stop_on_error: bool,

    /// Community receiving review requests; no submission when `None`
    pub community_id: Option<String>,

    /// Note attached to review submissions
    pub review_content: String,

    /// Stop after this many records
    pub max_records: Option<usize>,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            stop_on_error: false,
            community_id: None,
            review_content: "Auto-migrated record".to_string(),
            max_records: None,
        }
    }
}

impl MigrationOptions {
    pub fn from_config(config: &MigratorConfig) -> Self {
        Self {
            stop_on_error: config.migration.stop_on_error,
            community_id: config.target.community_id.clone(),
            review_content: config.migration.review_content.clone(),
            max_records: config.migration.max_records,
        }
    }
}

/// Which records a run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSelection {
    /// Every record matching the query, `*` when `None`
    Query(Option<String>),
    /// Explicit ids, fetched one by one
    Ids(Vec<RecordId>),
}

impl Default for RecordSelection {
    fn default() -> Self {
        Self::Query(None)
    }
}

impl RecordSelection {
    fn describe(&self) -> String {
        match self {
            Self::Query(query) => query.clone().unwrap_or_else(|| "*".to_string()),
            Self::Ids(ids) => format!("{} record ids", ids.len()),
        }
    }
}

/// Parameters of one `migrate_records` run
#[derive(Debug, Clone, Default)]
pub struct MigrateRequest {
    pub dry_run: bool,
    pub selection: RecordSelection,
    pub include_files: bool,
}

/// Result of migrating one record by id
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SingleRecordOutcome {
    /// Dry run: the draft that would have been submitted
    Mapped(Box<MappedRecord>),
    /// The draft created on the target
    Created(CreatedRecord),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentStatus {
    #[serde(rename = "type")]
    pub kind: String,
    pub connection: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapperStatus {
    #[serde(rename = "type")]
    pub kind: String,
    pub schema: MappingSchema,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusConfig {
    pub stop_on_error: bool,
}

/// Connectivity and configuration snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub provider: ComponentStatus,
    pub consumer: ComponentStatus,
    pub mapper: MapperStatus,
    pub config: StatusConfig,
}

/// What happened to one record of a batch
enum RecordOutcome {
    Skipped,
    Mapped,
    Created,
}

/// Migration service
pub struct MigrationService {
    provider: Arc<dyn RecordProvider>,
    consumer: Arc<dyn RecordConsumer>,
    mapper: Arc<dyn RecordMapper>,
    options: MigrationOptions,
}

impl MigrationService {
    pub fn new(
        provider: Arc<dyn RecordProvider>,
        consumer: Arc<dyn RecordConsumer>,
        mapper: Arc<dyn RecordMapper>,
        options: MigrationOptions,
    ) -> Self {
        Self {
            provider,
            consumer,
            mapper,
            options,
        }
    }

    /// Stream of the selected source records, capped at `max_records`
    fn select_records(&self, selection: &RecordSelection) -> BoxStream<'_, Result<SourceRecord>> {
        let records = match selection {
            RecordSelection::Query(query) => self
                .provider
                .get_records(query.clone(), QueryOptions::default()),
            RecordSelection::Ids(ids) => stream::iter(ids.clone())
                .filter_map(move |id| async move {
                    match self.provider.get_record(&id).await {
                        Ok(Some(record)) => Some(Ok(record)),
                        Ok(None) => {
                            tracing::warn!(record_id = %id, "Record not found, skipping");
                            None
                        }
                        Err(e) => Some(Err(e)),
                    }
                })
                .boxed(),
        };

        match self.options.max_records {
            Some(max) => records.take(max).boxed(),
            None => records,
        }
    }

    /// Migrates the selected records
    ///
    /// Empty records are skipped. Mapping and validation failures, and
    /// target failures of a single record, are recorded and the run goes on
    /// unless `stop_on_error` is set.
    ///
    /// # Errors
    ///
    /// A [`MigrationError`] carrying every failure so far when
    /// `stop_on_error` aborts the run, when the provider fails, when target
    /// retries are exhausted or when the target rejects the credentials.
    pub async fn migrate_records(&self, request: &MigrateRequest) -> Result<MigrationBatchResult> {
        let start_time = Instant::now();
        let mut result = MigrationBatchResult::new();

        crate::log_migration_start!(request.selection.describe(), request.dry_run);

        let mut records = self.select_records(&request.selection);

        loop {
            let record = match records.try_next().await {
                Ok(Some(record)) => record,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to fetch source records");
                    return Err(abort(format!("Migration failed: {e}"), result));
                }
            };

            let record_id = record.display_id();

            match self.migrate_one(&record, request).await {
                Ok(RecordOutcome::Skipped) => result.skipped_count += 1,
                Ok(RecordOutcome::Mapped) | Ok(RecordOutcome::Created) => result.record_success(),
                Err(e) if e.is_record_error() => {
                    tracing::warn!(record_id = %record_id, error = %e, "Failed to process record");
                    result.record_failure(&record_id, e.to_string());

                    if self.options.stop_on_error {
                        return Err(abort(
                            format!("Migration stopped due to error in record {record_id}"),
                            result,
                        ));
                    }
                }
                Err(e) if is_fatal(&e) => {
                    crate::log_error_with_context!(e, "Target rejected the migration");
                    result.record_failure(&record_id, e.to_string());
                    return Err(abort(format!("Migration failed: {e}"), result));
                }
                Err(e) => {
                    tracing::error!(record_id = %record_id, error = %e, "Unexpected error processing record");
                    result.record_failure(&record_id, e.to_string());

                    if self.options.stop_on_error {
                        return Err(abort(
                            format!("Migration stopped due to unexpected error in record {record_id}"),
                            result,
                        ));
                    }
                }
            }
        }

        let result = result.with_duration(start_time.elapsed());
        result.log_summary();
        Ok(result)
    }

    async fn migrate_one(
        &self,
        record: &SourceRecord,
        request: &MigrateRequest,
    ) -> Result<RecordOutcome> {
        if !self.mapper.validate_source_record(record) {
            tracing::warn!("Empty record encountered, skipping");
            return Ok(RecordOutcome::Skipped);
        }

        let record_id = record.display_id();
        let mut mapped = self.mapper.map_record(record)?;
        mapped.set_files_enabled(request.include_files);

        if request.dry_run {
            tracing::info!(record_id = %record_id, "[DRY RUN] Would migrate record");
            tracing::debug!(record_id = %record_id, title = ?mapped.title(), "Mapped record");
            return Ok(RecordOutcome::Mapped);
        }

        let created = self.consumer.create_record(&mapped).await?;
        self.submit_to_community(&created).await;

        crate::log_record_migrated!(record_id, created.id);
        Ok(RecordOutcome::Created)
    }

    /// Runs the review workflow for a new draft; failures are only logged
    async fn submit_to_community(&self, created: &CreatedRecord) {
        let Some(community_id) = self.options.community_id.as_deref() else {
            tracing::warn!("No community ID configured, skipping community submission");
            return;
        };

        let draft_id = created.id.as_str();
        if draft_id.is_empty() {
            tracing::warn!("No draft ID found in created record");
            return;
        }

        let submission = match self
            .consumer
            .create_review_request(draft_id, community_id)
            .await
        {
            Ok(_) => {
                self.consumer
                    .submit_review(draft_id, &self.options.review_content)
                    .await
            }
            Err(e) => Err(e),
        };

        match submission {
            Ok(_) => tracing::debug!(draft_id = %draft_id, "Community submission completed"),
            Err(e) => tracing::warn!(draft_id = %draft_id, error = %e, "Community submission failed"),
        }
    }

    /// Migrates one record by id
    ///
    /// Returns `Ok(None)` when the source has no such record. A dry run
    /// returns the mapped draft without submitting it.
    ///
    /// # Errors
    ///
    /// Mapping failures, `InvalidMappedRecord` when the draft does not pass
    /// validation, and target failures.
    pub async fn migrate_single_record(
        &self,
        id: &RecordId,
        dry_run: bool,
    ) -> Result<Option<SingleRecordOutcome>> {
        let Some(record) = self.provider.get_record(id).await? else {
            tracing::warn!(record_id = %id, "Record not found");
            return Ok(None);
        };

        let mapped = self.mapper.map_record(&record)?;
        if !self.mapper.validate_mapped_record(&mapped) {
            return Err(MigratorError::InvalidMappedRecord(format!(
                "Invalid mapped record for ID: {id}"
            )));
        }

        if dry_run {
            tracing::info!(record_id = %id, "[DRY RUN] Would migrate record");
            return Ok(Some(SingleRecordOutcome::Mapped(Box::new(mapped))));
        }

        let created = self.consumer.create_record(&mapped).await?;
        self.submit_to_community(&created).await;
        crate::log_record_migrated!(id, created.id);

        Ok(Some(SingleRecordOutcome::Created(created)))
    }

    /// Maps the selected records without submitting them
    ///
    /// # Errors
    ///
    /// Only provider failures; mapping failures become entries of the
    /// preview.
    pub async fn preview_records(
        &self,
        selection: &RecordSelection,
        include_files: bool,
    ) -> Result<Vec<PreviewEntry>> {
        let records: Vec<SourceRecord> = self.select_records(selection).try_collect().await?;

        let entries = records
            .into_iter()
            .map(|record| match self.mapper.map_record(&record) {
                Ok(mut mapped) => {
                    mapped.set_files_enabled(include_files);
                    PreviewEntry::mapped(record, mapped)
                }
                Err(e) => {
                    tracing::warn!(record_id = %record.display_id(), error = %e, "Failed to map record");
                    PreviewEntry::failed(record, e)
                }
            })
            .collect();

        Ok(entries)
    }

    /// Probes both ends and reports the mapper schema; never fails
    pub async fn get_migration_status(&self) -> MigrationStatus {
        let provider_connection = self.provider.validate_connection().await;
        if !provider_connection {
            tracing::error!("Provider connection test failed");
        }

        let consumer_connection = self.consumer.validate_connection().await;
        if !consumer_connection {
            tracing::error!("Consumer connection test failed");
        }

        MigrationStatus {
            provider: ComponentStatus {
                kind: self.provider.provider_type().to_string(),
                connection: provider_connection,
            },
            consumer: ComponentStatus {
                kind: self.consumer.consumer_type().to_string(),
                connection: consumer_connection,
            },
            mapper: MapperStatus {
                kind: self.mapper.mapper_type().to_string(),
                schema: self.mapper.mapping_schema(),
            },
            config: StatusConfig {
                stop_on_error: self.options.stop_on_error,
            },
        }
    }

    /// Advisory count of source records matching `query`
    pub async fn source_record_count(&self, query: Option<&str>) -> u64 {
        self.provider.get_record_count(query).await
    }

    /// True when both provider and consumer are reachable
    pub async fn validate_migration_setup(&self) -> bool {
        let status = self.get_migration_status().await;

        if !status.provider.connection {
            tracing::error!("Provider connection validation failed");
            return false;
        }
        if !status.consumer.connection {
            tracing::error!("Consumer connection validation failed");
            return false;
        }

        true
    }
}

/// Target failures that no later record can recover from
fn is_fatal(error: &MigratorError) -> bool {
    matches!(
        error,
        MigratorError::RateLimitExceeded { .. }
            | MigratorError::Configuration { .. }
            | MigratorError::Api(ApiError::AuthenticationFailed(_))
    )
}

fn abort(message: String, result: MigrationBatchResult) -> MigratorError {
    result.log_summary();
    MigrationError::new(message, result.failed_records).into()
}
