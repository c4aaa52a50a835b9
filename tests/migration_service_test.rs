//! Integration tests for the migration service using in-memory doubles

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use invenio_migrator::adapters::traits::{QueryOptions, RecordConsumer, RecordProvider};
use invenio_migrator::adapters::zenodo::ZenodoClient;
use invenio_migrator::config::SourceConfig;
use invenio_migrator::core::mapping::{MappingSchema, RecordMapper, ZenodoToInvenioMapper};
use invenio_migrator::core::migration::{
    MigrateRequest, MigrationOptions, MigrationService, RecordSelection, SingleRecordOutcome,
};
use invenio_migrator::domain::{
    ApiError, CreatedRecord, MappedRecord, MigratorError, RecordId, RecordMappingError, Result,
    SourceRecord,
};
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Provider serving a fixed list of records
struct MockProvider {
    records: Vec<SourceRecord>,
    connected: bool,
    fail_after: Option<usize>,
}

impl MockProvider {
    fn new(records: Vec<SourceRecord>) -> Self {
        Self {
            records,
            connected: true,
            fail_after: None,
        }
    }
}

#[async_trait]
impl RecordProvider for MockProvider {
    fn provider_type(&self) -> &'static str {
        "mock"
    }

    fn get_records(
        &self,
        _query: Option<String>,
        _options: QueryOptions,
    ) -> BoxStream<'_, Result<SourceRecord>> {
        let mut items: Vec<Result<SourceRecord>> = self.records.iter().cloned().map(Ok).collect();
        if let Some(n) = self.fail_after {
            items.truncate(n);
            items.push(Err(ApiError::with_status("Source request failed", 502, None).into()));
        }
        stream::iter(items).boxed()
    }

    async fn get_record(&self, id: &RecordId) -> Result<Option<SourceRecord>> {
        Ok(self
            .records
            .iter()
            .find(|r| r.id.as_ref() == Some(id))
            .cloned())
    }

    async fn get_record_count(&self, _query: Option<&str>) -> u64 {
        self.records.len() as u64
    }

    async fn validate_connection(&self) -> bool {
        self.connected
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(Option<String>),
    ReviewRequest(String, String),
    SubmitReview(String, String),
}

/// Consumer recording every call
struct MockConsumer {
    calls: Mutex<Vec<Call>>,
    connected: bool,
    fail_create_for: Option<String>,
    fail_review: bool,
    rate_limited: bool,
}

impl MockConsumer {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            connected: true,
            fail_create_for: None,
            fail_review: false,
            rate_limited: false,
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn create_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Create(_)))
            .count()
    }
}

#[async_trait]
impl RecordConsumer for MockConsumer {
    fn consumer_type(&self) -> &'static str {
        "mock"
    }

    async fn create_record(&self, record: &MappedRecord) -> Result<CreatedRecord> {
        let title = record.title().map(str::to_string);
        self.calls.lock().unwrap().push(Call::Create(title.clone()));

        if self.rate_limited {
            return Err(MigratorError::RateLimitExceeded {
                attempts: 4,
                message: "Too Many Requests".to_string(),
            });
        }
        if title.is_some() && title == self.fail_create_for {
            return Err(ApiError::with_status("Failed to create record", 400, None).into());
        }

        let n = self.create_count();
        Ok(serde_json::from_value(json!({"id": format!("draft-{n}")})).unwrap())
    }

    async fn create_review_request(&self, draft_id: &str, community_id: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(Call::ReviewRequest(
            draft_id.to_string(),
            community_id.to_string(),
        ));
        if self.fail_review {
            return Err(ApiError::with_status("Failed to create review request", 500, None).into());
        }
        Ok(json!({"id": "req-1"}))
    }

    async fn submit_review(&self, draft_id: &str, content: &str) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::SubmitReview(draft_id.to_string(), content.to_string()));
        Ok(json!({"id": "req-1", "status": "submitted"}))
    }

    async fn accept_request(&self, _request_id: &str, _content: &str) -> Result<Value> {
        Ok(json!({"status": "accepted"}))
    }

    async fn get_record(&self, _id: &str) -> Option<Value> {
        None
    }

    async fn validate_connection(&self) -> bool {
        self.connected
    }
}

/// Mapper failing for one record id, delegating otherwise
struct FailingMapper {
    inner: ZenodoToInvenioMapper,
    fail_for: String,
}

impl RecordMapper for FailingMapper {
    fn mapper_type(&self) -> &'static str {
        "failing"
    }

    fn map_record(&self, record: &SourceRecord) -> Result<MappedRecord> {
        if record.display_id() == self.fail_for {
            return Err(RecordMappingError::new(record.display_id())
                .with_reason("Mapping error for record")
                .into());
        }
        self.inner.map_record(record)
    }

    fn validate_mapped_record(&self, record: &MappedRecord) -> bool {
        self.inner.validate_mapped_record(record)
    }

    fn mapping_schema(&self) -> MappingSchema {
        self.inner.mapping_schema()
    }
}

fn record(id: u64) -> SourceRecord {
    SourceRecord::from_value(json!({
        "id": id,
        "doi": format!("10.5281/zenodo.{id}"),
        "metadata": {
            "title": format!("Record {id}"),
            "creators": [{"name": "Doe, John"}],
            "resource_type": {"type": "dataset"}
        }
    }))
    .unwrap()
}

fn options(stop_on_error: bool) -> MigrationOptions {
    MigrationOptions {
        stop_on_error,
        community_id: Some("community-uuid".to_string()),
        ..MigrationOptions::default()
    }
}

fn service(
    provider: MockProvider,
    consumer: Arc<MockConsumer>,
    mapper: Arc<dyn RecordMapper>,
    options: MigrationOptions,
) -> MigrationService {
    MigrationService::new(Arc::new(provider), consumer, mapper, options)
}

fn failing_second() -> Arc<dyn RecordMapper> {
    Arc::new(FailingMapper {
        inner: ZenodoToInvenioMapper::new(true),
        fail_for: "2".to_string(),
    })
}

#[tokio::test]
async fn test_mapping_failure_is_recorded_and_batch_continues() {
    let consumer = Arc::new(MockConsumer::new());
    let service = service(
        MockProvider::new(vec![record(1), record(2)]),
        consumer.clone(),
        failing_second(),
        options(false),
    );

    let result = service.migrate_records(&MigrateRequest::default()).await.unwrap();

    assert_eq!(result.success_count, 1);
    assert_eq!(result.failed_records.len(), 1);
    assert_eq!(result.failed_records[0].id, "2");
    assert!(result.failed_records[0].error.contains("Mapping error for record"));
    assert_eq!(consumer.create_count(), 1);
}

#[tokio::test]
async fn test_malformed_source_hit_fails_only_that_record() {
    let mut server = Server::new_async().await;
    let hits: Vec<Value> = (1..=3)
        .map(|id| serde_json::to_value(record(id)).unwrap())
        .collect();
    let mut malformed = hits[1].clone();
    malformed["metadata"]["resource_type"] = json!("dataset");

    let _page = server
        .mock("GET", "/records")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({"hits": {"hits": [hits[0].clone(), malformed, hits[2].clone()]}}).to_string(),
        )
        .create_async()
        .await;

    let source = ZenodoClient::new(&SourceConfig {
        base_url: server.url(),
        community_id: "test-community".to_string(),
        request_delay_ms: 0,
        ..SourceConfig::default()
    })
    .unwrap();
    let consumer = Arc::new(MockConsumer::new());
    let service = MigrationService::new(
        Arc::new(source),
        consumer.clone(),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        options(false),
    );

    let result = service.migrate_records(&MigrateRequest::default()).await.unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(result.failed_records.len(), 1);
    assert_eq!(result.failed_records[0].id, "2");
    assert!(result.failed_records[0].error.contains("Malformed source record"));
    assert_eq!(consumer.create_count(), 2);
}

#[tokio::test]
async fn test_stop_on_error_aborts_with_failures() {
    let consumer = Arc::new(MockConsumer::new());
    let service = service(
        MockProvider::new(vec![record(1), record(2), record(3)]),
        consumer.clone(),
        failing_second(),
        options(true),
    );

    let err = service
        .migrate_records(&MigrateRequest::default())
        .await
        .unwrap_err();

    match err {
        MigratorError::Migration(e) => {
            assert_eq!(e.message, "Migration stopped due to error in record 2");
            assert_eq!(e.failed_records.len(), 1);
            assert_eq!(e.failed_records[0].id, "2");
        }
        other => panic!("unexpected error: {other}"),
    }

    // Record 3 is never pulled
    assert_eq!(consumer.create_count(), 1);
}

#[tokio::test]
async fn test_successful_creation_runs_review_workflow() {
    let consumer = Arc::new(MockConsumer::new());
    let service = service(
        MockProvider::new(vec![record(1)]),
        consumer.clone(),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        options(false),
    );

    let result = service.migrate_records(&MigrateRequest::default()).await.unwrap();
    assert_eq!(result.success_count, 1);

    assert_eq!(
        consumer.calls(),
        vec![
            Call::Create(Some("Record 1".to_string())),
            Call::ReviewRequest("draft-1".to_string(), "community-uuid".to_string()),
            Call::SubmitReview("draft-1".to_string(), "Auto-migrated record".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_review_failure_does_not_fail_record() {
    let consumer = Arc::new(MockConsumer {
        fail_review: true,
        ..MockConsumer::new()
    });
    let service = service(
        MockProvider::new(vec![record(1), record(2)]),
        consumer.clone(),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        options(true),
    );

    let result = service.migrate_records(&MigrateRequest::default()).await.unwrap();
    assert_eq!(result.success_count, 2);
    assert!(result.is_successful());
    assert!(!consumer
        .calls()
        .iter()
        .any(|c| matches!(c, Call::SubmitReview(..))));
}

#[tokio::test]
async fn test_no_community_skips_review_workflow() {
    let consumer = Arc::new(MockConsumer::new());
    let service = service(
        MockProvider::new(vec![record(1)]),
        consumer.clone(),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        MigrationOptions::default(),
    );

    service.migrate_records(&MigrateRequest::default()).await.unwrap();
    assert_eq!(consumer.calls(), vec![Call::Create(Some("Record 1".to_string()))]);
}

#[tokio::test]
async fn test_dry_run_never_submits() {
    let consumer = Arc::new(MockConsumer::new());
    let service = service(
        MockProvider::new(vec![record(1), record(2)]),
        consumer.clone(),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        options(false),
    );

    let request = MigrateRequest {
        dry_run: true,
        ..MigrateRequest::default()
    };
    let result = service.migrate_records(&request).await.unwrap();

    assert_eq!(result.success_count, 2);
    assert!(consumer.calls().is_empty());
}

#[tokio::test]
async fn test_empty_records_are_skipped() {
    let consumer = Arc::new(MockConsumer::new());
    let service = service(
        MockProvider::new(vec![SourceRecord::default(), record(1)]),
        consumer.clone(),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        options(true),
    );

    let result = service.migrate_records(&MigrateRequest::default()).await.unwrap();
    assert_eq!(result.success_count, 1);
    assert_eq!(result.skipped_count, 1);
    assert!(result.failed_records.is_empty());
}

#[tokio::test]
async fn test_target_failure_recorded_without_stop_on_error() {
    let consumer = Arc::new(MockConsumer {
        fail_create_for: Some("Record 1".to_string()),
        ..MockConsumer::new()
    });
    let service = service(
        MockProvider::new(vec![record(1), record(2)]),
        consumer.clone(),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        options(false),
    );

    let result = service.migrate_records(&MigrateRequest::default()).await.unwrap();
    assert_eq!(result.success_count, 1);
    assert_eq!(result.failed_records[0].id, "1");
    assert_eq!(consumer.create_count(), 2);
}

#[tokio::test]
async fn test_target_failure_with_stop_on_error() {
    let consumer = Arc::new(MockConsumer {
        fail_create_for: Some("Record 1".to_string()),
        ..MockConsumer::new()
    });
    let service = service(
        MockProvider::new(vec![record(1), record(2)]),
        consumer.clone(),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        options(true),
    );

    let err = service
        .migrate_records(&MigrateRequest::default())
        .await
        .unwrap_err();
    match err {
        MigratorError::Migration(e) => {
            assert_eq!(
                e.message,
                "Migration stopped due to unexpected error in record 1"
            );
            assert_eq!(e.failed_records.len(), 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_rate_limit_exhaustion_is_fatal() {
    let consumer = Arc::new(MockConsumer {
        rate_limited: true,
        ..MockConsumer::new()
    });
    let service = service(
        MockProvider::new(vec![record(1), record(2)]),
        consumer.clone(),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        options(false),
    );

    let err = service
        .migrate_records(&MigrateRequest::default())
        .await
        .unwrap_err();
    match err {
        MigratorError::Migration(e) => {
            assert!(e.message.starts_with("Migration failed:"));
            assert_eq!(e.failed_records.len(), 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(consumer.create_count(), 1);
}

#[tokio::test]
async fn test_provider_failure_wrapped_with_failures_so_far() {
    let consumer = Arc::new(MockConsumer::new());
    let provider = MockProvider {
        fail_after: Some(2),
        ..MockProvider::new(vec![record(1), record(2), record(3)])
    };
    let service = service(provider, consumer.clone(), failing_second(), options(false));

    let err = service
        .migrate_records(&MigrateRequest::default())
        .await
        .unwrap_err();
    match err {
        MigratorError::Migration(e) => {
            assert!(e.message.starts_with("Migration failed:"));
            assert_eq!(e.failed_records.len(), 1);
            assert_eq!(e.failed_records[0].id, "2");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_max_records_caps_the_run() {
    let consumer = Arc::new(MockConsumer::new());
    let service = service(
        MockProvider::new(vec![record(1), record(2), record(3)]),
        consumer.clone(),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        MigrationOptions {
            max_records: Some(2),
            ..MigrationOptions::default()
        },
    );

    let result = service.migrate_records(&MigrateRequest::default()).await.unwrap();
    assert_eq!(result.success_count, 2);
    assert_eq!(consumer.create_count(), 2);
}

#[tokio::test]
async fn test_explicit_record_ids() {
    let consumer = Arc::new(MockConsumer::new());
    let service = service(
        MockProvider::new(vec![record(1), record(2), record(3)]),
        consumer.clone(),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        MigrationOptions::default(),
    );

    let request = MigrateRequest {
        selection: RecordSelection::Ids(vec![
            RecordId::new("3").unwrap(),
            RecordId::new("404").unwrap(),
            RecordId::new("1").unwrap(),
        ]),
        ..MigrateRequest::default()
    };
    let result = service.migrate_records(&request).await.unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(
        consumer.calls(),
        vec![
            Call::Create(Some("Record 3".to_string())),
            Call::Create(Some("Record 1".to_string())),
        ]
    );
}

#[tokio::test]
async fn test_include_files_toggles_draft_files() {
    struct FilesConsumer(Mutex<Vec<bool>>);

    #[async_trait]
    impl RecordConsumer for FilesConsumer {
        fn consumer_type(&self) -> &'static str {
            "files"
        }
        async fn create_record(&self, record: &MappedRecord) -> Result<CreatedRecord> {
            let enabled = record.files.map(|f| f.enabled).unwrap_or(true);
            self.0.lock().unwrap().push(enabled);
            Ok(serde_json::from_value(json!({"id": "draft"})).unwrap())
        }
        async fn create_review_request(&self, _: &str, _: &str) -> Result<Value> {
            Ok(Value::Null)
        }
        async fn submit_review(&self, _: &str, _: &str) -> Result<Value> {
            Ok(Value::Null)
        }
        async fn accept_request(&self, _: &str, _: &str) -> Result<Value> {
            Ok(Value::Null)
        }
        async fn get_record(&self, _: &str) -> Option<Value> {
            None
        }
        async fn validate_connection(&self) -> bool {
            true
        }
    }

    let consumer = Arc::new(FilesConsumer(Mutex::new(Vec::new())));
    let service = MigrationService::new(
        Arc::new(MockProvider::new(vec![record(1)])),
        consumer.clone(),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        MigrationOptions::default(),
    );

    service.migrate_records(&MigrateRequest::default()).await.unwrap();
    let request = MigrateRequest {
        include_files: true,
        ..MigrateRequest::default()
    };
    service.migrate_records(&request).await.unwrap();

    assert_eq!(*consumer.0.lock().unwrap(), vec![false, true]);
}

#[tokio::test]
async fn test_migrate_single_record() {
    let consumer = Arc::new(MockConsumer::new());
    let service = service(
        MockProvider::new(vec![record(1)]),
        consumer.clone(),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        MigrationOptions::default(),
    );

    let missing = service
        .migrate_single_record(&RecordId::new("9").unwrap(), false)
        .await
        .unwrap();
    assert!(missing.is_none());

    let dry = service
        .migrate_single_record(&RecordId::new("1").unwrap(), true)
        .await
        .unwrap();
    match dry {
        Some(SingleRecordOutcome::Mapped(mapped)) => {
            assert_eq!(mapped.title(), Some("Record 1"))
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(consumer.calls().is_empty());

    let created = service
        .migrate_single_record(&RecordId::new("1").unwrap(), false)
        .await
        .unwrap();
    match created {
        Some(SingleRecordOutcome::Created(created)) => assert_eq!(created.id, "draft-1"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_migrate_single_record_rejects_invalid_draft() {
    /// Mapper whose output never validates
    struct RejectingMapper(ZenodoToInvenioMapper);

    impl RecordMapper for RejectingMapper {
        fn mapper_type(&self) -> &'static str {
            "rejecting"
        }
        fn map_record(&self, record: &SourceRecord) -> Result<MappedRecord> {
            self.0.map_record(record)
        }
        fn validate_mapped_record(&self, _record: &MappedRecord) -> bool {
            false
        }
        fn mapping_schema(&self) -> MappingSchema {
            self.0.mapping_schema()
        }
    }

    let service = service(
        MockProvider::new(vec![record(1)]),
        Arc::new(MockConsumer::new()),
        Arc::new(RejectingMapper(ZenodoToInvenioMapper::new(true))),
        MigrationOptions::default(),
    );

    let err = service
        .migrate_single_record(&RecordId::new("1").unwrap(), false)
        .await
        .unwrap_err();
    assert!(matches!(err, MigratorError::InvalidMappedRecord(_)));
    assert!(err.to_string().contains("Invalid mapped record for ID: 1"));
}

#[tokio::test]
async fn test_status_and_setup_validation() {
    let service_ok = service(
        MockProvider::new(vec![]),
        Arc::new(MockConsumer::new()),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        options(true),
    );

    let status = service_ok.get_migration_status().await;
    assert!(status.provider.connection);
    assert!(status.consumer.connection);
    assert_eq!(status.mapper.kind, "zenodo_to_inveniordm");
    assert_eq!(status.mapper.schema.version, "1.0");
    assert!(status.config.stop_on_error);
    assert!(service_ok.validate_migration_setup().await);

    let value = serde_json::to_value(&status).unwrap();
    assert_eq!(value["provider"]["type"], "mock");
    assert_eq!(value["mapper"]["schema"]["source_format"], "zenodo");

    let service_down = service(
        MockProvider {
            connected: false,
            ..MockProvider::new(vec![])
        },
        Arc::new(MockConsumer::new()),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        options(false),
    );
    assert!(!service_down.get_migration_status().await.provider.connection);
    assert!(!service_down.validate_migration_setup().await);

    let target_down = service(
        MockProvider::new(vec![]),
        Arc::new(MockConsumer {
            connected: false,
            ..MockConsumer::new()
        }),
        Arc::new(ZenodoToInvenioMapper::new(true)),
        options(false),
    );
    assert!(!target_down.validate_migration_setup().await);
}

#[tokio::test]
async fn test_preview_records_keeps_failures() {
    let service = service(
        MockProvider::new(vec![record(1), record(2)]),
        Arc::new(MockConsumer::new()),
        failing_second(),
        MigrationOptions::default(),
    );

    let entries = service
        .preview_records(&RecordSelection::default(), true)
        .await
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert!(entries[0].is_mapped());
    assert!(!entries[1].is_mapped());

    let value = serde_json::to_value(&entries).unwrap();
    assert_eq!(value[0]["mapped_record"]["files"]["enabled"], true);
    assert!(value[1]["mapping_error"]
        .as_str()
        .unwrap()
        .contains("Mapping error for record"));
}
