//! Batch result and end-of-run reporting

use crate::domain::FailedRecord;
use serde::Serialize;
use std::time::Duration;

/// Outcome of one batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationBatchResult {
    /// Records mapped (dry run) or created on the target
    pub success_count: usize,

    /// Records skipped because they were empty
    pub skipped_count: usize,

    /// Failures in processing order
    pub failed_records: Vec<FailedRecord>,

    /// Wall-clock duration of the run
    #[serde(skip)]
    pub duration: Duration,
}

impl MigrationBatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_failure(&mut self, id: impl Into<String>, error: impl Into<String>) {
        self.failed_records.push(FailedRecord::new(id, error));
    }

    /// Records that reached a decision, success or failure
    pub fn processed_count(&self) -> usize {
        self.success_count + self.failed_records.len()
    }

    /// True when no record failed
    pub fn is_successful(&self) -> bool {
        self.failed_records.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            success = self.success_count,
            failed = self.failed_records.len(),
            skipped = self.skipped_count,
            duration_secs = self.duration.as_secs(),
            "Migration completed. Success: {}, Failed: {}",
            self.success_count,
            self.failed_records.len()
        );

        if !self.failed_records.is_empty() {
            let ids: Vec<&str> = self.failed_records.iter().map(|f| f.id.as_str()).collect();
            tracing::warn!(failed_ids = %ids.join(", "), "Failed records");
            for failed in &self.failed_records {
                tracing::warn!(record_id = %failed.id, error = %failed.error, "Record failed");
            }
        }
    }
}
