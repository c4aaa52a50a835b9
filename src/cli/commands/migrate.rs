//! Migrate command implementation
//!
//! This module implements the `migrate` command: a batch migration of the
//! source community, or a preview dump when `--output` is given.

use super::{build_service, load_or_report, setup_exit_code, EXIT_FATAL};
use crate::config::MigrationConfig;
use crate::core::migration::{write_preview, MigrateRequest, RecordSelection};
use crate::domain::{MigratorError, RecordId};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Map records without submitting them to the target
    #[arg(short, long)]
    pub dry_run: bool,

    /// Source query, e.g. 'metadata.publication_date:{2025-01-01 TO *}'
    #[arg(short, long)]
    pub query: Option<String>,

    /// Migrate only these record ids (comma-separated)
    #[arg(short, long, value_name = "IDS")]
    pub records: Option<String>,

    /// Write mapped records to this file instead of migrating
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable file upload on created drafts (also `migration.include_files`)
    #[arg(long)]
    pub include_files: bool,
}

/// Splits a comma-separated id list, dropping blanks
pub fn parse_record_ids(raw: &str) -> Vec<RecordId> {
    raw.split(',').filter_map(|id| id.parse().ok()).collect()
}

impl MigrateArgs {
    fn selection(&self) -> Option<RecordSelection> {
        match &self.records {
            Some(raw) => {
                let ids = parse_record_ids(raw);
                (!ids.is_empty()).then_some(RecordSelection::Ids(ids))
            }
            None => Some(RecordSelection::Query(self.query.clone())),
        }
    }

    /// The flag turns file upload on; it never overrides an enabled config
    fn include_files(&self, config: &MigrationConfig) -> bool {
        self.include_files || config.include_files
    }

    /// Execute the migrate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::debug!(
            dry_run = self.dry_run,
            query = ?self.query,
            output = ?self.output,
            include_files = self.include_files,
            records = ?self.records,
            "Processing migrate command"
        );

        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let Some(selection) = self.selection() else {
            tracing::warn!("No valid record IDs provided, skipping");
            println!("⚠️  No valid record IDs provided, nothing to migrate");
            return Ok(0);
        };

        let include_files = self.include_files(&config.migration);

        let service = match build_service(&config) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize migration");
                eprintln!("Failed to initialize migration: {e}");
                return Ok(setup_exit_code(&e));
            }
        };

        if let Some(output) = &self.output {
            tracing::info!(path = %output.display(), "Saving records to file");
            println!("📝 Writing preview to {}", output.display());

            let entries = match service.preview_records(&selection, include_files).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::error!(error = %e, "Preview failed");
                    eprintln!("Failed to save records to file {}: {e}", output.display());
                    return Ok(EXIT_FATAL);
                }
            };

            if let Err(e) = write_preview(output, &entries) {
                tracing::error!(error = %e, "Error saving to file");
                eprintln!("Failed to save records to file {}: {e}", output.display());
                return Ok(EXIT_FATAL);
            }

            let mapped = entries.iter().filter(|e| e.is_mapped()).count();
            println!("✅ Saved {} records ({} mapped, {} failed)", entries.len(), mapped, entries.len() - mapped);
            return Ok(0);
        }

        if self.dry_run {
            println!("🔍 DRY RUN MODE - No records will be created on the target");
            println!();
        }

        let request = MigrateRequest {
            dry_run: self.dry_run,
            selection,
            include_files,
        };

        println!("🚀 Starting migration...");
        println!();

        let result = match service.migrate_records(&request).await {
            Ok(result) => result,
            Err(MigratorError::Migration(e)) => {
                tracing::error!(error = %e.message, "Migration failed");
                eprintln!("Migration failed: {}", e.message);
                if !e.failed_records.is_empty() {
                    let ids: Vec<&str> = e.failed_records.iter().map(|r| r.id.as_str()).collect();
                    eprintln!("Failed record IDs: {}", ids.join(", "));
                }
                return Ok(EXIT_FATAL);
            }
            Err(e) => {
                tracing::error!(error = %e, "Unexpected error during migration");
                eprintln!("Unexpected migration error: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        println!();
        println!("📊 Migration Summary:");
        println!("  Successful: {}", result.success_count);
        println!("  Failed: {}", result.failed_records.len());
        println!("  Skipped: {}", result.skipped_count);
        println!("  Duration: {:.2}s", result.duration.as_secs_f64());
        println!();

        if !result.failed_records.is_empty() {
            println!("⚠️  Failed records:");
            for failed in &result.failed_records {
                println!("  - {}: {}", failed.id, failed.error);
            }
            println!();
        }

        let exit_code = if result.is_successful() {
            println!("✅ Migration completed successfully!");
            0
        } else {
            println!("⚠️  Migration completed with failures");
            1
        };

        Ok(exit_code)
    }
}
