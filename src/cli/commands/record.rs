//! Record command implementation
//!
//! Migrates one record by source id and prints the resulting JSON.

use super::{build_service, load_or_report, setup_exit_code, EXIT_FATAL};
use crate::domain::RecordId;
use clap::Args;

/// Arguments for the record command
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Source record id
    pub id: String,

    /// Print the mapped record without submitting it
    #[arg(short, long)]
    pub dry_run: bool,
}

impl RecordArgs {
    /// Execute the record command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let id: RecordId = match self.id.parse() {
            Ok(id) => id,
            Err(e) => {
                eprintln!("Invalid record id: {e}");
                return Ok(super::EXIT_CONFIG);
            }
        };

        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let service = match build_service(&config) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to initialize migration: {e}");
                return Ok(setup_exit_code(&e));
            }
        };

        match service.migrate_single_record(&id, self.dry_run).await {
            Ok(Some(outcome)) => {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                Ok(0)
            }
            Ok(None) => {
                println!("❌ Record {id} not found");
                Ok(1)
            }
            Err(e) if e.is_record_error() => {
                tracing::warn!(record_id = %id, error = %e, "Failed to migrate record");
                eprintln!("Failed to migrate record {id}: {e}");
                Ok(1)
            }
            Err(e) => {
                tracing::error!(record_id = %id, error = %e, "Failed to migrate record");
                eprintln!("Failed to migrate record {id}: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}
