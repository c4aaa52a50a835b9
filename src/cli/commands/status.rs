//! Status command implementation
//!
//! Probes source and target connectivity and reports the mapping schema.

use super::{build_service, load_or_report, setup_exit_code, EXIT_CONNECTION};
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the status snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Also count source records matching this query
    #[arg(short, long)]
    pub query: Option<String>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking migration status");

        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let service = match build_service(&config) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to initialize clients");
                println!("   Error: {e}");
                return Ok(setup_exit_code(&e));
            }
        };

        let status = service.get_migration_status().await;
        let ready = status.provider.connection && status.consumer.connection;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&status)?);
        } else {
            let mark = |ok: bool| if ok { "✅" } else { "❌" };

            println!("📊 Migration Status");
            println!();
            println!(
                "  Source ({}): {} {}",
                status.provider.kind,
                mark(status.provider.connection),
                config.source.base_url
            );
            println!(
                "  Target ({}): {} {}",
                status.consumer.kind,
                mark(status.consumer.connection),
                config.target.base_url
            );
            println!(
                "  Mapper: {} ({} → {}, v{})",
                status.mapper.kind,
                status.mapper.schema.source_format,
                status.mapper.schema.target_format,
                status.mapper.schema.version
            );
            println!(
                "  Required fields: {}",
                status.mapper.schema.required_fields.join(", ")
            );
            println!("  Stop on error: {}", status.config.stop_on_error);

            if status.provider.connection {
                let count = service.source_record_count(self.query.as_deref()).await;
                println!("  Source records: {count}");
            }
            println!();
        }

        Ok(if ready { 0 } else { EXIT_CONNECTION })
    }
}
