//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the migrator configuration file.

use super::EXIT_CONFIG;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates as well
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Source: {}", config.source.base_url);
        println!("  Source Community: {}", config.source.community_id);
        println!("  Source Request Delay: {}ms", config.source.request_delay_ms);
        println!("  Target: {}", config.target.base_url);
        println!(
            "  Target Community: {}",
            config.target.community_id.as_deref().unwrap_or("(none, no review requests)")
        );
        println!(
            "  Target Retries: {} (base delay {}ms)",
            config.target.max_retries, config.target.retry_base_delay_ms
        );
        println!("  Stop On Error: {}", config.migration.stop_on_error);
        println!("  Include PIDs: {}", config.migration.include_pids);
        println!("  Include Files: {}", config.migration.include_files);
        if let Some(max) = config.migration.max_records {
            println!("  Max Records: {max}");
        }
        println!();
        Ok(0)
    }
}
