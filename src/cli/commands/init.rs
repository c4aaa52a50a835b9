//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "migrator.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing migrator configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your community ids and URLs", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set TARGET_API_TOKEN");
                println!("     - Set SOURCE_API_TOKEN if the source community is restricted");
                println!("  3. Validate configuration: invenio-migrator validate-config");
                println!("  4. Check connectivity: invenio-migrator status");
                println!("  5. Preview: invenio-migrator migrate --output preview.json");
                println!("  6. Run migration: invenio-migrator migrate");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Invenio Migrator Configuration File
# Zenodo to InvenioRDM migration tool

environment = "development"

[application]
log_level = "info"

[source]
base_url = "https://zenodo.org/api"
community_id = "my-community"
request_delay_ms = 2000

[target]
base_url = "https://inveniordm.example.org/api"
api_token = "${TARGET_API_TOKEN}"
# community_id = "00000000-0000-0000-0000-000000000000"
request_delay_ms = 1000
max_retries = 3
retry_base_delay_ms = 1000

[migration]
stop_on_error = false
include_pids = true
include_files = false
review_content = "Auto-migrated record"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Invenio Migrator Configuration File
# Zenodo to InvenioRDM migration tool
#
# Values of the form ${VAR} are read from the environment (or a .env file).
# Any option can also be overridden with INVENIO_MIGRATOR_<SECTION>_<KEY>,
# e.g. INVENIO_MIGRATOR_MIGRATION_STOP_ON_ERROR=true

# Runtime environment: development | staging | production
# TLS verification cannot be disabled in production
environment = "development"

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Source Repository (Zenodo)
# ============================================================================
[source]
# API base URL
base_url = "https://zenodo.org/api"

# Community whose records are migrated
community_id = "my-community"

# Optional bearer token for restricted records
# api_token = "${SOURCE_API_TOKEN}"

# Fixed delay before every request, in milliseconds
request_delay_ms = 2000

# Request timeout in seconds
timeout_seconds = 30

# Records per page (1-1000)
page_size = 100

# Sort order: newest | oldest | mostviewed | ...
sort = "newest"

# Include every version of each record
all_versions = true

# TLS/SSL verification
tls_verify = true

# Optional publication date window (YYYY-MM-DD, inclusive)
# start_date = "2024-01-01"
# end_date = "2024-12-31"

# ============================================================================
# Target Repository (InvenioRDM)
# ============================================================================
[target]
# API base URL
base_url = "https://inveniordm.example.org/api"

# Personal access token (required)
api_token = "${TARGET_API_TOKEN}"

# Community receiving review requests; omit to only create drafts
# community_id = "00000000-0000-0000-0000-000000000000"

# Fixed delay before review workflow requests, in milliseconds
request_delay_ms = 1000

# Retries on rate limiting (0-10); delays grow as base * 2^attempt
max_retries = 3
retry_base_delay_ms = 1000

# Request timeout in seconds
timeout_seconds = 30

# TLS/SSL verification
tls_verify = true

# ============================================================================
# Migration Behaviour
# ============================================================================
[migration]
# Abort the run on the first failed record
stop_on_error = false

# Register the source DOI as an external PID and link back to it
include_pids = true

# Enable file upload on created drafts
include_files = false

# Stop after this many records
# max_records = 100

# Note attached to review submissions
review_content = "Auto-migrated record"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "./logs"

# Log rotation: daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
