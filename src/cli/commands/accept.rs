//! Accept command implementation
//!
//! Curator action: accepts a pending community-submission request.

use super::{load_or_report, setup_exit_code, EXIT_FATAL};
use crate::adapters::invenio::InvenioClient;
use crate::adapters::traits::RecordConsumer;
use clap::Args;

/// Arguments for the accept command
#[derive(Args, Debug)]
pub struct AcceptArgs {
    /// Request id on the target repository
    pub request_id: String,

    /// Note attached to the acceptance (defaults to migration.review_content)
    #[arg(long)]
    pub content: Option<String>,
}

impl AcceptArgs {
    /// Execute the accept command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let client = match InvenioClient::new(&config.target) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to initialize target client: {e}");
                return Ok(setup_exit_code(&e));
            }
        };

        let content = self
            .content
            .as_deref()
            .unwrap_or(&config.migration.review_content);

        match client.accept_request(&self.request_id, content).await {
            Ok(response) => {
                println!("✅ Request {} accepted", self.request_id);
                println!("{}", serde_json::to_string_pretty(&response)?);
                Ok(0)
            }
            Err(e) => {
                tracing::error!(request_id = %self.request_id, error = %e, "Failed to accept request");
                eprintln!("Failed to accept request {}: {e}", self.request_id);
                Ok(EXIT_FATAL)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_config_is_configuration_error() {
        let args = AcceptArgs {
            request_id: "req-1".to_string(),
            content: None,
        };

        assert_eq!(args.execute("does-not-exist.toml").await.unwrap(), super::super::EXIT_CONFIG);
    }
}
