//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MigratorConfig;
use super::secret::secret_string;
use crate::domain::errors::MigratorError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of environment variables overriding configuration values
pub const ENV_PREFIX: &str = "INVENIO_MIGRATOR";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MigratorConfig
/// 4. Applies environment variable overrides (INVENIO_MIGRATOR_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a `Configuration` error if the file cannot be read or parsed,
/// a referenced environment variable is not set, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use invenio_migrator::config::loader::load_config;
///
/// let config = load_config("migrator.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MigratorConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MigratorError::configuration(
            "config",
            format!("Configuration file not found: {}", path.display()),
        ));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MigratorError::configuration(
            "config",
            format!("Failed to read configuration file {}: {}", path.display(), e),
        )
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Applies the same substitution, override and validation steps as
/// [`load_config`].
pub fn parse_config(contents: &str) -> Result<MigratorConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: MigratorConfig = toml::from_str(&contents)
        .map_err(|e| MigratorError::configuration("toml", format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        MigratorError::configuration("config", format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MigratorError::configuration("config", e.to_string()))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            result.push('\n');
        }

        if line.trim_start().starts_with('#') {
            result.push_str(line);
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(MigratorError::configuration(
            "env",
            format!(
                "Missing required environment variables: {}",
                missing_vars.join(", ")
            ),
        ));
    }

    Ok(result)
}

fn env(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{key}")).ok()
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env(key) {
        None => Ok(None),
        Some(val) => val.trim().parse().map(Some).map_err(|_| {
            MigratorError::configuration(
                format!("{ENV_PREFIX}_{key}"),
                format!("cannot parse value '{val}'"),
            )
        }),
    }
}

/// Applies environment variable overrides using the INVENIO_MIGRATOR_* prefix
///
/// Environment variables follow the pattern: INVENIO_MIGRATOR_<SECTION>_<KEY>,
/// for example INVENIO_MIGRATOR_TARGET_API_TOKEN or
/// INVENIO_MIGRATOR_MIGRATION_STOP_ON_ERROR.
fn apply_env_overrides(config: &mut MigratorConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Source overrides
    if let Some(val) = env("SOURCE_BASE_URL") {
        config.source.base_url = val;
    }
    if let Some(val) = env("SOURCE_COMMUNITY_ID") {
        config.source.community_id = val;
    }
    if let Some(val) = env("SOURCE_API_TOKEN") {
        config.source.api_token = Some(secret_string(val));
    }
    if let Some(val) = env_parsed("SOURCE_REQUEST_DELAY_MS")? {
        config.source.request_delay_ms = val;
    }
    if let Some(val) = env_parsed("SOURCE_PAGE_SIZE")? {
        config.source.page_size = val;
    }
    if let Some(val) = env_parsed("SOURCE_TLS_VERIFY")? {
        config.source.tls_verify = val;
    }
    if let Some(val) = env("SOURCE_START_DATE") {
        config.source.start_date = Some(val);
    }
    if let Some(val) = env("SOURCE_END_DATE") {
        config.source.end_date = Some(val);
    }

    // Target overrides
    if let Some(val) = env("TARGET_BASE_URL") {
        config.target.base_url = val;
    }
    if let Some(val) = env("TARGET_API_TOKEN") {
        config.target.api_token = Some(secret_string(val));
    }
    if let Some(val) = env("TARGET_COMMUNITY_ID") {
        config.target.community_id = Some(val);
    }
    if let Some(val) = env_parsed("TARGET_REQUEST_DELAY_MS")? {
        config.target.request_delay_ms = val;
    }
    if let Some(val) = env_parsed("TARGET_MAX_RETRIES")? {
        config.target.max_retries = val;
    }
    if let Some(val) = env_parsed("TARGET_RETRY_BASE_DELAY_MS")? {
        config.target.retry_base_delay_ms = val;
    }
    if let Some(val) = env_parsed("TARGET_TLS_VERIFY")? {
        config.target.tls_verify = val;
    }

    // Migration overrides
    if let Some(val) = env_parsed("MIGRATION_STOP_ON_ERROR")? {
        config.migration.stop_on_error = val;
    }
    if let Some(val) = env_parsed("MIGRATION_INCLUDE_PIDS")? {
        config.migration.include_pids = val;
    }
    if let Some(val) = env_parsed("MIGRATION_INCLUDE_FILES")? {
        config.migration.include_files = val;
    }
    if let Some(val) = env_parsed("MIGRATION_MAX_RECORDS")? {
        config.migration.max_records = Some(val);
    }
    if let Some(val) = env("MIGRATION_REVIEW_CONTENT") {
        config.migration.review_content = val;
    }

    // Logging overrides
    if let Some(val) = env_parsed("LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID: &str = r#"
[application]
log_level = "debug"

[source]
base_url = "https://zenodo.org/api"
community_id = "my-community"

[target]
base_url = "https://inveniordm.example.org/api"
api_token = "secret-token"
community_id = "00000000-0000-0000-0000-000000000001"

[migration]
stop_on_error = true
"#;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("LOADER_TEST_VAR", "test_value");
        let input = "api_token = \"${LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_token = \"test_value\"");
        std::env::remove_var("LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("LOADER_MISSING_VAR");
        let input = "api_token = \"${LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("LOADER_COMMENTED_VAR");
        let input = "# api_token = \"${LOADER_COMMENTED_VAR}\"";
        assert_eq!(substitute_env_vars(input).unwrap(), input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(MigratorError::Configuration { .. })));
    }

    #[test]
    fn test_load_config_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(VALID.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.source.community_id, "my-community");
        assert_eq!(config.source.request_delay_ms, 2000);
        assert_eq!(
            config.target.api_token.as_ref().unwrap().expose_secret(),
            "secret-token"
        );
        assert!(config.migration.stop_on_error);
        assert!(config.migration.include_pids);
    }

    #[test]
    fn test_parse_config_rejects_missing_token() {
        let toml = VALID.replace("api_token = \"secret-token\"\n", "");
        let err = parse_config(&toml).unwrap_err();
        assert!(err.to_string().contains("target.api_token"));
    }

    #[test]
    fn test_parse_config_rejects_invalid_toml() {
        let err = parse_config("[source\nbase_url = ").unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }
}
