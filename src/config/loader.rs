//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::TriageConfig;
use super::secret::secret_string;
use crate::domain::errors::TriageError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TriageConfig
/// 4. Applies environment variable overrides (TRIAGE_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use triage::config::load_config;
///
/// let config = load_config("triage.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TriageConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TriageError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TriageError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let mut config: TriageConfig = toml::from_str(&contents)
        .map_err(|e| TriageError::Configuration(format!("Failed to parse TOML: {e}")))?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config);

    // Validate configuration
    config
        .validate()
        .map_err(|e| TriageError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched, and every missing variable is
/// collected so the error names all of them at once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
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
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(TriageError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the TRIAGE_* prefix
///
/// Environment variables follow the pattern: TRIAGE_<SECTION>_<KEY>
/// For example: TRIAGE_FHIR_BASE_URL, TRIAGE_DISPATCH_WORKERS
fn apply_env_overrides(config: &mut TriageConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("TRIAGE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("TRIAGE_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // FHIR overrides
    if let Ok(val) = std::env::var("TRIAGE_FHIR_BASE_URL") {
        config.fhir.base_url = val;
    }
    if let Ok(val) = std::env::var("TRIAGE_FHIR_USERNAME") {
        config.fhir.username = Some(val);
    }
    if let Ok(val) = std::env::var("TRIAGE_FHIR_PASSWORD") {
        config.fhir.password = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("TRIAGE_FHIR_TLS_VERIFY") {
        config.fhir.tls_verify = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("TRIAGE_FHIR_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.fhir.timeout_seconds = timeout;
        }
    }

    // Dispatch overrides
    if let Ok(val) = std::env::var("TRIAGE_DISPATCH_QUEUE_CAPACITY") {
        if let Ok(capacity) = val.parse() {
            config.dispatch.queue_capacity = capacity;
        }
    }
    if let Ok(val) = std::env::var("TRIAGE_DISPATCH_WORKERS") {
        if let Ok(workers) = val.parse() {
            config.dispatch.workers = workers;
        }
    }
    if let Ok(val) = std::env::var("TRIAGE_DISPATCH_SHUTDOWN_GRACE_SECONDS") {
        if let Ok(grace) = val.parse() {
            config.dispatch.shutdown_grace_seconds = grace;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("TRIAGE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("TRIAGE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("TRIAGE_TEST_SUBST_VAR", "test_value");
        let input = "password = \"${TRIAGE_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("TRIAGE_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("TRIAGE_TEST_MISSING_VAR");
        let input = "password = \"${TRIAGE_TEST_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("TRIAGE_TEST_COMMENTED_VAR");
        let input = "# password = \"${TRIAGE_TEST_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "# password = \"${TRIAGE_TEST_COMMENTED_VAR}\"\n");
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[fhir]
base_url = "https://fhir.example.com"
timeout_seconds = 15

[dispatch]
workers = 2
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.fhir.base_url, "https://fhir.example.com");
        assert_eq!(config.fhir.timeout_seconds, 15);
        assert_eq!(config.dispatch.workers, 2);
    }

    #[test]
    fn test_load_config_invalid_values_rejected() {
        let toml_content = r#"
[fhir]
base_url = "not a url"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(TriageError::Configuration(_))));
    }
}
