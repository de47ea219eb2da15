//! Configuration schema types
//!
//! This module defines the configuration structure for Triage. The shape
//! maps directly to the `triage.toml` sections; every field carries a
//! serde default so a minimal file stays minimal.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Main Triage configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Downstream FHIR endpoint configuration
    pub fhir: FhirConfig,

    /// Dispatch queue and worker configuration
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TriageConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.fhir.validate()?;
        self.dispatch.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (parse and validate but never dispatch)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// FHIR endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FhirConfig {
    /// Base URL of the FHIR server; bundles are POSTed to
    /// `{base_url}/fhir/Bundle`
    pub base_url: String,

    /// Per-dispatch timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Username for HTTP Basic authentication (optional)
    #[serde(default)]
    pub username: Option<String>,

    /// Password for HTTP Basic authentication (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: Disabling TLS verification (setting to `false`)
    /// exposes the application to man-in-the-middle attacks and should ONLY
    /// be used in development/testing environments.
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl FhirConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("fhir.base_url cannot be empty".to_string());
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("fhir.base_url is not a valid URL: {e}"))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("fhir.base_url must use http or https".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("fhir.timeout_seconds must be > 0".to_string());
        }

        // Credentials travel together or not at all
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                if username.is_empty() {
                    return Err("fhir.username cannot be empty when set".to_string());
                }
                if password.expose_secret().is_empty() {
                    return Err("fhir.password cannot be empty when set".to_string());
                }
            }
            (Some(_), None) => {
                return Err("fhir.password is required when fhir.username is set".to_string());
            }
            (None, Some(_)) => {
                return Err("fhir.username is required when fhir.password is set".to_string());
            }
            (None, None) => {}
        }

        Ok(())
    }
}

impl Default for FhirConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_seconds: default_timeout_seconds(),
            username: None,
            password: None,
            tls_verify: true,
        }
    }
}

/// Dispatch queue and worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Bounded queue capacity; a full queue drops new jobs
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Number of concurrent delivery workers
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// How long shutdown waits for in-flight deliveries before abandoning
    /// them
    #[serde(default = "default_shutdown_grace_seconds")]
    pub shutdown_grace_seconds: u64,
}

impl DispatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.queue_capacity == 0 {
            return Err("dispatch.queue_capacity must be > 0".to_string());
        }

        if self.workers == 0 || self.workers > 64 {
            return Err(format!(
                "dispatch.workers must be between 1 and 64, got {}",
                self.workers
            ));
        }

        Ok(())
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            workers: default_workers(),
            shutdown_grace_seconds: default_shutdown_grace_seconds(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory; rotated `triage.log` files are written here
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in MB
    #[serde(default = "default_local_max_size_mb")]
    pub local_max_size_mb: usize,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "size"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_max_size_mb == 0 {
            return Err("logging.local_max_size_mb must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            local_max_size_mb: default_local_max_size_mb(),
        }
    }
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_queue_capacity() -> usize {
    256
}

fn default_workers() -> usize {
    4
}

fn default_shutdown_grace_seconds() -> u64 {
    5
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_local_max_size_mb() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn valid_config() -> TriageConfig {
        TriageConfig {
            application: ApplicationConfig::default(),
            fhir: FhirConfig::default(),
            dispatch: DispatchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_minimal_toml_parses_with_defaults() {
        let config: TriageConfig = toml::from_str(
            r#"
[fhir]
base_url = "https://fhir.example.com"
"#,
        )
        .unwrap();

        assert_eq!(config.application.log_level, "info");
        assert!(!config.application.dry_run);
        assert_eq!(config.fhir.timeout_seconds, 30);
        assert!(config.fhir.tls_verify);
        assert_eq!(config.dispatch.queue_capacity, 256);
        assert_eq!(config.dispatch.workers, 4);
        assert_eq!(config.logging.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = valid_config();
        config.application.log_level = "verbose".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log_level"));
    }

    #[test]
    fn test_base_url_must_be_valid_url() {
        let mut config = valid_config();
        config.fhir.base_url = "not a url".to_string();
        assert!(config.validate().unwrap_err().contains("not a valid URL"));

        config.fhir.base_url = "ftp://fhir.example.com".to_string();
        assert!(config
            .validate()
            .unwrap_err()
            .contains("must use http or https"));

        config.fhir.base_url = String::new();
        assert!(config.validate().unwrap_err().contains("cannot be empty"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid_config();
        config.fhir.timeout_seconds = 0;
        assert!(config
            .validate()
            .unwrap_err()
            .contains("timeout_seconds must be > 0"));
    }

    #[test]
    fn test_credentials_must_travel_together() {
        let mut config = valid_config();
        config.fhir.username = Some("interface".to_string());
        assert!(config
            .validate()
            .unwrap_err()
            .contains("fhir.password is required"));

        config.fhir.username = None;
        config.fhir.password = Some(secret_string("s3cret".to_string()));
        assert!(config
            .validate()
            .unwrap_err()
            .contains("fhir.username is required"));

        config.fhir.username = Some("interface".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let mut config = valid_config();
        config.fhir.username = Some(String::new());
        config.fhir.password = Some(secret_string("s3cret".to_string()));
        assert!(config
            .validate()
            .unwrap_err()
            .contains("fhir.username cannot be empty"));

        config.fhir.username = Some("interface".to_string());
        config.fhir.password = Some(secret_string(String::new()));
        assert!(config
            .validate()
            .unwrap_err()
            .contains("fhir.password cannot be empty"));
    }

    #[test]
    fn test_dispatch_bounds() {
        let mut config = valid_config();
        config.dispatch.queue_capacity = 0;
        assert!(config
            .validate()
            .unwrap_err()
            .contains("queue_capacity must be > 0"));

        config.dispatch.queue_capacity = 256;
        config.dispatch.workers = 0;
        assert!(config.validate().unwrap_err().contains("dispatch.workers"));

        config.dispatch.workers = 65;
        assert!(config.validate().unwrap_err().contains("dispatch.workers"));
    }

    #[test]
    fn test_logging_rotation_validated() {
        let mut config = valid_config();
        config.logging.local_rotation = "hourly".to_string();
        assert!(config
            .validate()
            .unwrap_err()
            .contains("Invalid logging.local_rotation"));

        config.logging.local_rotation = "size".to_string();
        config.logging.local_max_size_mb = 0;
        assert!(config
            .validate()
            .unwrap_err()
            .contains("local_max_size_mb must be > 0"));
    }

    #[test]
    fn test_password_not_leaked_by_debug() {
        let mut config = valid_config();
        config.fhir.username = Some("interface".to_string());
        config.fhir.password = Some(secret_string("hunter2".to_string()));

        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }
}
