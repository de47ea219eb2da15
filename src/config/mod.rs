//! Configuration management for Triage.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Triage uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - Environment variable overrides (`TRIAGE_*` prefix)
//! - Comprehensive validation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use triage::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("triage.toml")?;
//!
//! println!("FHIR endpoint: {}", config.fhir.base_url);
//! println!("Dispatch workers: {}", config.dispatch.workers);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level, dry run)
//! - [`FhirConfig`] - FHIR endpoint connection and authentication
//! - [`DispatchConfig`] - Dispatch queue capacity and worker pool
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [fhir]
//! base_url = "https://fhir.example.com"
//! username = "interface-engine"
//! password = "${TRIAGE_FHIR_PASSWORD}"
//! timeout_seconds = 30
//!
//! [dispatch]
//! queue_capacity = 256
//! workers = 4
//! ```
//!
//! # Environment Variables
//!
//! Use `${VAR_NAME}` syntax for environment variable substitution, and
//! `TRIAGE_<SECTION>_<KEY>` variables to override individual values:
//!
//! ```bash
//! export TRIAGE_FHIR_PASSWORD="secret-password"
//! export TRIAGE_DISPATCH_WORKERS=8
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{ApplicationConfig, DispatchConfig, FhirConfig, LoggingConfig, TriageConfig};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
