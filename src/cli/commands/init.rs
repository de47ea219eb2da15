//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "triage.toml")]
    pub output: String,

    /// Include example values and comments
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

        println!("📝 Initializing Triage configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        // Generate configuration content
        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        // Write to file
        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your FHIR endpoint", self.output);
                println!("  2. If the endpoint requires authentication, create a .env file:");
                println!("     - Set TRIAGE_FHIR_USERNAME and TRIAGE_FHIR_PASSWORD");
                println!("     - Uncomment the username/password lines in the config");
                println!("  3. Validate configuration: triage validate-config");
                println!("  4. Process a message: triage process message.hl7");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Triage Configuration File
# HL7v2 Message Processor

[application]
log_level = "info"
dry_run = false

[fhir]
base_url = "https://fhir.example.com"
timeout_seconds = 30

# Authentication (optional; uncomment and set the env vars to enable)
# username = "${TRIAGE_FHIR_USERNAME}"
# password = "${TRIAGE_FHIR_PASSWORD}"

# TLS settings
tls_verify = true

[dispatch]
queue_capacity = 256
workers = 4
shutdown_grace_seconds = 5

[logging]
local_enabled = true
local_path = "logs"
local_rotation = "daily"
local_max_size_mb = 100
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Triage Configuration File
# HL7v2 Message Processor
#
# This file contains all configuration options with examples and explanations.
#
# Values of the form ${VAR_NAME} are substituted from the environment at
# load time; use them for credentials instead of hard-coding secrets.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (parse and validate but never dispatch)
dry_run = false

# ============================================================================
# FHIR Endpoint Configuration
# ============================================================================
[fhir]
# Base URL of the FHIR server; bundles are POSTed to {base_url}/fhir/Bundle
base_url = "https://fhir.example.com"

# Per-dispatch request timeout in seconds
timeout_seconds = 30

# Username for Basic Authentication (use environment variable)
# username = "${TRIAGE_FHIR_USERNAME}"

# Password for Basic Authentication (use environment variable)
# password = "${TRIAGE_FHIR_PASSWORD}"

# TLS/SSL verification (never disable in production)
tls_verify = true

# ============================================================================
# Dispatch Configuration
# ============================================================================
[dispatch]
# Bounded queue capacity; a full queue drops new bundles with a warning
queue_capacity = 256

# Number of background delivery workers (1-64)
workers = 4

# Seconds to wait for in-flight deliveries on shutdown
shutdown_grace_seconds = 5

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local file logging
local_enabled = true

# Local log directory
local_path = "logs"

# Log rotation (daily or size)
local_rotation = "daily"

# Maximum log file size in MB
local_max_size_mb = 100
"#
        .to_string()
    }
}
