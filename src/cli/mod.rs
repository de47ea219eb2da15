//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Triage using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Triage - HL7v2 Message Processor
#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(version, about, long_about = None)]
#[command(author = "Triage Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "triage.toml", env = "TRIAGE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TRIAGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process HL7 messages and forward them to the FHIR endpoint
    Process(commands::process::ProcessArgs),

    /// Parse a message and print its structure
    Inspect(commands::inspect::InspectArgs),

    /// List the supported message types
    SupportedTypes(commands::types::SupportedTypesArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_process() {
        let cli = Cli::parse_from(["triage", "process", "msg.hl7"]);
        assert_eq!(cli.config, "triage.toml");
        assert!(matches!(cli.command, Commands::Process(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["triage", "--config", "custom.toml", "supported-types"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["triage", "--log-level", "debug", "supported-types"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_inspect() {
        let cli = Cli::parse_from(["triage", "inspect", "msg.hl7"]);
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn test_cli_parse_supported_types() {
        let cli = Cli::parse_from(["triage", "supported-types"]);
        assert!(matches!(cli.command, Commands::SupportedTypes(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["triage", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["triage", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
