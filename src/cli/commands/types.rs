//! Supported-types command implementation
//!
//! This module implements the `supported-types` command: list the HL7
//! message families the pipeline accepts.

use crate::core::SUPPORTED_MESSAGE_TYPES;
use clap::Args;

/// Arguments for the supported-types command
#[derive(Args, Debug)]
pub struct SupportedTypesArgs {}

impl SupportedTypesArgs {
    /// Execute the supported-types command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        println!("📋 Supported message types:");
        println!();
        for family in SUPPORTED_MESSAGE_TYPES {
            println!("  {:<8} {}", family.code, family.description);
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_types_args_creation() {
        let args = SupportedTypesArgs {};
        let _ = format!("{args:?}");
    }
}
