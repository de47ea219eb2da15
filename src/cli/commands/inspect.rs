//! Inspect command implementation
//!
//! This module implements the `inspect` command: parse one HL7 message and
//! print the delimiters it declares and its segment/field breakdown. A
//! diagnostic view of what the tokenizer sees, independent of validation.

use crate::hl7::parse_message;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// HL7 message file to inspect; reads stdin when omitted
    pub file: Option<PathBuf>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let (label, content) = match &self.file {
            Some(path) => (path.display().to_string(), fs::read_to_string(path)?),
            None => (
                "stdin".to_string(),
                std::io::read_to_string(std::io::stdin())?,
            ),
        };

        tracing::info!(input = %label, "Inspecting message");
        println!("🔍 Inspecting message: {label}");
        println!();

        let message = match parse_message(&content) {
            Ok(message) => message,
            Err(e) => {
                println!("❌ Failed to parse message");
                println!("   Error: {e}");
                return Ok(1);
            }
        };

        let d = message.delimiters();
        println!("Delimiters:");
        println!(
            "  field: '{}'  component: '{}'  repetition: '{}'  escape: '{}'  subcomponent: '{}'",
            d.field, d.component, d.repetition, d.escape, d.subcomponent
        );
        println!();

        println!("Segments: {}", message.segments().len());
        for (position, segment) in message.segments().iter().enumerate() {
            println!(
                "  {}. {} ({} fields)",
                position + 1,
                segment.name(),
                segment.field_count()
            );

            for index in 1..=segment.field_count() {
                let Some(field) = segment.field(index) else {
                    continue;
                };
                if field.is_empty() {
                    continue;
                }

                if field.repetitions().len() > 1 {
                    for (r, repetition) in field.repetitions().iter().enumerate() {
                        println!(
                            "     {}-{}[{}] = {}",
                            segment.name(),
                            index,
                            r + 1,
                            repetition.value()
                        );
                    }
                } else {
                    println!("     {}-{} = {}", segment.name(), index, field.value());
                }
            }
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_args_stdin_default() {
        let args = InspectArgs { file: None };
        assert!(args.file.is_none());
    }
}
