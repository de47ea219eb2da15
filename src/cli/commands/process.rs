//! Process command implementation
//!
//! This module implements the `process` command: run HL7 message files (or
//! stdin) through the pipeline, print each outcome, and forward accepted
//! messages to the configured FHIR endpoint.

use crate::adapters::fhir::{Dispatcher, FhirClient};
use crate::config::load_config;
use crate::core::MessageProcessor;
use crate::domain::{MessageSubmission, ProcessingOutcome};
use crate::hl7::parse_message;
use clap::Args;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// HL7 message files to process (one message per file); reads stdin
    /// when omitted
    pub files: Vec<PathBuf>,

    /// Declared message type (e.g. ADT^A01); derived from MSH-9 when omitted
    #[arg(short, long)]
    pub message_type: Option<String>,

    /// Validate only - do not forward messages to the FHIR endpoint
    #[arg(long)]
    pub no_dispatch: bool,
}

impl ProcessArgs {
    /// Execute the process command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting process command");

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Read all inputs before starting the dispatcher so an unreadable
        // file fails fast.
        let inputs = match self.read_inputs() {
            Ok(inputs) => inputs,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input");
                eprintln!("Failed to read input: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        let dispatch_enabled = !self.no_dispatch && !config.application.dry_run;
        if !dispatch_enabled {
            tracing::info!("Dispatch disabled - messages will not be forwarded");
            println!("🔍 VALIDATE-ONLY MODE - Messages will not be forwarded");
            println!();
        }

        let dispatcher = if dispatch_enabled {
            let client = Arc::new(FhirClient::new(config.fhir.clone()));
            Some(Dispatcher::new(client, &config.dispatch))
        } else {
            None
        };

        let mut processor = MessageProcessor::new();
        if let Some(dispatcher) = &dispatcher {
            processor = processor.with_dispatch(dispatcher.handle());
        }

        let mut succeeded = 0usize;
        let mut failed = 0usize;
        let mut interrupted = false;

        for (label, content) in inputs {
            if *shutdown_signal.borrow() {
                tracing::info!("Shutdown signal received, stopping input processing");
                interrupted = true;
                break;
            }

            let declared_type = self.declared_type(&content);
            let submission = MessageSubmission::new(declared_type, content);
            let outcome = processor.process(submission);

            if outcome.success {
                succeeded += 1;
            } else {
                failed += 1;
            }
            print_outcome(&label, &outcome)?;
        }

        // Drop our enqueue handle so the queue can close, then drain.
        drop(processor);
        if let Some(dispatcher) = dispatcher {
            println!("📤 Draining dispatch queue...");
            dispatcher.shutdown().await;
        }

        println!();
        println!("📊 Processing Summary:");
        println!("  Succeeded: {succeeded}");
        println!("  Failed: {failed}");
        println!();

        let exit_code = if interrupted {
            println!("⚠️  Processing interrupted. Remaining inputs were skipped.");
            130 // SIGINT exit code (standard Unix convention)
        } else if failed > 0 {
            println!("⚠️  Completed with failures");
            1
        } else {
            println!("✅ All messages processed successfully!");
            0
        };

        Ok(exit_code)
    }

    /// Reads all message inputs as (label, content) pairs
    fn read_inputs(&self) -> std::io::Result<Vec<(String, String)>> {
        if self.files.is_empty() {
            let content = std::io::read_to_string(std::io::stdin())?;
            return Ok(vec![("stdin".to_string(), content)]);
        }

        self.files
            .iter()
            .map(|path| {
                fs::read_to_string(path).map(|content| (path.display().to_string(), content))
            })
            .collect()
    }

    /// Resolves the declared message type for one submission
    ///
    /// An explicit `--message-type` wins; otherwise the type is read from
    /// the message's own MSH-9. Unparseable content yields an empty type,
    /// which the pipeline then reports against.
    fn declared_type(&self, content: &str) -> String {
        if let Some(message_type) = &self.message_type {
            return message_type.clone();
        }

        parse_message(content)
            .ok()
            .and_then(|message| {
                message
                    .segment("MSH")
                    .and_then(|msh| msh.field_value(9))
                    .map(str::to_string)
            })
            .unwrap_or_default()
    }
}

fn print_outcome(label: &str, outcome: &ProcessingOutcome) -> anyhow::Result<()> {
    let icon = if outcome.success { "✅" } else { "❌" };
    println!("{icon} {label}: {}", outcome.message);
    println!("{}", serde_json::to_string_pretty(outcome)?);
    println!();
    Ok(())
}
