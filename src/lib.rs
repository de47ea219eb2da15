// Triage - HL7v2 Message Processor
// Copyright (c) 2025 Triage Contributors
// Licensed under the MIT License

//! # Triage - HL7v2 Message Processing
//!
//! Triage is an HL7v2 message processor built in Rust that parses pipe-delimited
//! clinical messages, extracts a structured clinical summary, validates it against
//! the supported message families, and forwards accepted messages to a FHIR
//! endpoint as bundles.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Parsing** HL7v2 messages with their declared delimiters and escape sequences
//! - **Extracting** patient, event, and header fields into a clinical summary
//! - **Validating** messages against the supported message-type families
//! - **Forwarding** accepted messages to a FHIR endpoint, asynchronously and
//!   fire-and-forget
//!
//! ## Architecture
//!
//! Triage follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (pipeline, extraction, validation)
//! - [`hl7`] - HL7v2 tokenizer and message model
//! - [`adapters`] - External integrations (FHIR endpoint, dispatch queue)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use triage::core::MessageProcessor;
//! use triage::domain::MessageSubmission;
//!
//! let processor = MessageProcessor::new();
//!
//! let submission = MessageSubmission::new(
//!     "ADT^A01",
//!     "MSH|^~\\&|EPIC|HOSP|||20240115103000||ADT^A01|MSG001|P|2.5\r\
//!      PID|1||PT42||Doe^John||19800101|M",
//! );
//!
//! let outcome = processor.process(submission);
//! assert!(outcome.success);
//! ```
//!
//! ## Message Parsing
//!
//! The tokenizer honors the delimiters each message declares in its MSH
//! header, so messages using non-standard separators parse the same way:
//!
//! ```rust
//! use triage::hl7::parse_message;
//!
//! let message = parse_message("MSH|^~\\&|SENDER\rPID|1||PT42").unwrap();
//!
//! let pid = message.segment("PID").unwrap();
//! assert_eq!(pid.field_value(3), Some("PT42"));
//! ```
//!
//! ## Error Handling
//!
//! Triage uses the [`domain::TriageError`] type for all errors:
//!
//! ```rust
//! use triage::domain::Result;
//! use triage::hl7::parse_message;
//!
//! fn parse(raw: &str) -> Result<()> {
//!     // ParseError converts automatically via the ? operator
//!     parse_message(raw)?;
//!     Ok(())
//! }
//!
//! assert!(parse("not hl7").is_err());
//! ```
//!
//! ## Logging
//!
//! Triage uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting message processing");
//! warn!(message_type = "ZZZ^Z01", "Unsupported message type");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod hl7;
pub mod logging;
