//! Core business logic for Triage.
//!
//! This module contains the synchronous message-processing stages and the
//! pipeline that orchestrates them.
//!
//! # Modules
//!
//! - [`pipeline`] - End-to-end processing of one submission
//! - [`extract`] - Clinical summary extraction from parsed messages
//! - [`validate`] - Message family support and required-field rules
//!
//! # Processing Workflow
//!
//! The pipeline runs each submission through fixed stages:
//!
//! 1. **Tokenize**: Parse the raw HL7v2 content into segments and fields
//! 2. **Extract**: Pull the MSH, PID, and EVN fields into a clinical summary
//! 3. **Validate**: Check the declared type and required fields
//! 4. **Report**: Build the [`ProcessingOutcome`](crate::domain::ProcessingOutcome)
//! 5. **Dispatch** (optional): Queue accepted messages for FHIR delivery
//!
//! Stages 1-4 are synchronous and perform no I/O; dispatch is
//! fire-and-forget and never changes the reported outcome.
//!
//! # Example
//!
//! ```rust
//! use triage::core::MessageProcessor;
//! use triage::domain::MessageSubmission;
//!
//! let processor = MessageProcessor::new();
//!
//! let submission = MessageSubmission::new(
//!     "ADT^A01",
//!     "MSH|^~\\&|EPIC|HOSP|||20240115103000||ADT^A01|MSG001|P|2.5\rPID|1||PT42",
//! );
//!
//! let outcome = processor.process(submission);
//! assert!(outcome.success);
//! ```

pub mod extract;
pub mod pipeline;
pub mod validate;

pub use extract::extract_summary;
pub use pipeline::MessageProcessor;
pub use validate::{MessageFamily, Validator, Violation, SUPPORTED_MESSAGE_TYPES};
