//! Domain models and types for Triage.
//!
//! This module contains the core domain models, types, and business rules for
//! Triage. All types follow the Microsoft Rust Guidelines (TR-6.1 - TR-6.10)
//! for type safety, error handling, and API design.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CorrelationId`])
//! - **Domain models** ([`MessageSubmission`], [`ClinicalSummary`], [`ProcessingOutcome`])
//! - **Error types** ([`TriageError`], [`ParseError`], [`DispatchError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, TriageError>`]:
//!
//! ```rust
//! use triage::domain::{Result, TriageError};
//!
//! fn example() -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     let config = triage::config::load_config("triage.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! # Outcomes versus errors
//!
//! A message that fails to parse or fails validation is an *expected*
//! outcome, not a fault: the pipeline reports it through
//! [`ProcessingOutcome`] with a status of `parsing_failed` or
//! `validation_failed`. [`TriageError`] is reserved for infrastructure
//! faults such as unreadable config files or an exhausted dispatch queue.
//!
//! # Builder Pattern
//!
//! Submissions use builder-style methods for optional context:
//!
//! ```rust
//! use triage::domain::MessageSubmission;
//!
//! let submission = MessageSubmission::new(
//!     "ADT^A01",
//!     "MSH|^~\\&|SYS1|FAC1|SYS2|FAC2|20240101120000||ADT^A01|MSG001|P|2.3",
//! )
//! .with_source_system("registration")
//! .with_correlation_id("case-42");
//! ```

pub mod errors;
pub mod ids;
pub mod outcome;
pub mod result;
pub mod submission;
pub mod summary;

// Re-export commonly used types for convenience
pub use errors::{DispatchError, ParseError, TriageError};
pub use ids::CorrelationId;
pub use outcome::{ProcessingOutcome, ProcessingStatus};
pub use result::Result;
pub use submission::MessageSubmission;
pub use summary::{ClinicalSummary, EventSummary, HeaderSummary, PatientSummary};
