//! HL7v2 wire-format parsing
//!
//! This module turns pipe-delimited HL7v2 text into a structured
//! [`Message`]. It is deliberately self-contained: no I/O, no knowledge of
//! validation rules or downstream delivery, and no panics on malformed
//! input — a bad message is a [`ParseError`](crate::domain::ParseError)
//! value, nothing more.
//!
//! # Overview
//!
//! - [`Delimiters`] — the per-message delimiter set declared in the MSH
//!   header
//! - [`Tokenizer`] / [`parse_message`] — raw text to [`Message`]
//! - [`Message`], [`Segment`], [`Field`] — the parsed model with 1-based
//!   field access and lossless rendering back to wire form
//! - [`escape`] — escape-sequence decoding applied at the field-tree
//!   leaves
//!
//! # Example
//!
//! ```rust
//! use triage::hl7::parse_message;
//!
//! # fn example() -> Result<(), triage::domain::ParseError> {
//! let msg = parse_message("MSH|^~\\&|SYS1|FAC1|SYS2|FAC2|20240101120000||ADT^A01|MSG001|P|2.3")?;
//!
//! let msh = msg.segment("MSH").unwrap();
//! assert_eq!(msh.field_value(9), Some("ADT^A01"));
//! assert_eq!(msh.field_value(10), Some("MSG001"));
//! # Ok(())
//! # }
//! ```

pub mod delimiters;
pub mod escape;
pub mod message;
pub mod tokenizer;

// Re-export commonly used types for convenience
pub use delimiters::Delimiters;
pub use message::{Component, Field, Message, Repetition, Segment};
pub use tokenizer::{parse_message, Tokenizer};
