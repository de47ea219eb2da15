//! Domain error types
//!
//! This module defines the error hierarchy for Triage. All errors are
//! domain-specific and don't expose third-party types: reqwest and serde
//! failures are converted to strings at the adapter boundary.
//!
//! Expected processing failures (a message that fails to parse or to
//! validate) are *not* errors — they are reported through
//! [`ProcessingOutcome`](crate::domain::outcome::ProcessingOutcome) so
//! callers branch on status instead of catching faults. The types here
//! cover configuration, I/O, and dispatch faults plus the parse errors
//! the tokenizer produces internally.

use thiserror::Error;

/// Main Triage error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum TriageError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Message tokenization errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// FHIR dispatch errors
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Unexpected internal faults
    ///
    /// Deliberately opaque: the payload is a short description, never
    /// internal state. Boundaries convert these into a generic
    /// internal-error response rather than crashing the service.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Tokenizer errors
///
/// Produced when raw text cannot be turned into a [`Message`]. A parse
/// failure is fatal to that submission only; it is reported to the caller
/// as a `parsing_failed` outcome and never reaches validation or dispatch.
///
/// [`Message`]: crate::hl7::Message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No segment content survived line-ending normalization and trimming
    #[error("message is empty after trimming")]
    EmptyMessage,

    /// The first segment is not an MSH header
    #[error("message does not begin with an MSH header segment")]
    MissingHeader,

    /// The MSH header ends before all four delimiters are declared
    #[error("MSH header too short to declare delimiters: {0:?}")]
    HeaderTooShort(String),
}

/// FHIR dispatch errors
///
/// Errors that occur while forwarding a validated message to the
/// downstream FHIR endpoint. These occur only after the caller has
/// already received a `processed` result; they are logged, not retried,
/// and never surfaced synchronously.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Failed to reach the FHIR endpoint
    #[error("failed to connect to FHIR endpoint: {0}")]
    ConnectionFailed(String),

    /// The endpoint answered with a non-2xx status
    #[error("FHIR endpoint rejected bundle: status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The delivery did not complete within the per-dispatch timeout
    #[error("dispatch timed out after {0}s")]
    Timeout(u64),

    /// The dispatch queue is at capacity; the job was dropped
    #[error("dispatch queue full, job dropped")]
    QueueFull,

    /// The dispatcher has been shut down; no further jobs are accepted
    #[error("dispatcher is shut down")]
    ShutDown,
}

// Conversion from std::io::Error
impl From<std::io::Error> for TriageError {
    fn from(err: std::io::Error) -> Self {
        TriageError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TriageError {
    fn from(err: serde_json::Error) -> Self {
        TriageError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TriageError {
    fn from(err: toml::de::Error) -> Self {
        TriageError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triage_error_display() {
        let err = TriageError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse_err = ParseError::MissingHeader;
        let err: TriageError = parse_err.into();
        assert!(matches!(err, TriageError::Parse(_)));
    }

    #[test]
    fn test_dispatch_error_conversion() {
        let dispatch_err = DispatchError::Rejected {
            status: 500,
            body: "server error".to_string(),
        };
        let err: TriageError = dispatch_err.into();
        assert!(matches!(err, TriageError::Dispatch(_)));
        assert!(err.to_string().contains("status 500"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: TriageError = io_err.into();
        assert!(matches!(err, TriageError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: TriageError = json_err.into();
        assert!(matches!(err, TriageError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: TriageError = toml_err.into();
        assert!(matches!(err, TriageError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_parse_error_header_too_short() {
        let err = ParseError::HeaderTooShort("MSH|^".to_string());
        assert!(err.to_string().contains("MSH|^"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let _: &dyn std::error::Error = &TriageError::Internal("x".to_string());
        let _: &dyn std::error::Error = &ParseError::EmptyMessage;
        let _: &dyn std::error::Error = &DispatchError::QueueFull;
    }
}
