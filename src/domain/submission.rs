//! Message submission record
//!
//! The input record a caller hands to the pipeline: a declared message-type
//! label, the raw HL7v2 content, and optional routing and correlation
//! metadata.

use serde::{Deserialize, Serialize};

/// One submitted HL7v2 message
///
/// The `message_type` is the *declared* type label (e.g. `ADT^A01`) the
/// caller attaches to the submission; the validator checks it against the
/// supported families. `source_system` and `destination_system` are
/// pass-through identifiers for observability and are not interpreted by
/// the pipeline.
///
/// # Examples
///
/// ```
/// use triage::domain::submission::MessageSubmission;
///
/// let submission = MessageSubmission::new("ADT^A01", "MSH|^~\\&|...")
///     .with_source_system("epic-bridge")
///     .with_correlation_id("msg-42");
///
/// assert_eq!(submission.message_type, "ADT^A01");
/// assert_eq!(submission.source_system.as_deref(), Some("epic-bridge"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSubmission {
    /// Declared HL7 message type (e.g. `ADT^A01`)
    pub message_type: String,

    /// Raw HL7 message content
    pub content: String,

    /// Source system identifier
    #[serde(default)]
    pub source_system: Option<String>,

    /// Destination system identifier
    #[serde(default)]
    pub destination_system: Option<String>,

    /// Caller-supplied correlation identifier; generated when absent
    #[serde(default)]
    pub correlation_id: Option<String>,
}

impl MessageSubmission {
    /// Creates a new submission with the required fields
    pub fn new(message_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            message_type: message_type.into(),
            content: content.into(),
            source_system: None,
            destination_system: None,
            correlation_id: None,
        }
    }

    /// Sets the source system identifier
    pub fn with_source_system(mut self, source: impl Into<String>) -> Self {
        self.source_system = Some(source.into());
        self
    }

    /// Sets the destination system identifier
    pub fn with_destination_system(mut self, destination: impl Into<String>) -> Self {
        self.destination_system = Some(destination.into());
        self
    }

    /// Sets the caller-supplied correlation identifier
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }
}
