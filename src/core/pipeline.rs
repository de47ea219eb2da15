//! Message processing pipeline
//!
//! Runs one submission through the synchronous stages: tokenize the raw
//! HL7 content, extract the clinical summary, validate it against the
//! supported message families, and report a [`ProcessingOutcome`]. When a
//! dispatch handle is attached, accepted messages are additionally queued
//! for asynchronous delivery to the FHIR endpoint; dispatch never affects
//! the outcome the caller sees.

use crate::adapters::fhir::{DispatchHandle, DispatchJob};
use crate::core::extract::extract_summary;
use crate::core::validate::Validator;
use crate::domain::ids::CorrelationId;
use crate::domain::outcome::ProcessingOutcome;
use crate::domain::submission::MessageSubmission;
use crate::hl7::Tokenizer;

/// Synchronous HL7 message processor
///
/// Stateless apart from its collaborators; one instance can process any
/// number of submissions. Construct with [`MessageProcessor::new`] for
/// validate-only runs (dry run, inspection) and attach a dispatch handle
/// with [`MessageProcessor::with_dispatch`] to forward accepted messages.
///
/// # Examples
///
/// ```
/// use triage::core::MessageProcessor;
/// use triage::domain::MessageSubmission;
///
/// let processor = MessageProcessor::new();
/// let submission = MessageSubmission::new(
///     "ADT^A01",
///     "MSH|^~\\&|SENDAPP|FAC|||20240115103000||ADT^A01|MSG001|P|2.5\rPID|1||PT42",
/// );
///
/// let outcome = processor.process(submission);
/// assert!(outcome.success);
/// ```
#[derive(Default)]
pub struct MessageProcessor {
    tokenizer: Tokenizer,
    validator: Validator,
    dispatch: Option<DispatchHandle>,
}

impl MessageProcessor {
    /// Creates a processor that validates but does not dispatch
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            validator: Validator::new(),
            dispatch: None,
        }
    }

    /// Attaches a dispatch handle; accepted messages are queued on it
    pub fn with_dispatch(mut self, handle: DispatchHandle) -> Self {
        self.dispatch = Some(handle);
        self
    }

    /// Processes one submission end to end
    ///
    /// Always returns an outcome; parse and validation problems are
    /// reported in it rather than as errors. The stages run synchronously
    /// and perform no I/O.
    pub fn process(&self, submission: MessageSubmission) -> ProcessingOutcome {
        let correlation_id = submission
            .correlation_id
            .as_deref()
            .and_then(|id| CorrelationId::new(id).ok())
            .unwrap_or_else(CorrelationId::generate);

        tracing::info!(
            correlation_id = %correlation_id,
            message_type = %submission.message_type,
            source_system = submission.source_system.as_deref().unwrap_or("-"),
            "Processing HL7 message"
        );

        let message = match self.tokenizer.tokenize(&submission.content) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(
                    correlation_id = %correlation_id,
                    error = %e,
                    "Failed to parse HL7 message"
                );
                return ProcessingOutcome::parsing_failed(correlation_id, e.to_string());
            }
        };

        let summary = extract_summary(&message);

        let violations = self.validator.validate(&submission.message_type, &summary);
        if !violations.is_empty() {
            tracing::warn!(
                correlation_id = %correlation_id,
                message_type = %submission.message_type,
                violations = violations.len(),
                "Message failed validation"
            );
            let errors = violations.iter().map(ToString::to_string).collect();
            return ProcessingOutcome::validation_failed(correlation_id, errors);
        }

        if let Some(dispatch) = &self.dispatch {
            let job = DispatchJob {
                correlation_id: correlation_id.clone(),
                message_type: submission.message_type.clone(),
                summary: summary.clone(),
            };
            // Fire-and-forget: a full or closed queue drops the bundle
            // without touching the outcome.
            if let Err(e) = dispatch.enqueue(job) {
                tracing::warn!(
                    correlation_id = %correlation_id,
                    error = %e,
                    "Dropping bundle, dispatch queue unavailable"
                );
            } else {
                tracing::debug!(
                    correlation_id = %correlation_id,
                    "Bundle queued for FHIR dispatch"
                );
            }
        }

        tracing::info!(
            correlation_id = %correlation_id,
            message_type = %submission.message_type,
            "Message processed successfully"
        );
        ProcessingOutcome::processed(correlation_id, summary)
    }
}
