//! Processing outcome record
//!
//! The record returned by the synchronous pipeline path. Expected failure
//! modes (parse failure, validation failure) are statuses in this record,
//! not thrown errors, so callers branch on [`ProcessingStatus`] instead of
//! catching faults.

use super::ids::CorrelationId;
use super::summary::ClinicalSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal status of one submission's synchronous path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    /// Parsed, extracted, validated; handed to the dispatcher
    Processed,
    /// Parsed but one or more validation rules failed
    ValidationFailed,
    /// The tokenizer could not produce a message
    ParsingFailed,
}

impl ProcessingStatus {
    /// Returns the snake_case wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Processed => "processed",
            ProcessingStatus::ValidationFailed => "validation_failed",
            ProcessingStatus::ParsingFailed => "parsing_failed",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of processing one submission
///
/// `processed_data` is present only on [`ProcessingStatus::Processed`];
/// `errors` carries the violation texts or the parse-error text on
/// failure. A dispatch failure happening later never rewrites an outcome
/// that has already been returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingOutcome {
    /// Convenience flag, true only for `processed`
    pub success: bool,

    /// Correlation identifier for this submission
    pub correlation_id: CorrelationId,

    /// Terminal status of the synchronous path
    pub status: ProcessingStatus,

    /// Human-readable description of the outcome
    pub message: String,

    /// Extracted clinical summary, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_data: Option<ClinicalSummary>,

    /// Violation or parse-error texts, present only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,

    /// When the synchronous path completed
    pub processed_at: DateTime<Utc>,
}

impl ProcessingOutcome {
    /// Builds a `processed` outcome carrying the extracted summary
    pub fn processed(correlation_id: CorrelationId, summary: ClinicalSummary) -> Self {
        Self {
            success: true,
            correlation_id,
            status: ProcessingStatus::Processed,
            message: "Message processed successfully".to_string(),
            processed_data: Some(summary),
            errors: None,
            processed_at: Utc::now(),
        }
    }

    /// Builds a `validation_failed` outcome from rendered violation texts
    pub fn validation_failed(correlation_id: CorrelationId, errors: Vec<String>) -> Self {
        Self {
            success: false,
            correlation_id,
            status: ProcessingStatus::ValidationFailed,
            message: "Message validation failed".to_string(),
            processed_data: None,
            errors: Some(errors),
            processed_at: Utc::now(),
        }
    }

    /// Builds a `parsing_failed` outcome from the parse-error text
    pub fn parsing_failed(correlation_id: CorrelationId, error: String) -> Self {
        Self {
            success: false,
            correlation_id,
            status: ProcessingStatus::ParsingFailed,
            message: format!("Failed to parse HL7 message: {error}"),
            processed_data: None,
            errors: Some(vec![error]),
            processed_at: Utc::now(),
        }
    }
}
