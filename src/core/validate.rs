//! Message validation rules
//!
//! Validation runs against the declared message type and the extracted
//! [`ClinicalSummary`], never against raw text. The rules live in const
//! tables so adding a requirement means adding a row, not another branch;
//! evaluation walks the tables in order, which makes the violation order
//! deterministic for identical inputs.

use crate::domain::summary::{ClinicalSummary, HeaderSummary};
use std::fmt;

/// A single validation rule failure
///
/// Pairs the field path the rule is anchored to (`MSH.9`, `PID.3`) with a
/// human-readable reason. Zero violations means the message is eligible
/// for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field path the rule is anchored to
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

impl Violation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// One supported message family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageFamily {
    /// Declared type code, `type^trigger` form
    pub code: &'static str,
    /// Short human-readable description
    pub description: &'static str,
}

/// The message families this engine accepts
pub const SUPPORTED_MESSAGE_TYPES: [MessageFamily; 6] = [
    MessageFamily {
        code: "ADT^A01",
        description: "Admit/Visit Notification",
    },
    MessageFamily {
        code: "ADT^A08",
        description: "Update Patient Information",
    },
    MessageFamily {
        code: "ORM^O01",
        description: "Order Message",
    },
    MessageFamily {
        code: "ORU^R01",
        description: "Observation Result",
    },
    MessageFamily {
        code: "SIU^S12",
        description: "New Appointment Booking",
    },
    MessageFamily {
        code: "DFT^P03",
        description: "Post Detail Financial Transaction",
    },
];

/// True when the declared type is one of the supported families
pub fn is_supported(declared_type: &str) -> bool {
    SUPPORTED_MESSAGE_TYPES
        .iter()
        .any(|family| family.code == declared_type)
}

/// Header completeness rule: one required MSH-derived summary field
struct HeaderRule {
    field_path: &'static str,
    summary_key: &'static str,
    accessor: fn(&HeaderSummary) -> Option<&str>,
}

const HEADER_RULES: [HeaderRule; 3] = [
    HeaderRule {
        field_path: "MSH.3",
        summary_key: "sending_application",
        accessor: |header| header.sending_application.as_deref(),
    },
    HeaderRule {
        field_path: "MSH.9",
        summary_key: "message_type",
        accessor: |header| header.message_type.as_deref(),
    },
    HeaderRule {
        field_path: "MSH.10",
        summary_key: "message_control_id",
        accessor: |header| header.message_control_id.as_deref(),
    },
];

/// Family-conditional rule, selected by declared-type prefix
struct FamilyRule {
    type_prefix: &'static str,
    field_path: &'static str,
    message: &'static str,
    satisfied: fn(&ClinicalSummary) -> bool,
}

const FAMILY_RULES: [FamilyRule; 1] = [FamilyRule {
    type_prefix: "ADT",
    field_path: "PID.3",
    message: "Patient ID is required for ADT messages",
    satisfied: |summary| present(summary.patient_info.patient_id.as_deref()),
}];

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Rule-table validator
///
/// Pure: the same declared type and summary always produce the same
/// violations in the same order, and nothing is mutated. An unsupported
/// type does not short-circuit the remaining rules.
#[derive(Debug, Clone, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates every rule against the declared type and summary
    ///
    /// Order: unsupported-type first, then the header rules, then the
    /// family rules, each in table order.
    pub fn validate(&self, declared_type: &str, summary: &ClinicalSummary) -> Vec<Violation> {
        let mut violations = Vec::new();

        if !is_supported(declared_type) {
            violations.push(Violation::new(
                "MSH.9",
                format!("Unsupported message type: {declared_type}"),
            ));
        }

        for rule in &HEADER_RULES {
            if !present((rule.accessor)(&summary.message_header)) {
                violations.push(Violation::new(
                    rule.field_path,
                    format!("Missing required MSH field: {}", rule.summary_key),
                ));
            }
        }

        for rule in &FAMILY_RULES {
            if declared_type.starts_with(rule.type_prefix) && !(rule.satisfied)(summary) {
                violations.push(Violation::new(rule.field_path, rule.message));
            }
        }

        violations
    }
}
