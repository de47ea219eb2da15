//! Extracted clinical summary model
//!
//! This module defines the flattened, named-field view of a parsed HL7v2
//! message: the header, patient, and event attributes pulled out of the
//! MSH, PID, and EVN segments by fixed positional rules.
//!
//! A summary is computed once per message by
//! [`extract_summary`](crate::core::extract::extract_summary), is immutable
//! afterwards, and is discarded once validation and dispatch complete —
//! nothing in this core persists it. Every attribute is optional: a missing
//! segment or field yields `None`, never a default value. Whether an absent
//! attribute is a problem is the validator's call, not the extractor's.

use serde::{Deserialize, Serialize};

/// Flattened view of the clinical content of one message
///
/// The serialized form uses the same snake_case keys as the JSON bundle
/// forwarded to the FHIR endpoint, so this type doubles as the dispatch
/// payload.
///
/// # Examples
///
/// ```
/// use triage::core::extract::extract_summary;
/// use triage::hl7::parse_message;
///
/// let raw = "MSH|^~\\&|SYS1|FAC1|SYS2|FAC2|20240101120000||ADT^A01|MSG001|P|2.3\rPID|1||PT123||Doe^Jane||19900101|F";
/// let message = parse_message(raw).unwrap();
/// let summary = extract_summary(&message);
///
/// assert_eq!(summary.message_header.message_type.as_deref(), Some("ADT^A01"));
/// assert_eq!(summary.patient_info.patient_id.as_deref(), Some("PT123"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalSummary {
    /// Attributes of the MSH (message header) segment
    pub message_header: HeaderSummary,

    /// Attributes of the PID (patient identification) segment
    pub patient_info: PatientSummary,

    /// Attributes of the EVN (event) segment
    pub event_info: EventSummary,
}

/// Named fields extracted from the MSH segment (1-based positions 3-12)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSummary {
    /// MSH.3
    pub sending_application: Option<String>,
    /// MSH.4
    pub sending_facility: Option<String>,
    /// MSH.5
    pub receiving_application: Option<String>,
    /// MSH.6
    pub receiving_facility: Option<String>,
    /// MSH.7
    pub timestamp: Option<String>,
    /// MSH.9
    pub message_type: Option<String>,
    /// MSH.10
    pub message_control_id: Option<String>,
    /// MSH.11
    pub processing_id: Option<String>,
    /// MSH.12
    pub version_id: Option<String>,
}

/// Named fields extracted from the PID segment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSummary {
    /// PID.3
    pub patient_id: Option<String>,
    /// PID.5, kept in composite form (e.g. `Doe^Jane`)
    pub patient_name: Option<String>,
    /// PID.7
    pub date_of_birth: Option<String>,
    /// PID.8
    pub gender: Option<String>,
    /// PID.11
    pub patient_address: Option<String>,
}

/// Named fields extracted from the EVN segment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    /// EVN.1
    pub event_type: Option<String>,
    /// EVN.2
    pub recorded_datetime: Option<String>,
    /// EVN.3
    pub planned_event_datetime: Option<String>,
    /// EVN.4
    pub event_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serializes_with_original_keys() {
        let summary = ClinicalSummary {
            message_header: HeaderSummary {
                sending_application: Some("SYS1".to_string()),
                message_type: Some("ADT^A01".to_string()),
                message_control_id: Some("MSG001".to_string()),
                ..Default::default()
            },
            patient_info: PatientSummary {
                patient_id: Some("PT123".to_string()),
                ..Default::default()
            },
            event_info: EventSummary::default(),
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["message_header"]["sending_application"], "SYS1");
        assert_eq!(json["message_header"]["message_control_id"], "MSG001");
        assert_eq!(json["patient_info"]["patient_id"], "PT123");
        // absent attributes serialize as explicit nulls
        assert!(json["patient_info"]["gender"].is_null());
        assert!(json["event_info"]["event_type"].is_null());
    }

    #[test]
    fn test_summary_round_trips_through_json() {
        let summary = ClinicalSummary {
            message_header: HeaderSummary::default(),
            patient_info: PatientSummary {
                patient_name: Some("Doe^Jane".to_string()),
                ..Default::default()
            },
            event_info: EventSummary {
                event_type: Some("A01".to_string()),
                ..Default::default()
            },
        };

        let json = serde_json::to_string(&summary).unwrap();
        let back: ClinicalSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }
}
