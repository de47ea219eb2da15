//! Clinical summary extraction
//!
//! Pulls the fixed set of header, patient, and event fields out of a parsed
//! [`Message`] by segment name and 1-based field position. Extraction is
//! total: a missing segment, a missing field, or an empty field all become
//! `None` — there is no such thing as an extraction failure.

use crate::domain::summary::{ClinicalSummary, EventSummary, HeaderSummary, PatientSummary};
use crate::hl7::{Message, Segment};

/// Extracts the clinical summary from a parsed message
///
/// Positional rules:
///
/// - MSH: 3 sending application, 4 sending facility, 5 receiving
///   application, 6 receiving facility, 7 timestamp, 9 message type,
///   10 control ID, 11 processing ID, 12 version
/// - PID: 3 patient ID, 5 patient name, 7 date of birth, 8 gender,
///   11 address
/// - EVN: 1 event type, 2 recorded datetime, 3 planned datetime, 4 reason
///
/// Values keep their structural delimiters (`PID-5` of `Doe^Jane` comes
/// back exactly as `Doe^Jane`); only escape sequences are decoded.
pub fn extract_summary(message: &Message) -> ClinicalSummary {
    ClinicalSummary {
        message_header: extract_header(message.segment("MSH")),
        patient_info: extract_patient(message.segment("PID")),
        event_info: extract_event(message.segment("EVN")),
    }
}

fn extract_header(msh: Option<&Segment>) -> HeaderSummary {
    HeaderSummary {
        sending_application: field(msh, 3),
        sending_facility: field(msh, 4),
        receiving_application: field(msh, 5),
        receiving_facility: field(msh, 6),
        timestamp: field(msh, 7),
        message_type: field(msh, 9),
        message_control_id: field(msh, 10),
        processing_id: field(msh, 11),
        version_id: field(msh, 12),
    }
}

fn extract_patient(pid: Option<&Segment>) -> PatientSummary {
    PatientSummary {
        patient_id: field(pid, 3),
        patient_name: field(pid, 5),
        date_of_birth: field(pid, 7),
        gender: field(pid, 8),
        patient_address: field(pid, 11),
    }
}

fn extract_event(evn: Option<&Segment>) -> EventSummary {
    EventSummary {
        event_type: field(evn, 1),
        recorded_datetime: field(evn, 2),
        planned_event_datetime: field(evn, 3),
        event_reason: field(evn, 4),
    }
}

/// Reads one field, normalizing present-but-empty to `None`
fn field(segment: Option<&Segment>, index: usize) -> Option<String> {
    segment
        .and_then(|s| s.field_value(index))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
