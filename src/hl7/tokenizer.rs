//! HL7v2 tokenizer
//!
//! Turns raw message text into a [`Message`]: discovers the delimiter set
//! from the MSH header, splits the text into segment lines on CR, and
//! decomposes each line into the field tree. Line-ending normalization is
//! on by default because traffic captured from files and TCP feeds arrives
//! with LF or CRLF endings at least as often as with the CR the standard
//! prescribes.

use super::delimiters::Delimiters;
use super::message::{Field, Message, Segment};
use crate::domain::errors::ParseError;

/// Configurable message tokenizer
///
/// The default configuration normalizes CRLF and bare LF to CR before
/// splitting. Disable normalization only for traffic that is known to be
/// CR-terminated and may legitimately carry LF bytes as data.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    normalize_line_endings: bool,
}

impl Tokenizer {
    /// Creates a tokenizer with line-ending normalization enabled
    pub fn new() -> Self {
        Self {
            normalize_line_endings: true,
        }
    }

    /// Sets whether CRLF and LF are converted to CR before splitting
    pub fn with_line_ending_normalization(mut self, enabled: bool) -> Self {
        self.normalize_line_endings = enabled;
        self
    }

    /// Tokenizes raw text into a message
    ///
    /// Blank lines are skipped, so trailing terminators and accidental
    /// double-spacing between segments are harmless. The same input always
    /// produces the same message.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the input is empty after trimming,
    /// does not begin with an MSH segment, or the header ends before all
    /// four delimiters are declared.
    pub fn tokenize(&self, raw: &str) -> Result<Message, ParseError> {
        let normalized;
        let text = if self.normalize_line_endings {
            normalized = raw.replace("\r\n", "\r").replace('\n', "\r");
            normalized.as_str()
        } else {
            raw
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyMessage);
        }

        let mut lines = trimmed.split('\r').filter(|line| !line.trim().is_empty());

        let header = lines.next().ok_or(ParseError::EmptyMessage)?;
        let delimiters = Delimiters::from_header(header)?;

        let mut segments = vec![parse_msh_line(header, &delimiters)];
        segments.extend(lines.map(|line| parse_line(line, &delimiters)));

        Ok(Message::new(delimiters, segments))
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses raw text with the default tokenizer configuration
pub fn parse_message(raw: &str) -> Result<Message, ParseError> {
    Tokenizer::new().tokenize(raw)
}

fn parse_line(line: &str, delimiters: &Delimiters) -> Segment {
    // Any MSH line gets the header quirk, not just the first one.
    if line.starts_with("MSH") && line.chars().nth(3) == Some(delimiters.field) {
        parse_msh_line(line, delimiters)
    } else {
        parse_plain_line(line, delimiters)
    }
}

/// Parses an MSH line: field 1 is the field delimiter itself, field 2 the
/// encoding-characters run, both opaque; remaining tokens are fields 3..n.
fn parse_msh_line(line: &str, delimiters: &Delimiters) -> Segment {
    let mut fields = vec![Field::opaque(delimiters.field.to_string())];

    let mut tokens = line.split(delimiters.field);
    tokens.next(); // the literal segment code

    if let Some(encoding) = tokens.next() {
        fields.push(Field::opaque(encoding));
    }
    fields.extend(tokens.map(|raw| Field::parse(raw, delimiters)));

    Segment::new("MSH", fields)
}

fn parse_plain_line(line: &str, delimiters: &Delimiters) -> Segment {
    match line.find(delimiters.field) {
        Some(pos) => {
            let name = &line[..pos];
            let rest = &line[pos + delimiters.field.len_utf8()..];
            let fields = rest
                .split(delimiters.field)
                .map(|raw| Field::parse(raw, delimiters))
                .collect();
            Segment::new(name, fields)
        }
        // No field delimiter at all: a name-only segment with zero fields.
        None => Segment::new(line, Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIT: &str = "MSH|^~\\&|SYS1|FAC1|SYS2|FAC2|20240101120000||ADT^A01|MSG001|P|2.3\rPID|1||PT123||Doe^Jane||19900101|F";

    #[test]
    fn test_parses_admit_message() {
        let msg = parse_message(ADMIT).unwrap();

        assert_eq!(msg.segments().len(), 2);

        let msh = msg.segment("MSH").unwrap();
        assert_eq!(msh.field_value(3), Some("SYS1"));
        assert_eq!(msh.field_value(4), Some("FAC1"));
        assert_eq!(msh.field_value(7), Some("20240101120000"));
        assert_eq!(msh.field_value(9), Some("ADT^A01"));
        assert_eq!(msh.field_value(10), Some("MSG001"));
        assert_eq!(msh.field_value(12), Some("2.3"));

        let pid = msg.segment("PID").unwrap();
        assert_eq!(pid.field_value(3), Some("PT123"));
        assert_eq!(pid.field_value(5), Some("Doe^Jane"));
        assert_eq!(pid.field_value(7), Some("19900101"));
        assert_eq!(pid.field_value(8), Some("F"));
    }

    #[test]
    fn test_msh_delimiter_quirk() {
        let msg = parse_message(ADMIT).unwrap();
        let msh = msg.segment("MSH").unwrap();

        assert_eq!(msh.field_value(1), Some("|"));
        assert_eq!(msh.field_value(2), Some("^~\\&"));
    }

    #[test]
    fn test_line_ending_normalization() {
        let cr = parse_message(ADMIT).unwrap();
        let lf = parse_message(&ADMIT.replace('\r', "\n")).unwrap();
        let crlf = parse_message(&ADMIT.replace('\r', "\r\n")).unwrap();

        assert_eq!(cr, lf);
        assert_eq!(cr, crlf);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let spaced = ADMIT.replace('\r', "\r\r");
        let with_trailing = format!("{ADMIT}\r\r  \r");

        assert_eq!(parse_message(&spaced).unwrap().segments().len(), 2);
        assert_eq!(parse_message(&with_trailing).unwrap().segments().len(), 2);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(parse_message("").unwrap_err(), ParseError::EmptyMessage);
        assert_eq!(
            parse_message("  \r\n \n ").unwrap_err(),
            ParseError::EmptyMessage
        );
    }

    #[test]
    fn test_non_msh_start_rejected() {
        let err = parse_message("PID|1||PT123").unwrap_err();
        assert_eq!(err, ParseError::MissingHeader);
    }

    #[test]
    fn test_truncated_header_rejected() {
        let err = parse_message("MSH|^").unwrap_err();
        assert!(matches!(err, ParseError::HeaderTooShort(_)));
    }

    #[test]
    fn test_trailing_empty_fields_preserved() {
        let msg = parse_message("MSH|^~\\&|SYS1|||").unwrap();
        let msh = msg.segment("MSH").unwrap();

        // Fields 3, 4, 5, 6: SYS1 plus three trailing empties.
        assert_eq!(msh.field_count(), 6);
        assert_eq!(msh.field_value(6), Some(""));
        assert_eq!(msh.field_value(7), None);
    }

    #[test]
    fn test_name_only_segment() {
        let msg = parse_message("MSH|^~\\&|SYS1\rNTE").unwrap();
        let nte = msg.segment("NTE").unwrap();

        assert_eq!(nte.name(), "NTE");
        assert_eq!(nte.field_count(), 0);
        assert_eq!(nte.field_value(1), None);
    }

    #[test]
    fn test_repeated_segments_kept_in_order() {
        let msg = parse_message("MSH|^~\\&|SYS1\rOBX|1|first\rOBX|2|second").unwrap();
        let values: Vec<_> = msg
            .segments_named("OBX")
            .filter_map(|s| s.field_value(2))
            .collect();

        assert_eq!(values, vec!["first", "second"]);
    }

    #[test]
    fn test_alternate_delimiters_end_to_end() {
        let msg = parse_message("MSH#@%*$#SYS1#FAC1\rPID#1##PT9@sub").unwrap();

        assert_eq!(msg.delimiters().field, '#');
        let pid = msg.segment("PID").unwrap();
        assert_eq!(pid.field_value(3), Some("PT9@sub"));
        assert_eq!(pid.field(3).unwrap().component_value(2), Some("sub"));
    }

    #[test]
    fn test_render_round_trip() {
        let msg = parse_message(ADMIT).unwrap();
        assert_eq!(msg.render(), ADMIT);
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let first = parse_message(ADMIT).unwrap();
        let second = parse_message(&first.render()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalization_can_be_disabled() {
        let tokenizer = Tokenizer::new().with_line_ending_normalization(false);
        let msg = tokenizer
            .tokenize("MSH|^~\\&|SYS1|FAC1\nPID|1||PT123")
            .unwrap();

        // Without normalization the LF never becomes a segment boundary.
        assert_eq!(msg.segments().len(), 1);
        assert!(msg.segment("PID").is_none());
    }

    #[test]
    fn test_second_msh_also_gets_quirk() {
        let msg = parse_message("MSH|^~\\&|SYS1\rMSH|^~\\&|SYS2").unwrap();
        let all: Vec<_> = msg.segments_named("MSH").collect();

        assert_eq!(all.len(), 2);
        assert_eq!(all[1].field_value(3), Some("SYS2"));
    }
}
