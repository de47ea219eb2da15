//! HL7v2 delimiter declaration
//!
//! An HL7v2 message declares its own structural delimiters in the first
//! characters of its MSH header rather than fixing them globally. This
//! module reads that declaration; everything downstream (tokenizing,
//! escape decoding, field rendering) takes a [`Delimiters`] value instead
//! of assuming the conventional `|^~\&` set.

use crate::domain::errors::ParseError;
use serde::{Deserialize, Serialize};

/// The five structural delimiters declared by an MSH header
///
/// Positions within the header (`MSH` + declaration):
///
/// | Offset | Role         | Conventional |
/// |--------|--------------|--------------|
/// | 3      | field        | `\|`         |
/// | 4      | component    | `^`          |
/// | 5      | repetition   | `~`          |
/// | 6      | escape       | `\`          |
/// | 7      | subcomponent | `&`          |
///
/// The subcomponent delimiter is optional in the declaration; when the
/// character at offset 7 is absent or is already the field delimiter
/// (meaning the declaration ended after four characters), `&` is assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    /// Separates fields within a segment
    pub field: char,
    /// Separates components within a field
    pub component: char,
    /// Separates repetitions within a field
    pub repetition: char,
    /// Introduces and terminates escape sequences
    pub escape: char,
    /// Separates subcomponents within a component
    pub subcomponent: char,
}

impl Default for Delimiters {
    /// The conventional `|^~\&` delimiter set
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
        }
    }
}

impl Delimiters {
    /// Reads the delimiter declaration from the first segment line
    ///
    /// The line must start with the literal segment code `MSH` and carry at
    /// least four declaration characters after it (seven characters total).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingHeader`] when the line does not start
    /// with `MSH`, or [`ParseError::HeaderTooShort`] when it ends before
    /// the four mandatory delimiters are declared.
    pub fn from_header(header: &str) -> Result<Self, ParseError> {
        if !header.starts_with("MSH") {
            return Err(ParseError::MissingHeader);
        }

        let declaration: Vec<char> = header.chars().skip(3).take(5).collect();
        if declaration.len() < 4 {
            return Err(ParseError::HeaderTooShort(header.to_string()));
        }

        let field = declaration[0];
        let subcomponent = match declaration.get(4) {
            Some(&c) if c != field => c,
            _ => '&',
        };

        Ok(Self {
            field,
            component: declaration[1],
            repetition: declaration[2],
            escape: declaration[3],
            subcomponent,
        })
    }

    /// The raw encoding-characters run as it appears in MSH-2
    pub fn encoding_characters(&self) -> String {
        let mut chars = String::with_capacity(4);
        chars.push(self.component);
        chars.push(self.repetition);
        chars.push(self.escape);
        chars.push(self.subcomponent);
        chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_conventional_set() {
        let d = Delimiters::default();
        assert_eq!(d.field, '|');
        assert_eq!(d.component, '^');
        assert_eq!(d.repetition, '~');
        assert_eq!(d.escape, '\\');
        assert_eq!(d.subcomponent, '&');
    }

    #[test]
    fn test_from_header_conventional() {
        let d = Delimiters::from_header("MSH|^~\\&|SYS1|FAC1").unwrap();
        assert_eq!(d, Delimiters::default());
    }

    #[test]
    fn test_from_header_alternate_delimiters() {
        let d = Delimiters::from_header("MSH#@%*$#SYS1#FAC1").unwrap();
        assert_eq!(d.field, '#');
        assert_eq!(d.component, '@');
        assert_eq!(d.repetition, '%');
        assert_eq!(d.escape, '*');
        assert_eq!(d.subcomponent, '$');
    }

    #[test]
    fn test_from_header_without_subcomponent_declaration() {
        // Declaration ends after four characters; next char is a field
        // delimiter, so the subcomponent falls back to '&'.
        let d = Delimiters::from_header("MSH|^~\\|SYS1|FAC1").unwrap();
        assert_eq!(d.field, '|');
        assert_eq!(d.escape, '\\');
        assert_eq!(d.subcomponent, '&');
    }

    #[test]
    fn test_from_header_exactly_seven_chars() {
        let d = Delimiters::from_header("MSH|^~\\").unwrap();
        assert_eq!(d, Delimiters::default());
    }

    #[test]
    fn test_from_header_rejects_non_msh() {
        let err = Delimiters::from_header("PID|1||PT123").unwrap_err();
        assert_eq!(err, ParseError::MissingHeader);
    }

    #[test]
    fn test_from_header_rejects_short_header() {
        let err = Delimiters::from_header("MSH|^").unwrap_err();
        assert!(matches!(err, ParseError::HeaderTooShort(_)));
    }

    #[test]
    fn test_encoding_characters_round_trip() {
        let d = Delimiters::from_header("MSH|^~\\&|SYS1").unwrap();
        assert_eq!(d.encoding_characters(), "^~\\&");
    }
}
