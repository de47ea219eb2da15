//! HL7v2 escape sequence decoding
//!
//! Delimiter characters that appear inside data are carried on the wire as
//! escape sequences bracketed by the escape delimiter. Decoding happens at
//! the leaves of the field tree only, after all structural splitting, so a
//! decoded `|` can never be mistaken for a field boundary.

use super::delimiters::Delimiters;

/// Decodes the escape sequences in a leaf value
///
/// Recognized sequences (shown with the conventional `\` escape):
///
/// - `\F\` field delimiter, `\S\` component, `\T\` subcomponent,
///   `\R\` repetition, `\E\` the escape character itself
/// - `\Xhh..\` an even run of hex digit pairs, decoded as UTF-8 bytes
///
/// Anything else between escape characters, an unterminated sequence, or
/// hex that does not form valid UTF-8 passes through verbatim. Malformed
/// input degrades to literal text; it never fails.
pub fn decode(text: &str, delimiters: &Delimiters) -> String {
    let esc = delimiters.escape;
    if !text.contains(esc) {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != esc {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        // Unterminated sequence: emit the tail untouched.
        let Some(rel) = chars[i + 1..].iter().position(|&c| c == esc) else {
            out.extend(&chars[i..]);
            break;
        };

        let body: String = chars[i + 1..i + 1 + rel].iter().collect();
        match decode_body(&body, delimiters) {
            Some(decoded) => out.push_str(&decoded),
            None => {
                out.push(esc);
                out.push_str(&body);
                out.push(esc);
            }
        }
        i += rel + 2;
    }

    out
}

/// Decodes a single sequence body, or `None` when it is not recognized
fn decode_body(body: &str, delimiters: &Delimiters) -> Option<String> {
    match body {
        "F" => Some(delimiters.field.to_string()),
        "S" => Some(delimiters.component.to_string()),
        "T" => Some(delimiters.subcomponent.to_string()),
        "R" => Some(delimiters.repetition.to_string()),
        "E" => Some(delimiters.escape.to_string()),
        _ => body.strip_prefix('X').and_then(decode_hex),
    }
}

/// Decodes an even run of hex digit pairs as UTF-8 bytes
fn decode_hex(hex: &str) -> Option<String> {
    if hex.is_empty() || hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }

    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for pair in hex.as_bytes().chunks(2) {
        let hi = (pair[0] as char).to_digit(16)?;
        let lo = (pair[1] as char).to_digit(16)?;
        bytes.push((hi * 16 + lo) as u8);
    }

    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Delimiters {
        Delimiters::default()
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(decode("Doe Jane", &standard()), "Doe Jane");
        assert_eq!(decode("", &standard()), "");
    }

    #[test]
    fn test_delimiter_sequences() {
        assert_eq!(decode("A\\F\\B", &standard()), "A|B");
        assert_eq!(decode("A\\S\\B", &standard()), "A^B");
        assert_eq!(decode("A\\T\\B", &standard()), "A&B");
        assert_eq!(decode("A\\R\\B", &standard()), "A~B");
        assert_eq!(decode("A\\E\\B", &standard()), "A\\B");
    }

    #[test]
    fn test_adjacent_sequences() {
        assert_eq!(decode("\\F\\\\S\\\\E\\", &standard()), "|^\\");
    }

    #[test]
    fn test_hex_sequence() {
        assert_eq!(decode("line1\\X0D\\line2", &standard()), "line1\rline2");
        assert_eq!(decode("\\X414243\\", &standard()), "ABC");
    }

    #[test]
    fn test_unknown_sequence_passes_through() {
        // \H\ (highlight) is real HL7 but outside the supported set.
        assert_eq!(decode("\\H\\bold\\N\\", &standard()), "\\H\\bold\\N\\");
    }

    #[test]
    fn test_unterminated_sequence_passes_through() {
        assert_eq!(decode("AC\\X", &standard()), "AC\\X");
        assert_eq!(decode("tail\\", &standard()), "tail\\");
    }

    #[test]
    fn test_malformed_hex_passes_through() {
        // Odd digit count.
        assert_eq!(decode("\\X0\\", &standard()), "\\X0\\");
        // Not hex digits.
        assert_eq!(decode("\\XZZ\\", &standard()), "\\XZZ\\");
        // Valid pairs but not valid UTF-8.
        assert_eq!(decode("\\XFF\\", &standard()), "\\XFF\\");
    }

    #[test]
    fn test_empty_body_passes_through() {
        assert_eq!(decode("\\\\", &standard()), "\\\\");
    }

    #[test]
    fn test_alternate_escape_character() {
        let d = Delimiters::from_header("MSH#@%*$#SYS1").unwrap();
        assert_eq!(decode("A*F*B", &d), "A#B");
        assert_eq!(decode("A*E*B", &d), "A*B");
        // The conventional backslash is plain data under these delimiters.
        assert_eq!(decode("A\\F\\B", &d), "A\\F\\B");
    }
}
