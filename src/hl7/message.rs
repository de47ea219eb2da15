//! Parsed HL7v2 message model
//!
//! A [`Message`] is an ordered list of [`Segment`]s plus the [`Delimiters`]
//! it was parsed with. The model is immutable after construction and keeps
//! the raw source text of every field, so a parsed message can be rendered
//! back to its wire form and structural equality is well defined.
//!
//! Field access is 1-based throughout, matching how HL7 interface
//! specifications number fields (`PID-3`, `MSH-9`). The MSH segment counts
//! its own field delimiter as field 1 and the encoding-characters run as
//! field 2, so `MSH-9` lands on the message type exactly as interface
//! documents say it does.

use super::delimiters::Delimiters;
use super::escape;

/// A complete parsed message
///
/// Segments keep their source order, and repeated segment names are all
/// retained. An instance always holds at least one segment; construction
/// goes through the tokenizer, which rejects empty input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    delimiters: Delimiters,
    segments: Vec<Segment>,
}

impl Message {
    pub(crate) fn new(delimiters: Delimiters, segments: Vec<Segment>) -> Self {
        Self {
            delimiters,
            segments,
        }
    }

    /// The delimiter set this message was parsed with
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// All segments in source order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The first segment with the given name
    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.name() == name)
    }

    /// All segments with the given name, in source order
    pub fn segments_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Segment> {
        self.segments.iter().filter(move |s| s.name() == name)
    }

    /// Renders the message back to wire form with CR segment terminators
    pub fn render(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.render(&self.delimiters))
            .collect::<Vec<_>>()
            .join("\r")
    }
}

/// One segment: a three-letter (usually) name plus its positional fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    name: String,
    fields: Vec<Field>,
}

impl Segment {
    pub(crate) fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// The segment name (`MSH`, `PID`, ...)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field at the given 1-based position
    ///
    /// Position 0 and positions past the last field return `None`. For MSH
    /// the delimiter quirk applies: field 1 is the field delimiter itself
    /// and field 2 is the encoding-characters run.
    pub fn field(&self, index: usize) -> Option<&Field> {
        index.checked_sub(1).and_then(|i| self.fields.get(i))
    }

    /// The escape-decoded value of the field at the given 1-based position
    ///
    /// Present-but-empty fields yield `Some("")`; absent positions yield
    /// `None`. Callers that treat empty as absent normalize on their side.
    pub fn field_value(&self, index: usize) -> Option<&str> {
        self.field(index).map(Field::value)
    }

    /// Number of positional fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Renders the segment back to its source line
    ///
    /// For MSH the field delimiter and encoding characters are emitted in
    /// their header positions rather than as delimited fields.
    pub fn render(&self, delimiters: &Delimiters) -> String {
        let d = delimiters.field;
        let mut line = self.name.clone();

        if self.name == "MSH" && self.fields.len() >= 2 {
            line.push(d);
            line.push_str(self.fields[1].raw());
            for field in &self.fields[2..] {
                line.push(d);
                line.push_str(field.raw());
            }
        } else {
            for field in &self.fields {
                line.push(d);
                line.push_str(field.raw());
            }
        }

        line
    }
}

/// One positional field
///
/// Keeps the exact raw source text alongside the escape-decoded value and
/// the repetition/component/subcomponent tree. The raw text makes
/// rendering lossless; the tree gives structured access with escapes
/// decoded at the leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    raw: String,
    value: String,
    repetitions: Vec<Repetition>,
}

impl Field {
    /// Parses a raw field into its repetition tree
    pub(crate) fn parse(raw: &str, delimiters: &Delimiters) -> Self {
        let repetitions = raw
            .split(delimiters.repetition)
            .map(|rep| Repetition::parse(rep, delimiters))
            .collect();

        Self {
            raw: raw.to_string(),
            value: escape::decode(raw, delimiters),
            repetitions,
        }
    }

    /// Builds an opaque field that is never split or decoded
    ///
    /// Used for MSH-1 and MSH-2, whose content is delimiter characters.
    pub(crate) fn opaque(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            value: raw.clone(),
            repetitions: vec![Repetition {
                components: vec![Component {
                    subcomponents: vec![raw.clone()],
                }],
            }],
            raw,
        }
    }

    /// The exact source text of the field
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The escape-decoded whole-field value
    ///
    /// Structural delimiters inside the field remain in place; only escape
    /// sequences are decoded. `PID-5` of `...|Doe^Jane|...` has the value
    /// `Doe^Jane`.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True when the field carried no characters at all
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// All repetitions, in source order (always at least one)
    pub fn repetitions(&self) -> &[Repetition] {
        &self.repetitions
    }

    /// The repetition at the given 1-based position
    pub fn repetition(&self, index: usize) -> Option<&Repetition> {
        index.checked_sub(1).and_then(|i| self.repetitions.get(i))
    }

    /// The component at the given 1-based position of the first repetition
    pub fn component(&self, index: usize) -> Option<&Component> {
        self.repetitions.first().and_then(|rep| rep.component(index))
    }

    /// The decoded value of the component at the given 1-based position
    pub fn component_value(&self, index: usize) -> Option<&str> {
        self.component(index).map(Component::value)
    }
}

/// One repetition of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repetition {
    components: Vec<Component>,
}

impl Repetition {
    fn parse(raw: &str, delimiters: &Delimiters) -> Self {
        let components = raw
            .split(delimiters.component)
            .map(|comp| Component::parse(comp, delimiters))
            .collect();

        Self { components }
    }

    /// All components, in source order (always at least one)
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The component at the given 1-based position
    pub fn component(&self, index: usize) -> Option<&Component> {
        index.checked_sub(1).and_then(|i| self.components.get(i))
    }

    /// The decoded value of the first component
    pub fn value(&self) -> &str {
        self.components
            .first()
            .map(Component::value)
            .unwrap_or_default()
    }
}

/// One component, holding its decoded subcomponent leaves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    subcomponents: Vec<String>,
}

impl Component {
    fn parse(raw: &str, delimiters: &Delimiters) -> Self {
        let subcomponents = raw
            .split(delimiters.subcomponent)
            .map(|sub| escape::decode(sub, delimiters))
            .collect();

        Self { subcomponents }
    }

    /// The decoded value of the first subcomponent
    ///
    /// For the common single-subcomponent case this is the component value.
    pub fn value(&self) -> &str {
        self.subcomponents.first().map(String::as_str).unwrap_or("")
    }

    /// All decoded subcomponents, in source order (always at least one)
    pub fn subcomponents(&self) -> &[String] {
        &self.subcomponents
    }

    /// The decoded subcomponent at the given 1-based position
    pub fn subcomponent(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.subcomponents.get(i))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Delimiters {
        Delimiters::default()
    }

    #[test]
    fn test_field_access_is_one_based() {
        let d = standard();
        let segment = Segment::new(
            "PID",
            vec![
                Field::parse("1", &d),
                Field::parse("", &d),
                Field::parse("PT123", &d),
            ],
        );

        assert_eq!(segment.field_value(1), Some("1"));
        assert_eq!(segment.field_value(2), Some(""));
        assert_eq!(segment.field_value(3), Some("PT123"));
        assert_eq!(segment.field_value(4), None);
        assert_eq!(segment.field_value(0), None);
    }

    #[test]
    fn test_field_tree_decomposition() {
        let d = standard();
        let field = Field::parse("Doe^Jane~Smith^John&Q", &d);

        assert_eq!(field.repetitions().len(), 2);
        assert_eq!(field.repetition(1).unwrap().component(1).unwrap().value(), "Doe");
        assert_eq!(field.repetition(1).unwrap().component(2).unwrap().value(), "Jane");

        let second = field.repetition(2).unwrap();
        assert_eq!(second.component(1).unwrap().value(), "Smith");
        assert_eq!(second.component(2).unwrap().subcomponent(1), Some("John"));
        assert_eq!(second.component(2).unwrap().subcomponent(2), Some("Q"));
    }

    #[test]
    fn test_field_value_keeps_structural_delimiters() {
        let d = standard();
        let field = Field::parse("Doe^Jane", &d);
        assert_eq!(field.value(), "Doe^Jane");
        assert_eq!(field.raw(), "Doe^Jane");
    }

    #[test]
    fn test_escapes_decoded_at_leaves_only() {
        let d = standard();
        let field = Field::parse("Smith \\T\\ Jones^\\F\\flag", &d);

        // Raw is untouched; the whole-field value and the leaves decode.
        assert_eq!(field.raw(), "Smith \\T\\ Jones^\\F\\flag");
        assert_eq!(field.value(), "Smith & Jones^|flag");
        assert_eq!(field.component_value(1), Some("Smith & Jones"));
        assert_eq!(field.component_value(2), Some("|flag"));
        // The decoded & at the leaf did not create a subcomponent split.
        assert_eq!(field.component(1).unwrap().subcomponents().len(), 1);
    }

    #[test]
    fn test_opaque_field_is_not_decoded() {
        let field = Field::opaque("^~\\&");
        assert_eq!(field.raw(), "^~\\&");
        assert_eq!(field.value(), "^~\\&");
        assert_eq!(field.repetitions().len(), 1);
    }

    #[test]
    fn test_segment_render_round_trips() {
        let d = standard();
        let line = "PID|1||PT123||Doe^Jane||19900101|F";
        let fields = line
            .split('|')
            .skip(1)
            .map(|raw| Field::parse(raw, &d))
            .collect();
        let segment = Segment::new("PID", fields);

        assert_eq!(segment.render(&d), line);
    }

    #[test]
    fn test_segment_render_preserves_trailing_empties() {
        let d = standard();
        let line = "PID|1||PT123||";
        let fields = line
            .split('|')
            .skip(1)
            .map(|raw| Field::parse(raw, &d))
            .collect();
        let segment = Segment::new("PID", fields);

        assert_eq!(segment.field_count(), 5);
        assert_eq!(segment.render(&d), line);
    }

    #[test]
    fn test_msh_render_places_encoding_characters() {
        let d = standard();
        let segment = Segment::new(
            "MSH",
            vec![
                Field::opaque("|"),
                Field::opaque("^~\\&"),
                Field::parse("SYS1", &d),
                Field::parse("FAC1", &d),
            ],
        );

        assert_eq!(segment.render(&d), "MSH|^~\\&|SYS1|FAC1");
    }

    #[test]
    fn test_message_segment_lookup() {
        let d = standard();
        let msg = Message::new(
            d,
            vec![
                Segment::new("MSH", vec![Field::opaque("|"), Field::opaque("^~\\&")]),
                Segment::new("OBX", vec![Field::parse("1", &d)]),
                Segment::new("OBX", vec![Field::parse("2", &d)]),
            ],
        );

        assert_eq!(msg.segment("MSH").unwrap().name(), "MSH");
        assert!(msg.segment("PID").is_none());

        let obx: Vec<_> = msg.segments_named("OBX").collect();
        assert_eq!(obx.len(), 2);
        assert_eq!(obx[0].field_value(1), Some("1"));
        assert_eq!(obx[1].field_value(1), Some("2"));
    }

    #[test]
    fn test_empty_field_tree_has_one_empty_leaf() {
        let d = standard();
        let field = Field::parse("", &d);

        assert!(field.is_empty());
        assert_eq!(field.repetitions().len(), 1);
        assert_eq!(field.component_value(1), Some(""));
    }
}
