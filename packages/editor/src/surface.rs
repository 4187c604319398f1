//! # Editing Surface
//!
//! What the editor shows for the selected section. A few kinds get a
//! structured form of named fields; every other kind is edited as the raw
//! JSON of its props.

use crate::errors::EditorError;
use pagekit_document::props::text;
use pagekit_document::{Props, Section, SectionKind};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    /// Single line of text
    Line,
    /// Multi-line text, paragraphs split on blank lines
    Multiline,
    Url,
    /// One of a fixed set of values
    Choice(&'static [&'static str]),
}

/// Description of one editable prop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub input: FieldInput,
}

const fn line(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        input: FieldInput::Line,
    }
}

const fn url(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        input: FieldInput::Url,
    }
}

const HERO_FIELDS: &[FieldSpec] = &[
    line("badge", "Badge"),
    line("title", "Title"),
    FieldSpec {
        key: "subtitle",
        label: "Subtitle",
        input: FieldInput::Multiline,
    },
    line("ctaText", "Button text"),
    url("ctaLink", "Button link"),
    line("secondaryCtaText", "Secondary button text"),
    url("secondaryCtaLink", "Secondary button link"),
    url("backgroundImage", "Background image"),
];

const CTA_FIELDS: &[FieldSpec] = &[
    line("title", "Title"),
    line("subtitle", "Subtitle"),
    line("ctaText", "Button text"),
    url("ctaLink", "Button link"),
    line("secondaryCtaText", "Secondary button text"),
    url("secondaryCtaLink", "Secondary button link"),
];

const CONTENT_FIELDS: &[FieldSpec] = &[
    line("title", "Title"),
    FieldSpec {
        key: "body",
        label: "Body",
        input: FieldInput::Multiline,
    },
    url("image", "Image"),
    FieldSpec {
        key: "align",
        label: "Alignment",
        input: FieldInput::Choice(&["left", "center"]),
    },
];

const FOOTER_FIELDS: &[FieldSpec] = &[
    line("brand", "Brand"),
    line("tagline", "Tagline"),
    line("copyright", "Copyright"),
];

const NAVBAR_FIELDS: &[FieldSpec] = &[
    line("brand", "Brand"),
    line("ctaText", "Button text"),
    url("ctaLink", "Button link"),
];

/// Structured fields for `kind`, `None` when it is edited as raw JSON
pub fn form_fields(kind: &SectionKind) -> Option<&'static [FieldSpec]> {
    match kind {
        SectionKind::Hero => Some(HERO_FIELDS),
        SectionKind::Cta => Some(CTA_FIELDS),
        SectionKind::Content => Some(CONTENT_FIELDS),
        SectionKind::Footer => Some(FOOTER_FIELDS),
        SectionKind::Navbar => Some(NAVBAR_FIELDS),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub spec: FieldSpec,
    /// Current prop value, empty when unset
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldForm {
    pub section_id: String,
    pub kind: SectionKind,
    pub fields: Vec<FormField>,
}

impl FieldForm {
    fn new(section: &Section, specs: &'static [FieldSpec]) -> Self {
        Self {
            section_id: section.id.clone(),
            kind: section.kind.clone(),
            fields: specs
                .iter()
                .map(|spec| FormField {
                    spec: *spec,
                    value: text(&section.props, &[spec.key]).unwrap_or_default(),
                })
                .collect(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.spec.key == key)
    }

    /// Prop value to send for `key`: empty input clears the prop, choices
    /// outside the allowed set are rejected.
    pub fn value_for(&self, key: &str, input: &str) -> Result<Value, EditorError> {
        let field = self.field(key).ok_or_else(|| EditorError::FieldNotEditable {
            kind: self.kind.to_string(),
            field: key.to_string(),
        })?;

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Value::Null);
        }

        if let FieldInput::Choice(options) = field.spec.input {
            if !options.contains(&trimmed) {
                return Err(EditorError::FieldNotEditable {
                    kind: self.kind.to_string(),
                    field: format!("{}={}", key, trimmed),
                });
            }
        }

        let value = match field.spec.input {
            FieldInput::Multiline => input.trim_end().to_string(),
            _ => trimmed.to_string(),
        };
        Ok(Value::String(value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawEditor {
    pub section_id: String,
    /// Text being edited
    pub text: String,
    /// Message from the last rejected submit
    pub error: Option<String>,
}

impl RawEditor {
    fn new(section: &Section) -> Self {
        Self {
            section_id: section.id.clone(),
            text: serde_json::to_string_pretty(&section.props).unwrap_or_else(|_| "{}".to_string()),
            error: None,
        }
    }

    /// Parse the buffer as a props object
    pub fn parse(text: &str) -> Result<Props, EditorError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => Ok(map),
            Value::Array(_) => Err(EditorError::PropsNotObject("an array")),
            Value::String(_) => Err(EditorError::PropsNotObject("a string")),
            Value::Number(_) => Err(EditorError::PropsNotObject("a number")),
            Value::Bool(_) => Err(EditorError::PropsNotObject("a boolean")),
            Value::Null => Err(EditorError::PropsNotObject("null")),
        }
    }
}

/// Editor opened for the selected section
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditingSurface {
    #[default]
    Closed,
    Form(FieldForm),
    Raw(RawEditor),
}

impl EditingSurface {
    pub fn open(section: &Section) -> Self {
        match form_fields(&section.kind) {
            Some(specs) => EditingSurface::Form(FieldForm::new(section, specs)),
            None => EditingSurface::Raw(RawEditor::new(section)),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, EditingSurface::Closed)
    }

    pub fn section_id(&self) -> Option<&str> {
        match self {
            EditingSurface::Closed => None,
            EditingSurface::Form(form) => Some(&form.section_id),
            EditingSurface::Raw(raw) => Some(&raw.section_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_kinds() {
        for kind in SectionKind::known() {
            let expected = matches!(
                kind,
                SectionKind::Hero | SectionKind::Cta | SectionKind::Content | SectionKind::Footer | SectionKind::Navbar
            );
            assert_eq!(form_fields(&kind).is_some(), expected, "{}", kind);
        }
        assert!(form_fields(&SectionKind::Unknown("x".into())).is_none());
    }

    #[test]
    fn test_form_reads_current_values() {
        let section = Section::new("h", SectionKind::Hero).with_prop("title", json!("Hello"));
        let EditingSurface::Form(form) = EditingSurface::open(&section) else {
            panic!("hero should open a form");
        };
        assert_eq!(form.field("title").unwrap().value, "Hello");
        assert_eq!(form.field("badge").unwrap().value, "");
    }

    #[test]
    fn test_value_for() {
        let section = Section::new("c", SectionKind::Content);
        let EditingSurface::Form(form) = EditingSurface::open(&section) else {
            panic!("content should open a form");
        };
        assert_eq!(form.value_for("title", "  Hi ").unwrap(), json!("Hi"));
        assert_eq!(form.value_for("title", "   ").unwrap(), Value::Null);
        assert_eq!(form.value_for("align", "center").unwrap(), json!("center"));
        assert!(form.value_for("align", "right").is_err());
        assert!(matches!(
            form.value_for("items", "x"),
            Err(EditorError::FieldNotEditable { .. })
        ));
    }

    #[test]
    fn test_raw_editor_parse() {
        assert!(RawEditor::parse(r#"{"title":"x"}"#).is_ok());
        assert!(matches!(RawEditor::parse("[1,2]"), Err(EditorError::PropsNotObject("an array"))));
        assert!(matches!(RawEditor::parse("{oops"), Err(EditorError::InvalidJson(_))));
    }

    #[test]
    fn test_other_kinds_open_raw_editor() {
        let section = Section::new("f", SectionKind::Features).with_prop("title", json!("All"));
        let EditingSurface::Raw(raw) = EditingSurface::open(&section) else {
            panic!("features should open the raw editor");
        };
        assert!(raw.text.contains("\"title\": \"All\""));
        assert!(raw.error.is_none());
    }
}
