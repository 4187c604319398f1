//! # Page Document
//!
//! A Document is the full structured representation of one landing page:
//! metadata plus a flat, ordered list of sections.
//!
//! ## Invariants
//!
//! - Section ids are unique within a document
//! - The section list never holds null entries
//! - Theme falls back to dark when absent or unrecognised
//!
//! Decoding enforces the invariants instead of rejecting input: null or
//! undecodable sections are dropped, missing or duplicate ids are replaced.

use crate::id_generator;
use crate::kind::SectionKind;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Loosely typed section properties (ordered, so output is deterministic)
pub type Props = serde_json::Map<String, Value>;

/// CSS property overrides, additive over a kind's defaults
pub type Styles = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(name)) => Theme::from_name(&name),
            _ => Theme::Dark,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
}

fn default_title() -> String {
    "Untitled page".to_string()
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: None,
            theme: Theme::Dark,
            accent_color: None,
        }
    }
}

/// One structural block of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: SectionKind,

    #[serde(default, deserialize_with = "lenient_props")]
    pub props: Props,

    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "lenient_styles"
    )]
    pub styles: Styles,
}

impl Section {
    pub fn new(id: impl Into<String>, kind: SectionKind) -> Self {
        Self {
            id: id.into(),
            kind,
            props: Props::new(),
            styles: Styles::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }
}

/// Editable page document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: String,
    pub metadata: Metadata,
    pub sections: Vec<Section>,
}

impl Document {
    /// Empty document with a fresh id
    pub fn empty() -> Self {
        Self::new(id_generator::document_id(), Metadata::default())
    }

    pub fn new(id: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            id: id.into(),
            metadata,
            sections: Vec::new(),
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self.normalize()
    }

    pub fn from_json(source: &str) -> Result<Self, crate::DocumentError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, crate::DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn find(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Re-establish id invariants: missing ids and repeated ids get fresh ones
    pub fn normalize(mut self) -> Self {
        if self.id.trim().is_empty() {
            self.id = id_generator::document_id();
        }

        let mut seen = HashSet::new();
        for section in &mut self.sections {
            if section.id.trim().is_empty() || seen.contains(&section.id) {
                let fresh = id_generator::section_id(&section.kind);
                tracing::debug!(old = %section.id, new = %fresh, "reassigned section id");
                section.id = fresh;
            }
            seen.insert(section.id.clone());
        }
        self
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, alias = "meta")]
    metadata: Option<Value>,
    #[serde(default, alias = "slides")]
    sections: Option<Value>,
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDocument::deserialize(deserializer)?;

        let metadata = match raw.metadata {
            Some(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "metadata could not be decoded, using defaults");
                Metadata::default()
            }),
            _ => Metadata::default(),
        };

        let sections = match raw.sections {
            Some(Value::Array(items)) => decode_sections(items),
            _ => Vec::new(),
        };

        Ok(Document {
            id: raw.id.unwrap_or_default(),
            metadata,
            sections,
        }
        .normalize())
    }
}

/// Decode section entries, dropping nulls and entries that are not sections
pub fn decode_sections(items: Vec<Value>) -> Vec<Section> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(_) => match serde_json::from_value::<Section>(item) {
                Ok(section) => Some(section),
                Err(e) => {
                    tracing::warn!(error = %e, "dropping undecodable section");
                    None
                }
            },
            Value::Null => None,
            other => {
                tracing::warn!(entry = %other, "dropping non-object section entry");
                None
            }
        })
        .collect()
}

fn lenient_props<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Props, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => map,
        _ => Props::new(),
    })
}

fn lenient_styles<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Styles, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => styles_from_map(&map),
        _ => Styles::new(),
    })
}

/// Convert a JSON object into style overrides. Scalars are stringified,
/// everything else is dropped.
pub fn styles_from_map(map: &serde_json::Map<String, Value>) -> Styles {
    map.iter()
        .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key.clone(), v)))
        .collect()
}

pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
