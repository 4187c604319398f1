//! # Patch Commands
//!
//! Mutation commands understood by the patch engine, and the lenient decoder
//! that turns generated JSON into a [`PatchBatch`].
//!
//! ## Wire shape
//!
//! ```json
//! {
//!   "ast_actions": [
//!     { "action": "add_section", "section_type": "Hero", "props": { "title": "T" } },
//!     { "action": "move_section", "section_id": "hero-1", "direction": "up" }
//!   ],
//!   "explanation": "Added a hero"
//! }
//! ```
//!
//! A full-structure shorthand (`sections` or `slides` with optional `id`,
//! `meta` and `format` companions) decodes to a single `ReplaceDocument`.
//!
//! ## Leniency
//!
//! - A command missing a required field is skipped; the rest of the batch
//!   still decodes.
//! - Discriminators and field names accept a few aliases (`op`, `type`,
//!   `sectionId`, `id`, camelCase or kebab-case action names).
//! - The legacy `actions` array belongs to the raw-file editing mode and is
//!   ignored here.

use pagekit_document::document::decode_sections;
use pagekit_document::id_generator;
use pagekit_document::{Document, Metadata, Props, SectionKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Keys whose presence marks a JSON object as a patch batch
pub const BATCH_SHAPE_KEYS: &[&str] = &["ast_actions", "sections", "slides", "format"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "up" | "before" | "previous" => Some(Direction::Up),
            "down" | "after" | "next" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Semantic page mutations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PatchCommand {
    /// Insert a section at `index` (appends when out of range)
    AddSection {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        section_type: Option<SectionKind>,
        #[serde(default)]
        props: Props,
        #[serde(default, skip_serializing_if = "Map::is_empty")]
        styles: Map<String, Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        section_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<i64>,
    },

    /// Shallow-merge props/styles (`null` removes a key)
    UpdateSection {
        section_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        props: Option<Props>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        styles: Option<Map<String, Value>>,
    },

    DeleteSection {
        section_id: String,
    },

    /// Swap with the neighbour in `direction`, clamped at the ends
    MoveSection {
        section_id: String,
        direction: Direction,
    },

    /// Shallow-merge onto the document metadata
    UpdateMetadata {
        metadata: Map<String, Value>,
    },

    /// Replace the whole document; later commands in the batch are dropped
    ReplaceDocument {
        document: Document,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Command is not an object")]
    NotAnObject,

    #[error("Command has no action")]
    MissingAction,

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("{action} is missing required field `{field}`")]
    MissingField {
        action: &'static str,
        field: &'static str,
    },

    #[error("{action} has an invalid `{field}`")]
    InvalidField {
        action: &'static str,
        field: &'static str,
    },
}

impl PatchCommand {
    /// Wire name of the command
    pub fn name(&self) -> &'static str {
        match self {
            PatchCommand::AddSection { .. } => "add_section",
            PatchCommand::UpdateSection { .. } => "update_section",
            PatchCommand::DeleteSection { .. } => "delete_section",
            PatchCommand::MoveSection { .. } => "move_section",
            PatchCommand::UpdateMetadata { .. } => "update_metadata",
            PatchCommand::ReplaceDocument { .. } => "replace_document",
        }
    }

    /// Decode one command from untrusted JSON
    pub fn from_value(value: &Value) -> Result<Self, CommandError> {
        let obj = value.as_object().ok_or(CommandError::NotAnObject)?;

        let (action, type_is_discriminator) = match string_field(obj, &["action", "op"]) {
            Some(action) => (action, false),
            None => (
                string_field(obj, &["type"]).ok_or(CommandError::MissingAction)?,
                true,
            ),
        };

        let normalized: String = action
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "addsection" | "add" | "insertsection" => Ok(decode_add(obj, type_is_discriminator)),
            "updatesection" | "update" | "editsection" => {
                let section_id = required_id(obj, "update_section")?;
                Ok(PatchCommand::UpdateSection {
                    section_id,
                    props: object_field(obj, &["props"]),
                    styles: object_field(obj, &["styles"]),
                })
            }
            "deletesection" | "removesection" | "delete" | "remove" => Ok(PatchCommand::DeleteSection {
                section_id: required_id(obj, "delete_section")?,
            }),
            "movesection" | "move" => {
                let section_id = required_id(obj, "move_section")?;
                let direction = string_field(obj, &["direction", "to"]).ok_or(CommandError::MissingField {
                    action: "move_section",
                    field: "direction",
                })?;
                let direction = Direction::from_name(&direction).ok_or(CommandError::InvalidField {
                    action: "move_section",
                    field: "direction",
                })?;
                Ok(PatchCommand::MoveSection {
                    section_id,
                    direction,
                })
            }
            "updatemetadata" | "updatemeta" | "setmetadata" => {
                let metadata = object_field(obj, &["metadata", "meta", "partial"]).unwrap_or_else(|| {
                    obj.iter()
                        .filter(|(key, _)| !matches!(key.as_str(), "action" | "op" | "type"))
                        .map(|(key, value)| (key.clone(), value.clone()))
                        .collect()
                });
                Ok(PatchCommand::UpdateMetadata { metadata })
            }
            "replacedocument" | "replace" | "setdocument" => {
                let full = ["document", "full", "ast"]
                    .iter()
                    .find_map(|key| obj.get(*key).filter(|v| v.is_object()))
                    .ok_or(CommandError::MissingField {
                        action: "replace_document",
                        field: "document",
                    })?;
                let document = serde_json::from_value::<Document>(full.clone()).map_err(|_| {
                    CommandError::InvalidField {
                        action: "replace_document",
                        field: "document",
                    }
                })?;
                Ok(PatchCommand::ReplaceDocument { document })
            }
            _ => Err(CommandError::UnknownAction(action)),
        }
    }
}

fn decode_add(obj: &Map<String, Value>, type_is_discriminator: bool) -> PatchCommand {
    // `{"action":"add_section","section":{...}}` nests the section body
    let body = obj.get("section").and_then(Value::as_object).unwrap_or(obj);

    let mut type_keys = vec!["section_type", "sectionType", "component"];
    if !type_is_discriminator || !std::ptr::eq(body, obj) {
        type_keys.push("type");
    }

    PatchCommand::AddSection {
        section_type: string_field(body, &type_keys).map(|tag| SectionKind::from_tag(&tag)),
        props: object_field(body, &["props"]).unwrap_or_default(),
        styles: object_field(body, &["styles"]).unwrap_or_default(),
        section_id: string_field(body, &["section_id", "sectionId", "id"])
            .or_else(|| string_field(obj, &["section_id", "sectionId"])),
        index: index_field(obj).or_else(|| index_field(body)),
    }
}

fn required_id(obj: &Map<String, Value>, action: &'static str) -> Result<String, CommandError> {
    string_field(obj, &["section_id", "sectionId", "id", "target"]).ok_or(CommandError::MissingField {
        action,
        field: "section_id",
    })
}

fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn object_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<Map<String, Value>> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_object).cloned())
}

fn index_field(obj: &Map<String, Value>) -> Option<i64> {
    ["index", "position"].iter().find_map(|key| match obj.get(*key) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Ordered mutation commands plus an optional explanation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatchBatch {
    #[serde(rename = "ast_actions", default)]
    pub commands: Vec<PatchCommand>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl PatchBatch {
    pub fn new(commands: Vec<PatchCommand>) -> Self {
        Self {
            commands,
            explanation: None,
        }
    }

    pub fn single(command: PatchCommand) -> Self {
        Self::new(vec![command])
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether `value` carries at least one batch-shape key
    pub fn is_batch_shape(value: &Value) -> bool {
        value
            .as_object()
            .map(|obj| BATCH_SHAPE_KEYS.iter().any(|key| obj.contains_key(*key)))
            .unwrap_or(false)
    }

    /// Decode a batch, dropping malformed commands
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::decode(value).map(|(batch, _)| batch)
    }

    /// Decode a batch and report the commands that were skipped
    pub fn decode(value: &Value) -> Option<(Self, Vec<CommandError>)> {
        if !Self::is_batch_shape(value) {
            return None;
        }
        let obj = value.as_object()?;

        let mut commands = Vec::new();
        let mut rejected = Vec::new();

        if let Some(replacement) = decode_shorthand(obj) {
            commands.push(replacement);
        }

        if let Some(actions) = obj.get("ast_actions").and_then(Value::as_array) {
            for raw in actions {
                match PatchCommand::from_value(raw) {
                    Ok(command) => commands.push(command),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping malformed command");
                        rejected.push(e);
                    }
                }
            }
        }

        if obj.contains_key("actions") {
            tracing::debug!("ignoring legacy `actions` array (raw-file mode)");
        }

        let explanation = match obj.get("explanation") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        };

        Some((
            Self {
                commands,
                explanation,
            },
            rejected,
        ))
    }
}

/// `{"sections":[...], "meta":{...}, "id":"..."}` as a full replacement
fn decode_shorthand(obj: &Map<String, Value>) -> Option<PatchCommand> {
    let items = obj
        .get("sections")
        .or_else(|| obj.get("slides"))
        .and_then(Value::as_array)?;

    let metadata = obj
        .get("meta")
        .or_else(|| obj.get("metadata"))
        .filter(|v| v.is_object())
        .and_then(|v| serde_json::from_value::<Metadata>(v.clone()).ok())
        .unwrap_or_default();

    let id = string_field(obj, &["id"]).unwrap_or_else(id_generator::document_id);

    let mut document = Document::new(id, metadata);
    document.sections = decode_sections(items.clone());

    Some(PatchCommand::ReplaceDocument {
        document: document.normalize(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_add_section() {
        let batch = PatchBatch::from_value(&json!({
            "ast_actions": [
                { "action": "add_section", "section_type": "Hero", "props": { "title": "T" } }
            ],
            "explanation": "ok"
        }))
        .unwrap();

        assert_eq!(batch.explanation.as_deref(), Some("ok"));
        match &batch.commands[0] {
            PatchCommand::AddSection {
                section_type, props, ..
            } => {
                assert_eq!(section_type, &Some(SectionKind::Hero));
                assert_eq!(props["title"], "T");
            }
            other => panic!("Expected AddSection, got {:?}", other),
        }
    }

    #[test]
    fn test_type_as_discriminator() {
        let command = PatchCommand::from_value(&json!({
            "type": "deleteSection",
            "sectionId": "a"
        }))
        .unwrap();
        assert_eq!(
            command,
            PatchCommand::DeleteSection {
                section_id: "a".to_string()
            }
        );
    }

    #[test]
    fn test_type_field_is_section_type_when_action_present() {
        let command = PatchCommand::from_value(&json!({
            "action": "add-section",
            "type": "pricing",
            "index": "1"
        }))
        .unwrap();
        match command {
            PatchCommand::AddSection {
                section_type, index, ..
            } => {
                assert_eq!(section_type, Some(SectionKind::Pricing));
                assert_eq!(index, Some(1));
            }
            other => panic!("Expected AddSection, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_section_body() {
        let command = PatchCommand::from_value(&json!({
            "action": "add_section",
            "section": { "type": "Footer", "id": "f1", "props": { "brand": "Acme" } },
            "index": 0
        }))
        .unwrap();
        match command {
            PatchCommand::AddSection {
                section_type,
                section_id,
                index,
                props,
                ..
            } => {
                assert_eq!(section_type, Some(SectionKind::Footer));
                assert_eq!(section_id.as_deref(), Some("f1"));
                assert_eq!(index, Some(0));
                assert_eq!(props["brand"], "Acme");
            }
            other => panic!("Expected AddSection, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_commands_are_skipped() {
        let (batch, rejected) = PatchBatch::decode(&json!({
            "ast_actions": [
                { "action": "delete_section" },
                { "action": "teleport_section", "section_id": "a" },
                "nonsense",
                { "action": "move_section", "section_id": "a", "direction": "sideways" },
                { "action": "delete_section", "section_id": "b" }
            ]
        }))
        .unwrap();

        assert_eq!(batch.commands.len(), 1);
        assert_eq!(rejected.len(), 4);
        assert_eq!(
            rejected[0],
            CommandError::MissingField {
                action: "delete_section",
                field: "section_id"
            }
        );
    }

    #[test]
    fn test_non_batch_objects_are_rejected() {
        assert!(PatchBatch::from_value(&json!({ "question": "Which colour?" })).is_none());
        assert!(PatchBatch::from_value(&json!({ "actions": [] })).is_none());
        assert!(PatchBatch::from_value(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_sections_shorthand_replaces_document() {
        let batch = PatchBatch::from_value(&json!({
            "format": "landing",
            "id": "doc-9",
            "meta": { "title": "Acme", "theme": "light" },
            "sections": [{ "id": "h", "type": "Hero" }, null]
        }))
        .unwrap();

        match &batch.commands[0] {
            PatchCommand::ReplaceDocument { document } => {
                assert_eq!(document.id, "doc-9");
                assert_eq!(document.metadata.title, "Acme");
                assert_eq!(document.sections.len(), 1);
            }
            other => panic!("Expected ReplaceDocument, got {:?}", other),
        }
    }

    #[test]
    fn test_metadata_from_inline_keys() {
        let command = PatchCommand::from_value(&json!({
            "action": "update_metadata",
            "title": "New title"
        }))
        .unwrap();
        match command {
            PatchCommand::UpdateMetadata { metadata } => assert_eq!(metadata["title"], "New title"),
            other => panic!("Expected UpdateMetadata, got {:?}", other),
        }
    }

    #[test]
    fn test_serialized_batch_decodes_back() {
        let batch = PatchBatch::single(PatchCommand::MoveSection {
            section_id: "a".to_string(),
            direction: Direction::Down,
        })
        .with_explanation("moved");

        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["ast_actions"][0]["action"], "move_section");
        assert_eq!(PatchBatch::from_value(&json), Some(batch));
    }
}
