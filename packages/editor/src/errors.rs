//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("No section is selected")]
    NoSelection,

    #[error("The selected section is edited as raw JSON")]
    NoForm,

    #[error("The selected section has a structured form")]
    NoRawEditor,

    #[error("Field `{field}` is not editable on {kind} sections")]
    FieldNotEditable { kind: String, field: String },

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Props must be a JSON object, got {0}")]
    PropsNotObject(&'static str),

    #[error("Nothing is waiting for confirmation")]
    NothingToConfirm,
}
