use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}
