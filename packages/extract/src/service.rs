//! External capabilities consumed by the pipeline.
//!
//! Text generation and image search are network services owned by the host
//! application. The core only sees these traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Service returned an empty response")]
    EmptyResponse,

    #[error("Rate limited by the service")]
    RateLimited,

    #[error("Request timed out after {0}s")]
    Timeout(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// One call to the generation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub system_prompt: String,
    pub history: Vec<ChatMessage>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Turns prompts into text
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, GenerationError>;

    /// Like [`generate`](Self::generate), reporting chunks as they arrive.
    /// Returns the full text. The default reports the whole response as one
    /// chunk.
    async fn stream_generate(
        &self,
        request: &GenerateRequest,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<String, GenerationError> {
        let text = self.generate(request).await?;
        on_chunk(&text);
        Ok(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
    Squarish,
}

/// Returns image URLs for named queries
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Map each `label → query` to `label → url`. Labels with no result are
    /// left out.
    async fn search(
        &self,
        queries: &BTreeMap<String, String>,
        orientation: Orientation,
    ) -> Result<BTreeMap<String, String>, GenerationError>;
}
