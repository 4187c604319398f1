//! # Extraction & Repair
//!
//! ```text
//! text ──▶ find_batch ──▶ Batch
//!              │
//!              ▼ (nothing found)
//!        looks_like_batch? ── no ──▶ Reply(text)
//!              │ yes
//!              ▼
//!        one repair call (temperature 0)
//!              │
//!              ▼
//!         find_batch ──▶ Batch { repaired: true }
//!              │
//!              ▼ (still nothing)
//!          Reply(text)
//! ```
//!
//! There is never more than one repair call per response.

use crate::extract::{find_batch, looks_like_batch};
use crate::service::{ChatMessage, GenerateRequest, GenerationError, GenerationService};
use pagekit_editor::PatchBatch;
use thiserror::Error;

pub const REPAIR_SYSTEM_PROMPT: &str = "You extract structured data. The user message contains a response \
that was meant to hold a JSON page patch but is malformed. Reply with only the corrected JSON object, with \
no prose and no code fences. Keep the keys `ast_actions`, `explanation`, `sections`, `meta` exactly as \
written. Every command in `ast_actions` needs an `action` field.";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Repair call failed: {0}")]
    Repair(#[source] GenerationError),
}

/// What a generated response turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Batch { batch: PatchBatch, repaired: bool },
    /// Conversational text, shown to the user as is
    Reply(String),
}

impl Extraction {
    pub fn batch(&self) -> Option<&PatchBatch> {
        match self {
            Extraction::Batch { batch, .. } => Some(batch),
            Extraction::Reply(_) => None,
        }
    }
}

/// Settings for the repair call
#[derive(Debug, Clone, PartialEq)]
pub struct RepairConfig {
    pub model: String,
    pub max_tokens: u32,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            model: "default".to_string(),
            max_tokens: 4096,
        }
    }
}

/// Steps 1–3 only; prose becomes a reply
pub fn extract_local(text: &str) -> Extraction {
    match find_batch(text) {
        Some(found) => Extraction::Batch {
            batch: found.batch,
            repaired: false,
        },
        None => Extraction::Reply(text.trim().to_string()),
    }
}

/// Full pipeline, including at most one repair call
pub async fn extract(
    text: &str,
    service: &dyn GenerationService,
    config: &RepairConfig,
) -> Result<Extraction, ExtractError> {
    if let Some(found) = find_batch(text) {
        return Ok(Extraction::Batch {
            batch: found.batch,
            repaired: false,
        });
    }

    if !looks_like_batch(text) {
        return Ok(Extraction::Reply(text.trim().to_string()));
    }

    tracing::info!("response mentions batch fields but none parsed, attempting repair");
    let request = repair_request(text, config);
    let repaired = service.generate(&request).await.map_err(ExtractError::Repair)?;

    match find_batch(&repaired) {
        Some(found) => {
            tracing::info!(commands = found.batch.commands.len(), "repair recovered a batch");
            Ok(Extraction::Batch {
                batch: found.batch,
                repaired: true,
            })
        }
        None => {
            tracing::warn!("repair produced no batch, treating response as a reply");
            Ok(Extraction::Reply(text.trim().to_string()))
        }
    }
}

pub fn repair_request(text: &str, config: &RepairConfig) -> GenerateRequest {
    GenerateRequest {
        system_prompt: REPAIR_SYSTEM_PROMPT.to_string(),
        history: vec![ChatMessage::user(text)],
        model: config.model.clone(),
        max_tokens: config.max_tokens,
        temperature: 0.0,
    }
}
