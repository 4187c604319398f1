//! # Pagekit Extract
//!
//! Turns generated text into patch batches. The generation and image search
//! services are external; this crate defines their traits and the
//! extraction/repair pipeline that sits between them and the patch engine.

pub mod extract;
pub mod pipeline;
pub mod service;

pub use extract::{extract_batch, find_batch, looks_like_batch, Found, Source, HEURISTIC_TOKENS};
pub use pipeline::{extract, extract_local, ExtractError, Extraction, RepairConfig, REPAIR_SYSTEM_PROMPT};
pub use service::{
    ChatMessage, ChatRole, GenerateRequest, GenerationError, GenerationService, ImageSearch, Orientation,
};
