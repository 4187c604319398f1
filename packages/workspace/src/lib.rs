//! # Pagekit Workspace
//!
//! Async page sessions: one document, one conversation, at most one turn in
//! flight. Each turn assembles a prompt from the section catalog and the
//! current page, calls the generation service, extracts a patch batch and
//! applies it through the document store.

pub mod config;
pub mod prompt;
pub mod session;
pub mod status;

pub use config::SessionConfig;
pub use prompt::{system_prompt, PromptContext};
pub use session::{PageSession, SessionError, TurnOptions, TurnOutcome};
pub use status::{StatusEvent, Step, StepStatus};
