//! # Pagekit Editor
//!
//! Mutation side of the page engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ commands: untrusted JSON → PatchBatch       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ engine: apply(document, batch) → document'  │
//! │  - pure, never touches its input            │
//! │  - unknown ids are no-ops                   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: current document + subscribers       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: selection, controls, edit surface  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagekit_editor::{DocumentStore, PatchBatch};
//!
//! let mut store = DocumentStore::new(Document::empty());
//! store.subscribe(|doc, version| println!("v{}: {} sections", version, doc.len()));
//!
//! let batch = PatchBatch::from_value(&generated_json).unwrap_or_default();
//! let report = store.apply(&batch);
//! ```

mod commands;
mod engine;
mod errors;
mod session;
mod store;
mod surface;

pub use commands::{CommandError, Direction, PatchBatch, PatchCommand, BATCH_SHAPE_KEYS};
pub use engine::{apply, apply_with_report, ApplyReport};
pub use errors::EditorError;
pub use session::{ControlOutcome, EditSession, PendingConfirmation};
pub use store::{DocumentStore, Subscriber, SubscriptionId};
pub use surface::{form_fields, EditingSurface, FieldForm, FieldInput, FieldSpec, FormField, RawEditor};

// Re-export for convenience
pub use pagekit_renderer::{Control, Hit, VirtualDomDocument};
