//! # Edit Session
//!
//! One user's interactive view of a document: the store that owns it, the
//! current selection, the editing surface opened for that selection, and a
//! destructive control waiting for confirmation.
//!
//! Every change to the document still goes through a [`PatchBatch`], so the
//! interactive path and generated batches share one set of semantics.

use crate::commands::{Direction, PatchBatch, PatchCommand};
use crate::engine::ApplyReport;
use crate::errors::EditorError;
use crate::store::DocumentStore;
use crate::surface::{EditingSurface, RawEditor};
use pagekit_document::{id_generator, Document, Props};
use pagekit_renderer::{render, Control, Hit, RenderState, VirtualDomDocument};
use serde_json::{Map, Value};

/// Destructive control waiting for the user to confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub section_id: String,
    pub control: Control,
}

/// Result of pressing a structural control
#[derive(Debug, Clone, PartialEq)]
pub enum ControlOutcome {
    Applied(ApplyReport),
    /// Id of the new copy
    Duplicated(String),
    /// Nothing changed yet; see [`EditSession::resolve_confirmation`]
    AwaitingConfirmation,
}

pub struct EditSession {
    store: DocumentStore,
    selected: Option<String>,
    surface: EditingSurface,
    pending: Option<PendingConfirmation>,
}

impl EditSession {
    pub fn new(document: Document) -> Self {
        Self::with_store(DocumentStore::new(document))
    }

    pub fn with_store(store: DocumentStore) -> Self {
        Self {
            store,
            selected: None,
            surface: EditingSurface::Closed,
            pending: None,
        }
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DocumentStore {
        &mut self.store
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn surface(&self) -> &EditingSurface {
        &self.surface
    }

    pub fn pending_confirmation(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    /// Interactive tree for the current document and selection
    pub fn render(&self) -> VirtualDomDocument {
        render(
            self.store.document(),
            &RenderState {
                selected: self.selected.clone(),
            },
        )
    }

    /// Handle a click resolved by [`pagekit_renderer::hit_test`]
    pub fn click(&mut self, hit: &Hit) -> Result<(), EditorError> {
        match hit {
            Hit::Region(id) => self.select(id),
            Hit::Background => {
                self.deselect();
                Ok(())
            }
        }
    }

    /// Select a section and open its editing surface
    pub fn select(&mut self, id: &str) -> Result<(), EditorError> {
        let section = self
            .store
            .document()
            .find(id)
            .ok_or_else(|| EditorError::SectionNotFound(id.to_string()))?;
        self.surface = EditingSurface::open(section);
        self.selected = Some(id.to_string());
        tracing::debug!(section_id = id, "selected");
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
        self.surface = EditingSurface::Closed;
    }

    /// Apply a batch from outside the session (e.g. a generated one)
    pub fn apply(&mut self, batch: &PatchBatch) -> ApplyReport {
        let report = self.store.apply(batch);
        self.sync_selection();
        report
    }

    /// Start over with a new page
    pub fn replace(&mut self, document: Document) {
        self.store.replace(document);
        self.pending = None;
        self.deselect();
    }

    /// Press a structural control on section `id`
    pub fn control(&mut self, id: &str, control: Control) -> Result<ControlOutcome, EditorError> {
        let document = self.store.document();
        let index = document
            .position(id)
            .ok_or_else(|| EditorError::SectionNotFound(id.to_string()))?;

        match control {
            Control::MoveUp | Control::MoveDown => {
                let direction = if control == Control::MoveUp {
                    Direction::Up
                } else {
                    Direction::Down
                };
                let batch = PatchBatch::single(PatchCommand::MoveSection {
                    section_id: id.to_string(),
                    direction,
                });
                Ok(ControlOutcome::Applied(self.apply(&batch)))
            }

            Control::Duplicate => {
                let source = &document.sections[index];
                let copy_id = id_generator::unique_section_id(&source.kind, document);
                let styles: Map<String, Value> = source
                    .styles
                    .iter()
                    .map(|(property, value)| (property.clone(), Value::String(value.clone())))
                    .collect();
                let batch = PatchBatch::single(PatchCommand::AddSection {
                    section_type: Some(source.kind.clone()),
                    props: source.props.clone(),
                    styles,
                    section_id: Some(copy_id.clone()),
                    index: Some(index as i64 + 1),
                });
                self.apply(&batch);
                Ok(ControlOutcome::Duplicated(copy_id))
            }

            Control::Delete => {
                self.pending = Some(PendingConfirmation {
                    section_id: id.to_string(),
                    control,
                });
                Ok(ControlOutcome::AwaitingConfirmation)
            }
        }
    }

    /// Confirm or decline the pending destructive control. Declining leaves
    /// the document unchanged.
    pub fn resolve_confirmation(&mut self, confirmed: bool) -> Result<Option<ApplyReport>, EditorError> {
        let pending = self.pending.take().ok_or(EditorError::NothingToConfirm)?;
        if !confirmed {
            tracing::debug!(section_id = %pending.section_id, "delete declined");
            return Ok(None);
        }

        let batch = PatchBatch::single(PatchCommand::DeleteSection {
            section_id: pending.section_id,
        });
        Ok(Some(self.apply(&batch)))
    }

    /// Set one field of the structured form
    pub fn update_field(&mut self, key: &str, value: &str) -> Result<ApplyReport, EditorError> {
        let EditingSurface::Form(form) = &self.surface else {
            return Err(match self.surface {
                EditingSurface::Closed => EditorError::NoSelection,
                _ => EditorError::NoForm,
            });
        };

        let value = form.value_for(key, value)?;
        let mut props = Props::new();
        props.insert(key.to_string(), value);

        let batch = PatchBatch::single(PatchCommand::UpdateSection {
            section_id: form.section_id.clone(),
            props: Some(props),
            styles: None,
        });
        Ok(self.apply(&batch))
    }

    /// Replace the raw editor's buffer without submitting it
    pub fn set_raw_text(&mut self, text: impl Into<String>) -> Result<(), EditorError> {
        match &mut self.surface {
            EditingSurface::Raw(raw) => {
                raw.text = text.into();
                Ok(())
            }
            EditingSurface::Closed => Err(EditorError::NoSelection),
            EditingSurface::Form(_) => Err(EditorError::NoRawEditor),
        }
    }

    /// Submit the raw editor's buffer as the section's full props. Invalid
    /// JSON or a non-object is reported on the surface and changes nothing.
    pub fn submit_raw(&mut self) -> Result<ApplyReport, EditorError> {
        let raw = match &mut self.surface {
            EditingSurface::Raw(raw) => raw,
            EditingSurface::Closed => return Err(EditorError::NoSelection),
            EditingSurface::Form(_) => return Err(EditorError::NoRawEditor),
        };

        let next = match RawEditor::parse(&raw.text) {
            Ok(props) => props,
            Err(err) => {
                tracing::warn!(section_id = %raw.section_id, error = %err, "raw props rejected");
                raw.error = Some(err.to_string());
                return Err(err);
            }
        };

        let section_id = raw.section_id.clone();
        let current = self
            .store
            .document()
            .find(&section_id)
            .ok_or_else(|| EditorError::SectionNotFound(section_id.clone()))?;

        // Keys dropped from the buffer are removed with explicit nulls.
        let mut props = next;
        for key in current.props.keys() {
            if !props.contains_key(key) {
                props.insert(key.clone(), Value::Null);
            }
        }

        let batch = PatchBatch::single(PatchCommand::UpdateSection {
            section_id: section_id.clone(),
            props: Some(props),
            styles: None,
        });
        let report = self.apply(&batch);
        if let Some(section) = self.store.document().find(&section_id) {
            self.surface = EditingSurface::open(section);
        }
        Ok(report)
    }

    /// Keep selection and surface consistent with the document after a change
    fn sync_selection(&mut self) {
        if let Some(pending) = &self.pending {
            if !self.store.document().contains(&pending.section_id) {
                self.pending = None;
            }
        }

        let Some(id) = self.selected.clone() else {
            return;
        };
        match self.store.document().find(&id) {
            // An unsubmitted raw buffer survives unrelated changes
            Some(_) if matches!(&self.surface, EditingSurface::Raw(raw) if raw.section_id == id) => {}
            Some(section) => self.surface = EditingSurface::open(section),
            None => self.deselect(),
        }
    }
}
