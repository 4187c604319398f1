//! # Document Store
//!
//! Explicit owner of the current page document. All mutation goes through
//! [`DocumentStore::apply`] (or [`DocumentStore::replace`] when a new page is
//! started); renderers observe changes through subscriptions.
//!
//! ## Lifecycle
//!
//! ```text
//! create (empty / template / AI) → apply* → replace (new page) → apply* ...
//!                     ↓
//!          subscribers(document, version)
//! ```

use crate::commands::PatchBatch;
use crate::engine::{apply_with_report, ApplyReport};
use pagekit_document::Document;
use std::fmt;

/// Callback invoked after every state change
pub type Subscriber = Box<dyn FnMut(&Document, u64) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct DocumentStore {
    document: Document,

    /// Increments on every change (apply that changed something, or replace)
    version: u64,

    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl DocumentStore {
    pub fn new(document: Document) -> Self {
        Self {
            document: document.normalize(),
            version: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a batch. Subscribers are notified only when the document changed.
    pub fn apply(&mut self, batch: &PatchBatch) -> ApplyReport {
        let (next, report) = apply_with_report(&self.document, batch);

        if next != self.document {
            self.document = next;
            self.version += 1;
            tracing::debug!(version = self.version, ?report, "document updated");
            self.notify();
        }

        report
    }

    /// Supersede the current document (new page)
    pub fn replace(&mut self, document: Document) {
        self.document = document.normalize();
        self.version += 1;
        tracing::debug!(version = self.version, id = %self.document.id, "document replaced");
        self.notify();
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Document, u64) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false when the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.document, self.version);
        }
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(Document::empty())
    }
}

impl fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("document", &self.document)
            .field("version", &self.version)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
