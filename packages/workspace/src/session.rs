//! # Page Session
//!
//! Runs conversational turns against one page document.
//!
//! ```text
//! submit(message)
//!   ├─ busy? ──▶ SessionError::Busy
//!   ├─ image search   (optional)
//!   ├─ copywriting    (optional)
//!   ├─ generation     (streamed chunks → StatusEvent)
//!   ├─ stale? ──▶ Discarded
//!   ├─ extract (+ at most one repair call)
//!   └─ stale? ──▶ Discarded, else apply once
//! ```
//!
//! The document only changes in the final step, after a complete batch has
//! been extracted. Upstream failures leave it untouched.

use crate::config::SessionConfig;
use crate::prompt::{copywriting_message, system_prompt, PromptContext, COPYWRITING_SYSTEM_PROMPT};
use crate::status::{StatusEvent, StatusSink, Step, StepStatus};
use chrono::Utc;
use pagekit_document::Document;
use pagekit_editor::{ApplyReport, DocumentStore, SubscriptionId};
use pagekit_extract::{
    extract, find_batch, looks_like_batch, ChatMessage, ExtractError, Extraction, GenerationError,
    GenerationService, ImageSearch, Orientation,
};
use pagekit_registry::SectionRegistry;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("A request is already in progress for this page")]
    Busy,

    #[error("{step} failed: {source}")]
    Upstream {
        step: Step,
        #[source]
        source: GenerationError,
    },

    #[error("Failed to encode the page: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Optional steps for one turn
#[derive(Debug, Clone, Default)]
pub struct TurnOptions {
    /// Image label to search query. Ignored when no image search is attached.
    pub image_queries: BTreeMap<String, String>,
    pub orientation: Orientation,
    /// Run a copywriting call first and fold its notes into the prompt
    pub copywriting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    Applied {
        report: ApplyReport,
        explanation: Option<String>,
        repaired: bool,
        version: u64,
    },
    /// Conversational answer; the document is unchanged
    Reply(String),
    /// A new page was started while this turn was running
    Discarded,
}

pub struct PageSession {
    store: Mutex<DocumentStore>,
    history: Mutex<Vec<ChatMessage>>,
    generator: Arc<dyn GenerationService>,
    images: Option<Arc<dyn ImageSearch>>,
    registry: SectionRegistry,
    config: SessionConfig,
    status: StatusSink,
    busy: AtomicBool,
    request_id: AtomicU64,
}

/// Clears the busy flag when a turn ends, however it ends
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PageSession {
    pub fn new(document: Document, generator: Arc<dyn GenerationService>, config: SessionConfig) -> Self {
        Self {
            store: Mutex::new(DocumentStore::new(document)),
            history: Mutex::new(Vec::new()),
            generator,
            images: None,
            registry: SectionRegistry::new(),
            config,
            status: StatusSink::default(),
            busy: AtomicBool::new(false),
            request_id: AtomicU64::new(0),
        }
    }

    pub fn with_image_search(mut self, images: Arc<dyn ImageSearch>) -> Self {
        self.images = Some(images);
        self
    }

    /// Report step progress on `sender`
    pub fn with_status(mut self, sender: mpsc::UnboundedSender<StatusEvent>) -> Self {
        self.status = StatusSink::new(Some(sender));
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Snapshot of the current document
    pub fn document(&self) -> Document {
        lock(&self.store).document().clone()
    }

    pub fn version(&self) -> u64 {
        lock(&self.store).version()
    }

    pub fn history(&self) -> Vec<ChatMessage> {
        lock(&self.history).clone()
    }

    pub fn request_id(&self) -> u64 {
        self.request_id.load(Ordering::Acquire)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Document, u64) + Send + 'static,
    {
        lock(&self.store).subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        lock(&self.store).unsubscribe(id)
    }

    /// Direct access to the store, for manual edits between turns
    pub fn with_store<R>(&self, f: impl FnOnce(&mut DocumentStore) -> R) -> R {
        f(&mut lock(&self.store))
    }

    /// Start over with `document`. Any turn still in flight is discarded when
    /// it resolves.
    pub fn new_page(&self, document: Document) {
        let mut store = lock(&self.store);
        let request_id = self.request_id.fetch_add(1, Ordering::AcqRel) + 1;
        store.replace(document);
        lock(&self.history).clear();
        tracing::info!(request_id, "new page started");
    }

    /// Run one turn for `message`
    pub async fn submit(&self, message: &str, options: TurnOptions) -> Result<TurnOutcome, SessionError> {
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(SessionError::Busy);
        }
        let _busy = BusyGuard(&self.busy);

        let request_id = self.request_id();
        tracing::info!(request_id, "turn started");

        let document = self.document();
        let mut context = PromptContext {
            now: Some(Utc::now()),
            ..PromptContext::default()
        };

        if let Some(images) = self.images.as_ref().filter(|_| !options.image_queries.is_empty()) {
            context.images = self
                .run_step(
                    request_id,
                    Step::ImageSearch,
                    images.search(&options.image_queries, options.orientation),
                )
                .await?;
        }

        if options.copywriting {
            let request = self.config.request(
                COPYWRITING_SYSTEM_PROMPT.to_string(),
                vec![ChatMessage::user(copywriting_message(&document, message))],
            );
            let notes = self
                .run_step(request_id, Step::Copywriting, self.generator.generate(&request))
                .await?;
            context.copy_notes = Some(notes);
        }

        let mut history = self.history();
        history.push(ChatMessage::user(message));
        let request = self.config.request(system_prompt(&document, &self.registry, &context)?, history);

        let status = self.status.clone();
        let mut on_chunk = move |chunk: &str| {
            status.emit(request_id, Step::Generation, StepStatus::Chunk { text: chunk.to_string() });
        };
        let text = self
            .run_step(
                request_id,
                Step::Generation,
                self.generator.stream_generate(&request, &mut on_chunk),
            )
            .await?;

        if self.is_stale(request_id) {
            tracing::info!(request_id, "discarding stale response");
            return Ok(TurnOutcome::Discarded);
        }

        let needs_repair = find_batch(&text).is_none() && looks_like_batch(&text);
        if needs_repair {
            self.status.emit(request_id, Step::Repair, StepStatus::Started);
        }
        let extraction = match extract(&text, self.generator.as_ref(), &self.config.repair()).await {
            Ok(extraction) => extraction,
            Err(ExtractError::Repair(source)) => {
                return Err(self.fail(request_id, Step::Repair, source));
            }
        };
        if needs_repair {
            self.status.emit(request_id, Step::Repair, StepStatus::Finished);
        }

        Ok(self.finish(request_id, message, extraction))
    }

    fn finish(&self, request_id: u64, message: &str, extraction: Extraction) -> TurnOutcome {
        let mut store = lock(&self.store);
        if self.is_stale(request_id) {
            tracing::info!(request_id, "discarding stale response");
            return TurnOutcome::Discarded;
        }

        match extraction {
            Extraction::Batch { batch, repaired } => {
                let report = store.apply(&batch);
                let version = store.version();
                tracing::info!(request_id, version, ?report, repaired, "turn applied");
                self.status.emit(request_id, Step::Apply, StepStatus::Finished);

                let summary = batch
                    .explanation
                    .clone()
                    .unwrap_or_else(|| format!("Applied {} change(s).", report.applied));
                self.record(message, summary);

                TurnOutcome::Applied {
                    report,
                    explanation: batch.explanation,
                    repaired,
                    version,
                }
            }
            Extraction::Reply(text) => {
                tracing::info!(request_id, "turn answered without changes");
                self.record(message, text.clone());
                TurnOutcome::Reply(text)
            }
        }
    }

    fn record(&self, message: &str, answer: String) {
        let mut history = lock(&self.history);
        history.push(ChatMessage::user(message));
        history.push(ChatMessage::assistant(answer));

        let limit = self.config.history_limit;
        if history.len() > limit {
            let excess = history.len() - limit;
            history.drain(..excess);
        }
    }

    fn is_stale(&self, request_id: u64) -> bool {
        self.request_id() != request_id
    }

    async fn run_step<T, F>(&self, request_id: u64, step: Step, call: F) -> Result<T, SessionError>
    where
        F: Future<Output = Result<T, GenerationError>>,
    {
        self.status.emit(request_id, step, StepStatus::Started);
        match call.await {
            Ok(value) => {
                self.status.emit(request_id, step, StepStatus::Finished);
                Ok(value)
            }
            Err(source) => Err(self.fail(request_id, step, source)),
        }
    }

    fn fail(&self, request_id: u64, step: Step, source: GenerationError) -> SessionError {
        tracing::warn!(request_id, %step, error = %source, "upstream call failed");
        self.status.emit(
            request_id,
            step,
            StepStatus::Failed {
                message: source.to_string(),
            },
        );
        SessionError::Upstream { step, source }
    }
}

impl std::fmt::Debug for PageSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSession")
            .field("config", &self.config)
            .field("request_id", &self.request_id())
            .field("busy", &self.is_busy())
            .finish()
    }
}
