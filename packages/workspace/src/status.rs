//! Progress events emitted while a turn runs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tokio::sync::mpsc;

/// A stage of the turn pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    ImageSearch,
    Copywriting,
    Generation,
    Repair,
    Apply,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::ImageSearch => "image search",
            Step::Copywriting => "copywriting",
            Step::Generation => "generation",
            Step::Repair => "repair",
            Step::Apply => "apply",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum StepStatus {
    Started,
    /// Streamed text; informational only, never applied
    Chunk { text: String },
    Finished,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    pub request_id: u64,
    pub step: Step,
    #[serde(flatten)]
    pub status: StepStatus,
    pub at: DateTime<Utc>,
}

/// Sends status events when a channel is attached. A dropped receiver is
/// ignored.
#[derive(Debug, Clone, Default)]
pub(crate) struct StatusSink {
    sender: Option<mpsc::UnboundedSender<StatusEvent>>,
}

impl StatusSink {
    pub(crate) fn new(sender: Option<mpsc::UnboundedSender<StatusEvent>>) -> Self {
        Self { sender }
    }

    pub(crate) fn emit(&self, request_id: u64, step: Step, status: StepStatus) {
        if let Some(sender) = &self.sender {
            let event = StatusEvent {
                request_id,
                step,
                status,
                at: Utc::now(),
            };
            if sender.send(event).is_err() {
                tracing::trace!(%step, "status receiver dropped");
            }
        }
    }
}
