//! Progress events streamed from the pipeline to whatever renders them.
//!
//! The pipeline never writes to a display directly; it emits typed events on
//! an unbounded channel and the consumer (CLI today, anything else tomorrow)
//! decides how to render them line by line as work completes.

use tokio::sync::mpsc;

/// Sender half handed to the pipeline.
pub type EventSender = mpsc::UnboundedSender<ProgressEvent>;

/// Receiver half consumed by the renderer.
pub type EventReceiver = mpsc::UnboundedReceiver<ProgressEvent>;

/// One unit of pipeline progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The catalog page was listed and the ranking filter applied.
    CatalogRanked { listed: usize, ranked: usize },
    /// Identifier extraction across the ranked pathways finished.
    IdentifiersExtracted { total: usize, unique: usize },
    /// Batch resolution is starting for this many unique identifiers.
    ResolutionStarted { unique: usize },
    /// One identifier resolved; the value may legitimately be empty.
    Resolved { code: String, value: String },
    /// One identifier failed; it will be absent from the result map.
    ResolutionFailed { code: String, error: String },
    /// A resolution completed for a key already present; first value kept.
    DuplicateResult { code: String },
}

/// Channel pair for one pipeline run.
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
