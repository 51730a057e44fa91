//! Error types for pipeline runs.

use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that abort a pipeline run.
///
/// Per-file problems are logged and skipped inside the stages; only
/// failures that make a whole stage impossible (an unreadable working
/// directory, most commonly) surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("media error: {0}")]
    Media(#[from] lclip_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
