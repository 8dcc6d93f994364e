//! Error taxonomy for the progress tracker core
//!
//! The tracker either completes with a fully persisted summary or fails with
//! one of these kinds and no durable change. Callers decide whether a failure
//! is fatal; for most of them "progress not recorded" is a degraded outcome,
//! not a crash.

use thiserror::Error;

/// Failure modes of [`crate::progress::ProgressTracker`].
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The durable store's read or write failed. Nothing was persisted.
    #[error("progress store operation failed")]
    Persistence(#[source] anyhow::Error),

    /// A stored payload exists for the subject but is not a valid summary
    /// encoding. The tracker fails closed instead of resetting accumulated
    /// history to defaults.
    #[error("stored progress summary for `{subject}` could not be decoded")]
    Deserialization {
        subject: String,
        #[source]
        source: serde_json::Error,
    },

    /// The caller supplied an empty subject key.
    #[error("subject key must not be empty")]
    InvalidSubject,
}
