//! Companion Progress - longitudinal wellbeing tracking library
//!
//! Folds a stream of per-interaction observations (timestamped
//! emotional-state samples plus free-text topic tags) into one persisted
//! summary per subject:
//! - calendar-day session counting
//! - a bounded window of recent emotional states (FIFO, 30 entries)
//! - cumulative topic frequency counts
//!
//! Storage goes through the [`store::SummaryStore`] trait; SQLite and
//! in-memory backends are provided.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use companion_progress::progress::ProgressTracker;
//! use companion_progress::store::SqliteSummaryStore;
//! use companion_progress::types::ObservationInput;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = SqliteSummaryStore::new("progress.db").await?;
//!     let tracker = ProgressTracker::new(Arc::new(store));
//!     let summary = tracker
//!         .record_observation("user-1", &ObservationInput::at(chrono::Utc::now()))
//!         .await?;
//!     println!("{} sessions so far", summary.session_count);
//!     Ok(())
//! }
//! ```

// Core modules (order matters for cross-module dependencies)
pub mod types;
pub mod error;
pub mod store; // Must come before progress since the tracker depends on it
pub mod progress;
pub mod config;
pub mod cli;

// Re-export commonly used types for convenience
pub use error::ProgressError;
pub use progress::{ProgressTracker, MAX_EMOTIONAL_STATES};
pub use store::{InMemoryStore, SqliteSummaryStore, SummaryStore};
pub use types::{EmotionalStateSample, ObservationInput, ProgressSummary, SentimentAnalysis};

pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Wellbeing Progress Tracking Library", NAME, VERSION)
}
