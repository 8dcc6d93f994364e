//! Durable key-value storage for progress summaries
//!
//! The tracker only ever does whole-value `get`/`set` by subject key, so the
//! boundary is a small async trait. Backends:
//! - [`InMemoryStore`] for tests and in-process embedding
//! - [`SqliteSummaryStore`] for durable on-disk storage

pub mod memory;
pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

pub use memory::InMemoryStore;
pub use sqlite::SqliteSummaryStore;

/// Whole-value key-value storage for serialized progress summaries.
///
/// `set` replaces the value for a key atomically; partial writes are never
/// observable through `get`.
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Fetch the raw serialized summary for `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
