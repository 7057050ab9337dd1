mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Collection holding medal standings, keyed by three-letter region code.
pub const MEDALS_COLLECTION: &str = "medals";
/// Collection holding schedule entries, keyed by content hash.
pub const EVENTS_COLLECTION: &str = "events";
/// Collection holding per-day digests, keyed by ISO date.
pub const DAILY_COLLECTION: &str = "daily_medal_events";

/// A single write inside a batched commit.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Upsert with merge semantics: fields absent from `doc` survive on the
    /// persisted document, so other writers' fields are never clobbered.
    MergeSet {
        collection: &'static str,
        id: String,
        doc: Value,
    },
    /// Remove a document outright.
    Delete {
        collection: &'static str,
        id: String,
    },
}

/// The document store the pipeline reconciles against.
///
/// Implementations are injected into [`SyncClient`](crate::SyncClient) so
/// tests can substitute [`MemoryStore`] for a managed backend.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in `collection` whose `source` field equals `source`,
    /// as `(id, document)` pairs.
    async fn docs_for_source(&self, collection: &str, source: &str)
        -> Result<Vec<(String, Value)>>;

    /// Atomically apply one batch of writes. Callers keep batches within the
    /// store's batch-size ceiling.
    async fn commit(&self, batch: Vec<WriteOp>) -> Result<()>;
}
