use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::store::{DocumentStore, WriteOp};

/// Ceiling on writes per batch commit, below the atomic-batch limit of
/// managed document stores.
pub(crate) const MAX_BATCH_WRITES: usize = 450;

/// Net effect of reconciling one collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    pub upserts: usize,
    pub deletes: usize,
}

/// Reconcile a freshly parsed entity set against the persisted subset
/// carrying the same source tag.
///
/// Every fresh document is merge-upserted unless the persisted copy already
/// carries all of its fields unchanged; every persisted document with this
/// source tag whose id is absent from the fresh set is deleted. Documents
/// tagged by other producers are never touched. Writes are committed in
/// size-bounded batches.
///
/// `volatile_fields` are excluded from the no-op comparison (run timestamps
/// and the like), so they alone never force a rewrite.
pub(crate) async fn reconcile<S: DocumentStore>(
    store: &S,
    collection: &'static str,
    source: &str,
    fresh: Vec<(String, Value)>,
    volatile_fields: &[&str],
) -> Result<SyncStats> {
    let snapshot: HashMap<String, Value> = store
        .docs_for_source(collection, source)
        .await?
        .into_iter()
        .collect();

    let fresh_ids: HashSet<&str> = fresh.iter().map(|(id, _)| id.as_str()).collect();

    let mut writes = Vec::new();
    let mut stats = SyncStats::default();

    for (id, doc) in &fresh {
        if let Some(existing) = snapshot.get(id) {
            if merge_would_be_noop(existing, doc, volatile_fields) {
                continue;
            }
        }
        stats.upserts += 1;
        writes.push(WriteOp::MergeSet {
            collection,
            id: id.clone(),
            doc: doc.clone(),
        });
    }

    for id in snapshot.keys() {
        if !fresh_ids.contains(id.as_str()) {
            stats.deletes += 1;
            writes.push(WriteOp::Delete {
                collection,
                id: id.clone(),
            });
        }
    }

    for batch in writes.chunks(MAX_BATCH_WRITES) {
        store.commit(batch.to_vec()).await?;
    }

    debug!(
        collection,
        upserts = stats.upserts,
        deletes = stats.deletes,
        "reconciled collection"
    );
    Ok(stats)
}

/// True when every non-volatile field of `incoming` is already present and
/// equal on `existing`, meaning a merge-set would change nothing.
fn merge_would_be_noop(existing: &Value, incoming: &Value, volatile_fields: &[&str]) -> bool {
    match incoming.as_object() {
        Some(fields) => fields
            .iter()
            .filter(|(key, _)| !volatile_fields.contains(&key.as_str()))
            .all(|(key, value)| existing.get(key) == Some(value)),
        None => existing == incoming,
    }
}
