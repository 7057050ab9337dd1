use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, SyncError};
use crate::store::{DocumentStore, WriteOp};

/// In-memory [`DocumentStore`] with the same merge-on-write semantics as a
/// managed backend. Backs tests and the demo runner.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch one document by id, if present.
    pub fn get(&self, collection: &str, id: &str) -> Option<Value> {
        let collections = self.collections.lock().ok()?;
        collections.get(collection)?.get(id).cloned()
    }

    /// Number of documents currently held in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .map(|c| c.get(collection).map_or(0, HashMap::len))
            .unwrap_or(0)
    }

    /// Seed a document directly, bypassing merge semantics. Test helper.
    pub fn insert(&self, collection: &str, id: &str, doc: Value) {
        if let Ok(mut collections) = self.collections.lock() {
            collections
                .entry(collection.to_string())
                .or_default()
                .insert(id.to_string(), doc);
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn docs_for_source(
        &self,
        collection: &str,
        source: &str,
    ) -> Result<Vec<(String, Value)>> {
        let collections = self
            .collections
            .lock()
            .map_err(|e| SyncError::Store(e.to_string()))?;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| doc.get("source").and_then(Value::as_str) == Some(source))
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn commit(&self, batch: Vec<WriteOp>) -> Result<()> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|e| SyncError::Store(e.to_string()))?;
        for op in batch {
            match op {
                WriteOp::MergeSet { collection, id, doc } => {
                    let slot = collections
                        .entry(collection.to_string())
                        .or_default()
                        .entry(id)
                        .or_insert(Value::Null);
                    merge_into(slot, doc);
                }
                WriteOp::Delete { collection, id } => {
                    if let Some(docs) = collections.get_mut(collection) {
                        docs.remove(&id);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Shallow object merge: incoming fields replace existing ones, fields the
/// incoming document omits survive. Non-object payloads replace wholesale.
fn merge_into(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(current), Value::Object(update)) => {
            for (key, value) in update {
                current.insert(key, value);
            }
        }
        (slot, incoming) => *slot = incoming,
    }
}
