// Copyright 2024 Helix Platform
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// crates/hbnb-core/src/store/in_memory_store.rs

use crate::entity::AnyEntity;
use crate::errors::HbnbError;
use crate::store::EntityStore;
use crate::types::EntityKind;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Creates a composite string key from kind and id (`"Place.<id>"`).
fn create_key(kind: EntityKind, id: &str) -> String {
    format!("{}.{}", kind, id)
}

#[derive(Debug)]
struct StoredRecord {
    kind: EntityKind,
    /// Insertion sequence; replacing a record keeps its original position.
    seq: u64,
    bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct Records {
    next_seq: u64,
    by_key: HashMap<String, StoredRecord>,
}

/// An in-memory implementation of the `EntityStore` trait.
///
/// This store uses a thread-safe `HashMap` keyed by `"<Kind>.<id>"`, with
/// values held as `serde_json`-serialized entities. Listing returns records in
/// insertion order.
#[derive(Debug, Clone)]
pub struct InMemoryEntityStore {
    records: Arc<Mutex<Records>>,
}

impl InMemoryEntityStore {
    /// Creates a new, empty `InMemoryEntityStore`.
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Records::default())),
        }
    }

    fn lock(&self, op: &str) -> Result<std::sync::MutexGuard<'_, Records>, HbnbError> {
        self.records.lock().map_err(|e| {
            HbnbError::InternalError(format!("Failed to acquire lock for {}: {}", op, e))
        })
    }
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

fn decode(kind: EntityKind, bytes: &[u8], op: &str) -> Result<AnyEntity, HbnbError> {
    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| {
        HbnbError::InternalError(format!("Deserialization failed for {}: {}", op, e))
    })?;
    AnyEntity::from_json(kind, value)
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<AnyEntity>, HbnbError> {
        let key = create_key(kind, id);
        let records = self.lock("get")?;
        match records.by_key.get(&key) {
            Some(record) => Ok(Some(decode(kind, &record.bytes, "get")?)),
            None => Ok(None),
        }
    }

    async fn all(&self, kind: EntityKind) -> Result<Vec<AnyEntity>, HbnbError> {
        let records = self.lock("all")?;
        let mut matching: Vec<&StoredRecord> = records
            .by_key
            .values()
            .filter(|record| record.kind == kind)
            .collect();
        matching.sort_by_key(|record| record.seq);
        matching
            .into_iter()
            .map(|record| decode(kind, &record.bytes, "all"))
            .collect()
    }

    async fn count(&self, kind: EntityKind) -> Result<u64, HbnbError> {
        let records = self.lock("count")?;
        Ok(records
            .by_key
            .values()
            .filter(|record| record.kind == kind)
            .count() as u64)
    }

    async fn save(&self, entity: AnyEntity) -> Result<(), HbnbError> {
        let kind = entity.kind();
        let key = create_key(kind, entity.id());
        let bytes = serde_json::to_vec(&entity.to_json()?).map_err(|e| {
            HbnbError::InternalError(format!("Serialization failed for save: {}", e))
        })?;

        let mut records = self.lock("save")?;
        let records = &mut *records;
        match records.by_key.get_mut(&key) {
            Some(existing) => existing.bytes = bytes,
            None => {
                let seq = records.next_seq;
                records.next_seq += 1;
                records.by_key.insert(key, StoredRecord { kind, seq, bytes });
            }
        }
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<bool, HbnbError> {
        let key = create_key(kind, id);
        let mut records = self.lock("delete")?;
        Ok(records.by_key.remove(&key).is_some())
    }
}
