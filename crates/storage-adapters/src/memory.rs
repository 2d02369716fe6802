//! In-process `RecordStore` for tests and throwaway runs.
//!
//! Payloads are kept serialized, exactly as the file store would write
//! them, so corruption and round-trip behaviour match.

use async_trait::async_trait;
use dashmap::DashMap;
use domains::{Collection, RecordStore, StoreResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<Collection, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collections currently held.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn exists(&self, collection: Collection) -> StoreResult<bool> {
        Ok(self.collections.contains_key(&collection))
    }

    async fn fetch(&self, collection: Collection) -> StoreResult<Option<String>> {
        Ok(self
            .collections
            .get(&collection)
            .map(|entry| entry.value().clone()))
    }

    async fn put(&self, collection: Collection, payload: String) -> StoreResult<()> {
        self.collections.insert(collection, payload);
        Ok(())
    }

    async fn remove(&self, collection: Collection) -> StoreResult<()> {
        self.collections.remove(&collection);
        Ok(())
    }
}
