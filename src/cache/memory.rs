//! In-process cache storage
//!
//! Partitions live in memory for the lifetime of the storage value. Deleting
//! a partition detaches it from the registry; handles opened earlier keep
//! working but are no longer reachable by name.

use crate::cache::{CacheStorage, Partition, RequestKey, StoredResponse};
use crate::error::HarborResult;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Memory-backed partition registry
#[derive(Default)]
pub struct MemoryStorage {
    partitions: RwLock<BTreeMap<String, Arc<MemoryPartition>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    async fn open(&self, name: &str) -> HarborResult<Arc<dyn Partition>> {
        if let Some(existing) = self.partitions.read().await.get(name) {
            return Ok(existing.clone());
        }

        let mut partitions = self.partitions.write().await;
        let partition = partitions
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("Creating partition {}", name);
                Arc::new(MemoryPartition::new(name))
            })
            .clone();
        Ok(partition)
    }

    /// Names in lexical order
    async fn list_names(&self) -> HarborResult<Vec<String>> {
        Ok(self.partitions.read().await.keys().cloned().collect())
    }

    async fn delete(&self, name: &str) -> HarborResult<bool> {
        Ok(self.partitions.write().await.remove(name).is_some())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Memory-backed partition
pub struct MemoryPartition {
    name: String,
    entries: RwLock<HashMap<RequestKey, StoredResponse>>,
}

impl MemoryPartition {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Partition for MemoryPartition {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &RequestKey) -> HarborResult<Option<StoredResponse>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: RequestKey, response: StoredResponse) -> HarborResult<()> {
        self.entries.write().await.insert(key, response);
        Ok(())
    }

    async fn keys(&self) -> HarborResult<Vec<RequestKey>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}
