//! Best-effort background stores
//!
//! Writing a fetched response back into a partition happens after the
//! response is already on its way to the page. The write is a detached tokio
//! task: its failure is logged and never reaches the request, and it is never
//! retried. [`BackgroundStores::settle`] lets the host wait for outstanding
//! writes the way a service worker extends an event's lifetime.

use crate::cache::{CacheStorage, RequestKey, StoredResponse};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Tracker for detached store tasks
///
/// Clones share one task set. Stores still running when the last clone is
/// dropped are cancelled.
#[derive(Clone, Default)]
pub struct BackgroundStores {
    pending: Arc<Mutex<JoinSet<()>>>,
}

impl BackgroundStores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a detached write of `response` into `partition`
    pub async fn store(
        &self,
        storage: Arc<dyn CacheStorage>,
        partition: &str,
        key: RequestKey,
        response: StoredResponse,
    ) {
        let partition = partition.to_string();
        let mut pending = self.pending.lock().await;
        while pending.try_join_next().is_some() {}

        pending.spawn(async move {
            let result = match storage.open(&partition).await {
                Ok(handle) => handle.put(key.clone(), response).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => debug!("Stored {} in {}", key, partition),
                Err(e) => warn!("Could not store {} in {}: {}", key, partition, e),
            }
        });
    }

    /// Number of store tasks that have not finished yet
    pub async fn pending(&self) -> usize {
        let mut pending = self.pending.lock().await;
        while pending.try_join_next().is_some() {}
        pending.len()
    }

    /// Wait until every store spawned so far has finished
    pub async fn settle(&self) {
        loop {
            let mut running = std::mem::take(&mut *self.pending.lock().await);
            if running.is_empty() {
                return;
            }

            while let Some(result) = running.join_next().await {
                if let Err(e) = result {
                    warn!("Background store task did not complete: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStorage;
    use crate::fetch::{Request, Response};

    #[tokio::test]
    async fn settle_waits_for_stores() {
        let storage = Arc::new(MemoryStorage::new());
        let stores = BackgroundStores::new();
        let key = Request::parse("https://example.com/a.css").unwrap().key();

        stores
            .store(
                storage.clone(),
                "site-static-v1",
                key.clone(),
                StoredResponse::capture(Response::new(200, "body{}")),
            )
            .await;
        stores.settle().await;

        assert_eq!(stores.pending().await, 0);
        let partition = storage.open("site-static-v1").await.unwrap();
        assert_eq!(partition.get(&key).await.unwrap().unwrap().body(), b"body{}");
    }

    #[tokio::test]
    async fn settle_with_nothing_pending_returns() {
        BackgroundStores::new().settle().await;
    }
}
