//! Retrieval strategies
//!
//! Both strategies always produce a response: storage failures degrade to a
//! miss, network failures degrade to a cached copy or the offline fallback.

use crate::agent::background::BackgroundStores;
use crate::agent::fallback::fallback;
use crate::cache::{CacheStorage, StoredResponse};
use crate::fetch::{Network, Request, Response, ResponseKind};
use std::sync::Arc;
use tracing::{debug, warn};

/// Whether a network response may be written back to a partition
///
/// Only complete same-origin answers to GET requests are kept; redirects,
/// errors, cross-origin and opaque payloads pass through uncached.
pub fn is_cacheable(request: &Request, response: &Response) -> bool {
    request.method() == "GET" && response.status() == 200 && response.kind() == ResponseKind::Basic
}

/// Executes cache-first and network-first retrieval against shared primitives
#[derive(Clone)]
pub struct Retriever {
    storage: Arc<dyn CacheStorage>,
    network: Arc<dyn Network>,
    stores: BackgroundStores,
}

impl Retriever {
    pub fn new(storage: Arc<dyn CacheStorage>, network: Arc<dyn Network>) -> Self {
        Self {
            storage,
            network,
            stores: BackgroundStores::new(),
        }
    }

    pub fn stores(&self) -> &BackgroundStores {
        &self.stores
    }

    /// Serve from `partition` if present, otherwise fetch and keep a copy
    pub async fn cache_first(&self, request: &Request, partition: &str) -> Response {
        if let Some(stored) = self.lookup(request, partition).await {
            debug!(
                "Cache hit in {} (stored {}): {}",
                partition,
                stored.stored_at().to_rfc3339(),
                request
            );
            return stored.to_response();
        }

        debug!("Cache miss in {}: {}", partition, request);
        match self.network.fetch(request).await {
            Ok(response) => {
                self.keep_copy(request, &response, partition).await;
                response
            }
            Err(e) => {
                warn!("Offline fallback for {}: {}", request, e);
                fallback(request.effective_destination())
            }
        }
    }

    /// Fetch fresh content, keeping a copy in `partition` for offline use
    ///
    /// Without a network answer, `partition` is searched first and then each
    /// of `also_search` in order; the first hit is served.
    pub async fn network_first(
        &self,
        request: &Request,
        partition: &str,
        also_search: &[&str],
    ) -> Response {
        let err = match self.network.fetch(request).await {
            Ok(response) => {
                self.keep_copy(request, &response, partition).await;
                return response;
            }
            Err(e) => e,
        };

        debug!("Network failed for {}: {}", request, err);
        for name in std::iter::once(partition).chain(also_search.iter().copied()) {
            if let Some(stored) = self.lookup(request, name).await {
                debug!("Serving cached copy of {} from {}", request, name);
                return stored.to_response();
            }
        }

        warn!("Offline fallback for {}: {}", request, err);
        fallback(request.effective_destination())
    }

    /// Look up a request, treating storage failures as a miss
    async fn lookup(&self, request: &Request, partition: &str) -> Option<StoredResponse> {
        let key = request.key();
        let found = match self.storage.open(partition).await {
            Ok(handle) => handle.get(&key).await,
            Err(e) => Err(e),
        };

        found.unwrap_or_else(|e| {
            warn!("Lookup of {} in {} failed: {}", key, partition, e);
            None
        })
    }

    async fn keep_copy(&self, request: &Request, response: &Response, partition: &str) {
        if !is_cacheable(request, response) {
            debug!(
                "Not caching {} ({} {})",
                request,
                response.status(),
                response.kind()
            );
            return;
        }

        self.stores
            .store(
                self.storage.clone(),
                partition,
                request.key(),
                StoredResponse::capture(response.duplicate()),
            )
            .await;
    }
}
