//! Cache storage abstraction
//!
//! Provides the partition registry traits the agent is written against. The
//! host supplies the real backend (browser Cache Storage through a shim);
//! [`MemoryStorage`](crate::cache::MemoryStorage) backs tests and the CLI.

use crate::cache::RequestKey;
use crate::error::HarborResult;
use crate::fetch::{Response, ResponseKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Immutable snapshot of a response, captured when it was stored
#[derive(Debug, Clone)]
pub struct StoredResponse {
    status: u16,
    headers: BTreeMap<String, String>,
    body: Arc<[u8]>,
    kind: ResponseKind,
    stored_at: DateTime<Utc>,
}

impl StoredResponse {
    /// Capture a response for storage
    ///
    /// Takes ownership, so callers that still need to return the response
    /// pass a [`Response::duplicate`].
    pub fn capture(response: Response) -> Self {
        let (status, headers, body, kind) = response.into_parts();
        Self {
            status,
            headers,
            body: body.into(),
            kind,
            stored_at: Utc::now(),
        }
    }

    /// Materialise a fresh response to hand to the page
    pub fn to_response(&self) -> Response {
        Response::from_parts(self.status, self.headers.clone(), self.body.to_vec(), self.kind)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn kind(&self) -> ResponseKind {
        self.kind
    }

    pub fn stored_at(&self) -> DateTime<Utc> {
        self.stored_at
    }

    /// Whether two snapshots hold the same response, ignoring capture time
    pub fn same_content(&self, other: &Self) -> bool {
        self.status == other.status
            && self.headers == other.headers
            && self.body == other.body
            && self.kind == other.kind
    }
}

/// Abstract partition registry
///
/// `open` is idempotent and creates an empty partition on first use;
/// `list_names` returns every existing partition, current or not.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Open (creating if needed) the partition with this name
    async fn open(&self, name: &str) -> HarborResult<Arc<dyn Partition>>;

    /// Names of all existing partitions
    async fn list_names(&self) -> HarborResult<Vec<String>>;

    /// Delete a partition and all its entries; `Ok(false)` if it did not exist
    async fn delete(&self, name: &str) -> HarborResult<bool>;

    /// Human-readable backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// A single named key-value bucket
#[async_trait]
pub trait Partition: Send + Sync {
    fn name(&self) -> &str;

    /// Look up a stored response
    async fn get(&self, key: &RequestKey) -> HarborResult<Option<StoredResponse>>;

    /// Insert or overwrite an entry
    async fn put(&self, key: RequestKey, response: StoredResponse) -> HarborResult<()>;

    /// Keys of all entries, in unspecified order
    async fn keys(&self) -> HarborResult<Vec<RequestKey>>;
}
