//! Network primitive abstraction
//!
//! Provides a trait for issuing requests that can be implemented by
//! different hosts (a browser fetch shim, blocking HTTP for the CLI, scripted
//! doubles in tests).

use crate::error::HarborResult;
use crate::fetch::{Request, Response};
use async_trait::async_trait;

/// Abstract network interface
///
/// Implementations return `Err(HarborError::Network { .. })` only when no
/// response was obtained at all (no connectivity, DNS, TLS). An HTTP error
/// status is still a response and comes back as `Ok`.
#[async_trait]
pub trait Network: Send + Sync {
    /// Issue a request and wait for the full response
    async fn fetch(&self, request: &Request) -> HarborResult<Response>;

    /// Human-readable backend name for logs
    fn network_name(&self) -> &'static str;
}
