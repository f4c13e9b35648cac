//! HTTP network backed by ureq
//!
//! ureq is blocking, so each fetch runs on the tokio blocking pool. No
//! timeout is configured: a hung request stalls only its own task.

use crate::error::{HarborError, HarborResult};
use crate::fetch::{Network, Request, Response, ResponseKind};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

/// Largest response body accepted, in bytes
pub const MAX_BODY_BYTES: u64 = 256 * 1024 * 1024;

/// Network implementation that performs real HTTP requests
pub struct HttpNetwork {
    agent: ureq::Agent,
    site_origin: Url,
}

impl HttpNetwork {
    /// Create a network for the site served at `site_origin`
    ///
    /// Responses from that origin are reported as `basic`, everything else
    /// as `cors`.
    pub fn new(site_origin: Url) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent, site_origin }
    }

    fn kind_for(&self, url: &Url) -> ResponseKind {
        if url.origin() == self.site_origin.origin() {
            ResponseKind::Basic
        } else {
            ResponseKind::Cors
        }
    }

    fn fetch_blocking(agent: &ureq::Agent, request: &Request) -> HarborResult<Response> {
        let url = request.url().as_str();

        let call = match request.method() {
            "GET" => agent.get(url).call(),
            "HEAD" => agent.head(url).call(),
            other => {
                return Err(HarborError::network(
                    url,
                    format!("method {} is not supported by the HTTP network", other),
                ))
            }
        };

        let mut response = call.map_err(|e| HarborError::network(url, e.to_string()))?;

        let status = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();

        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec()
            .map_err(|e| {
                HarborError::network(
                    url,
                    format!("reading body (limit {} bytes): {}", MAX_BODY_BYTES, e),
                )
            })?;

        Ok(Response::from_parts(status, headers, body, ResponseKind::Basic))
    }
}

#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, request: &Request) -> HarborResult<Response> {
        let agent = self.agent.clone();
        let owned = request.clone();

        let response = tokio::task::spawn_blocking(move || Self::fetch_blocking(&agent, &owned))
            .await
            .map_err(|e| HarborError::Internal(format!("fetch task failed: {}", e)))??;

        debug!("{} -> {}", request, response.status());
        Ok(response.with_kind(self.kind_for(request.url())))
    }

    fn network_name(&self) -> &'static str {
        "http"
    }
}
