//! Install-time preload of the static manifest
//!
//! All manifest assets are fetched first and written only once every one of
//! them succeeded, so a failed install never leaves a partially filled static
//! partition behind.

use crate::cache::{CacheStorage, RequestKey, StaticManifest, StoredResponse};
use crate::error::{HarborError, HarborResult};
use crate::fetch::{Network, Request, Response};
use futures_util::future::try_join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Result of a successful install
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallOutcome {
    /// Static partition that was filled
    pub partition: String,
    /// Keys written, in manifest order
    pub cached: Vec<RequestKey>,
    /// Activate immediately instead of waiting for old instances to go away
    pub skip_waiting: bool,
}

async fn fetch_asset(network: &dyn Network, request: Request) -> HarborResult<(RequestKey, Response)> {
    let url = request.url().to_string();
    let response = network
        .fetch(&request)
        .await
        .map_err(|e| HarborError::Preload {
            url: url.clone(),
            reason: e.to_string(),
        })?;

    if !response.is_ok() {
        return Err(HarborError::Preload {
            url,
            reason: format!("server answered {}", response.status()),
        });
    }

    debug!("Fetched manifest asset {}", url);
    Ok((request.key(), response))
}

/// Fetch every manifest URL and store the results in `partition`
pub async fn preload(
    storage: &dyn CacheStorage,
    network: &dyn Network,
    manifest: &StaticManifest,
    partition: &str,
) -> HarborResult<InstallOutcome> {
    info!(
        "Preloading {} asset(s) into {}",
        manifest.len(),
        partition
    );

    let fetched = try_join_all(
        manifest
            .urls()
            .iter()
            .map(|url| fetch_asset(network, Request::get(url.clone()))),
    )
    .await?;

    let handle = storage.open(partition).await?;
    let mut cached = Vec::with_capacity(fetched.len());

    for (key, response) in fetched {
        if let Err(e) = handle.put(key.clone(), StoredResponse::capture(response)).await {
            if let Err(cleanup) = storage.delete(partition).await {
                warn!("Could not discard partial partition {}: {}", partition, cleanup);
            }
            return Err(HarborError::Preload {
                url: key.url().to_string(),
                reason: e.to_string(),
            });
        }
        cached.push(key);
    }

    info!("Preloaded {} asset(s) into {}", cached.len(), handle.name());
    Ok(InstallOutcome {
        partition: partition.to_string(),
        cached,
        skip_waiting: true,
    })
}
