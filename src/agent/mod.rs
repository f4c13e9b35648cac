//! The offline agent and its lifecycle hooks
//!
//! The host drives the agent through three hooks:
//!
//! | Hook | When | Does |
//! |------|------|------|
//! | `on_install` | new version registered | preload static manifest |
//! | `on_activate` | version takes over | reap stale partitions |
//! | `on_fetch` | every page request | classify, then cache-first or network-first |
//!
//! Install and activate are awaited by the host before any fetch reaches the
//! agent. Fetch handling is concurrent across requests.

pub mod background;
pub mod classifier;
pub mod fallback;
pub mod preload;
pub mod reaper;
pub mod strategy;

pub use background::BackgroundStores;
pub use classifier::{Classifier, Route};
pub use fallback::fallback;
pub use preload::{preload, InstallOutcome};
pub use reaper::{reap, ActivateOutcome};
pub use strategy::{is_cacheable, Retriever};

use crate::cache::{CacheStorage, StaticManifest, VersionSet};
use crate::error::HarborResult;
use crate::fetch::{Network, Request, Response};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Immutable deploy-time settings for one agent version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    /// Origin the site is served from
    pub origin: Url,
    pub versions: VersionSet,
    pub manifest: StaticManifest,
    pub classifier: Classifier,
}

/// What the host should do with an intercepted request
#[derive(Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Not handled; use the host's default network behaviour
    Passthrough,
    /// Answer the page with this response
    Respond(Response),
}

impl FetchOutcome {
    pub fn into_response(self) -> Option<Response> {
        match self {
            Self::Passthrough => None,
            Self::Respond(response) => Some(response),
        }
    }
}

/// Hooks the host environment calls
#[async_trait]
pub trait LifecycleHooks: Send + Sync {
    /// Prepare a new version; an error means the host must discard it
    async fn on_install(&self) -> HarborResult<InstallOutcome>;

    /// Take over from the previous version
    async fn on_activate(&self) -> ActivateOutcome;

    /// Handle an intercepted request; never fails
    async fn on_fetch(&self, request: &Request) -> FetchOutcome;
}

/// Offline caching agent for one deployed version
pub struct OfflineAgent {
    settings: AgentSettings,
    storage: Arc<dyn CacheStorage>,
    network: Arc<dyn Network>,
    retriever: Retriever,
}

impl OfflineAgent {
    pub fn new(
        settings: AgentSettings,
        storage: Arc<dyn CacheStorage>,
        network: Arc<dyn Network>,
    ) -> Self {
        let retriever = Retriever::new(storage.clone(), network.clone());
        Self {
            settings,
            storage,
            network,
            retriever,
        }
    }

    /// Classify without handling
    pub fn route(&self, request: &Request) -> Route {
        self.settings.classifier.classify(request)
    }

    /// Wait for background stores spawned by earlier fetches
    pub async fn settle(&self) {
        self.retriever.stores().settle().await;
    }
}

#[async_trait]
impl LifecycleHooks for OfflineAgent {
    async fn on_install(&self) -> HarborResult<InstallOutcome> {
        info!(
            "Installing version {} ({} storage, {} network)",
            self.settings.versions.tag(),
            self.storage.backend_name(),
            self.network.network_name()
        );
        preload(
            self.storage.as_ref(),
            self.network.as_ref(),
            &self.settings.manifest,
            self.settings.versions.static_name(),
        )
        .await
    }

    async fn on_activate(&self) -> ActivateOutcome {
        reap(self.storage.as_ref(), &self.settings.versions).await
    }

    async fn on_fetch(&self, request: &Request) -> FetchOutcome {
        let route = self.route(request);
        debug!("{} -> {}", request, route);

        match route {
            Route::Skip => FetchOutcome::Passthrough,
            Route::CacheFirst => FetchOutcome::Respond(
                self.retriever
                    .cache_first(request, self.settings.versions.static_name())
                    .await,
            ),
            Route::NetworkFirst => {
                let versions = &self.settings.versions;
                FetchOutcome::Respond(
                    self.retriever
                        .network_first(request, versions.dynamic_name(), &[versions.static_name()])
                        .await,
                )
            }
        }
    }
}
