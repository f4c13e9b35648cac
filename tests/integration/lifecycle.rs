//! End-to-end install / activate / fetch scenarios against in-memory storage

use async_trait::async_trait;
use harbor::agent::{AgentSettings, Classifier, FetchOutcome, LifecycleHooks, OfflineAgent};
use harbor::cache::{CacheStorage, MemoryStorage, StaticManifest, VersionSet};
use harbor::fetch::{Destination, Network, Request, Response};
use harbor::{HarborError, HarborResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

/// Site served from a fixed table, with a connectivity switch
#[derive(Default)]
struct FakeSite {
    pages: HashMap<String, &'static str>,
    offline: AtomicBool,
    hits: AtomicUsize,
}

impl FakeSite {
    fn new(pages: &[(&str, &'static str)]) -> Self {
        Self {
            pages: pages.iter().map(|(u, b)| (u.to_string(), *b)).collect(),
            ..Default::default()
        }
    }

    fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Network for FakeSite {
    async fn fetch(&self, request: &Request) -> HarborResult<Response> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(HarborError::network(request.url().as_str(), "no connectivity"));
        }

        match self.pages.get(request.url().as_str()) {
            Some(body) => Ok(Response::new(200, *body)),
            None => Err(HarborError::network(request.url().as_str(), "host unreachable")),
        }
    }

    fn network_name(&self) -> &'static str {
        "fake"
    }
}

fn settings(tag: &str, manifest: &[&str]) -> AgentSettings {
    let origin = Url::parse("https://shop.example/").unwrap();
    AgentSettings {
        manifest: StaticManifest::resolve(&origin, manifest).unwrap(),
        versions: VersionSet::new("shop", tag),
        classifier: Classifier::new(&["formspree.io"]),
        origin,
    }
}

fn site() -> FakeSite {
    FakeSite::new(&[
        ("https://shop.example/", "<h1>home</h1>"),
        ("https://shop.example/index.html", "<h1>index</h1>"),
        ("https://shop.example/cars/id3.png", "PNG-ID3"),
        ("https://shop.example/pricing.html", "<h1>pricing</h1>"),
    ])
}

#[tokio::test]
async fn manifest_is_servable_offline_after_install() {
    let storage = Arc::new(MemoryStorage::new());
    let network = Arc::new(site());
    let agent = OfflineAgent::new(
        settings("v1", &["/", "/index.html", "/cars/id3.png"]),
        storage.clone(),
        network.clone(),
    );

    let installed = agent.on_install().await.unwrap();
    assert!(installed.skip_waiting);
    let activated = agent.on_activate().await;
    assert!(activated.claim_clients);

    network.go_offline();
    let before = network.hits();

    let image = Request::parse("https://shop.example/cars/id3.png")
        .unwrap()
        .with_destination(Destination::Image);
    let response = agent.on_fetch(&image).await.into_response().unwrap();

    assert_eq!(response.body(), b"PNG-ID3");
    assert_eq!(network.hits(), before);
}

#[tokio::test]
async fn preloaded_pages_are_servable_offline_after_install() {
    let storage = Arc::new(MemoryStorage::new());
    let network = Arc::new(site());
    let agent = OfflineAgent::new(
        settings("v1", &["/", "/index.html"]),
        storage.clone(),
        network.clone(),
    );

    agent.on_install().await.unwrap();
    agent.on_activate().await;
    network.go_offline();

    for (url, body) in [
        ("https://shop.example/", "<h1>home</h1>"),
        ("https://shop.example/index.html", "<h1>index</h1>"),
    ] {
        let page = Request::parse(url)
            .unwrap()
            .with_destination(Destination::Document);
        let response = agent.on_fetch(&page).await.into_response().unwrap();
        assert_eq!(response.text(), body, "{} was not served from the cache", url);
    }
}

#[tokio::test]
async fn unreachable_manifest_entry_fails_install() {
    let storage = Arc::new(MemoryStorage::new());
    let agent = OfflineAgent::new(
        settings("v1", &["/", "/cars/missing.png"]),
        storage.clone(),
        Arc::new(site()),
    );

    let err = agent.on_install().await.unwrap_err();
    assert!(matches!(err, HarborError::Preload { .. }));
    assert!(storage.list_names().await.unwrap().is_empty());
}

#[tokio::test]
async fn offline_document_without_copy_gets_offline_page() {
    let network = Arc::new(site());
    let agent = OfflineAgent::new(
        settings("v1", &[]),
        Arc::new(MemoryStorage::new()),
        network.clone(),
    );
    network.go_offline();

    let page = Request::parse("https://shop.example/contact")
        .unwrap()
        .with_destination(Destination::Document);
    let response = agent.on_fetch(&page).await.into_response().unwrap();

    assert!((200..300).contains(&response.status()));
    assert_eq!(response.header("content-type"), Some("text/html; charset=utf-8"));
    assert!(response.text().contains("offline"));
}

#[tokio::test]
async fn offline_image_without_copy_gets_503() {
    let network = Arc::new(site());
    let agent = OfflineAgent::new(
        settings("v1", &[]),
        Arc::new(MemoryStorage::new()),
        network.clone(),
    );
    network.go_offline();

    let image = Request::parse("https://shop.example/cars/other.png")
        .unwrap()
        .with_destination(Destination::Image);
    let response = agent.on_fetch(&image).await.into_response().unwrap();

    assert_eq!(response.status(), 503);
    assert_eq!(response.header("content-type"), Some("text/plain; charset=utf-8"));
}

#[tokio::test]
async fn repeated_fetch_keeps_stored_content() {
    let storage = Arc::new(MemoryStorage::new());
    let agent = OfflineAgent::new(settings("v1", &[]), storage.clone(), Arc::new(site()));

    let page = Request::parse("https://shop.example/pricing.html").unwrap();
    agent.on_fetch(&page).await;
    agent.settle().await;

    let dynamic = storage.open("shop-dynamic-v1").await.unwrap();
    let first = dynamic.get(&page.key()).await.unwrap().unwrap();

    agent.on_fetch(&page).await;
    agent.settle().await;
    let second = dynamic.get(&page.key()).await.unwrap().unwrap();

    assert!(first.same_content(&second));
    assert_eq!(second.body(), b"<h1>pricing</h1>");
}

#[tokio::test]
async fn upgrade_reaps_previous_version_once() {
    let storage = Arc::new(MemoryStorage::new());
    let network = Arc::new(site());

    let v1 = OfflineAgent::new(settings("v1", &["/"]), storage.clone(), network.clone());
    v1.on_install().await.unwrap();
    v1.on_activate().await;
    let page = Request::parse("https://shop.example/pricing.html").unwrap();
    v1.on_fetch(&page).await;
    v1.settle().await;

    let v2 = OfflineAgent::new(settings("v2", &["/"]), storage.clone(), network.clone());
    v2.on_install().await.unwrap();

    let first = v2.on_activate().await;
    assert_eq!(first.removed, vec!["shop-dynamic-v1", "shop-static-v1"]);
    assert_eq!(first.kept, vec!["shop-static-v2"]);

    let second = v2.on_activate().await;
    assert!(second.removed.is_empty());

    let home = storage.open("shop-static-v2").await.unwrap();
    let entry = home
        .get(&Request::parse("https://shop.example/").unwrap().key())
        .await
        .unwrap();
    assert!(entry.is_some());
}

#[tokio::test]
async fn extension_requests_are_not_intercepted() {
    let agent = OfflineAgent::new(
        settings("v1", &[]),
        Arc::new(MemoryStorage::new()),
        Arc::new(site()),
    );
    let request = Request::parse("chrome-extension://abc/content.js").unwrap();
    assert_eq!(agent.on_fetch(&request).await, FetchOutcome::Passthrough);
}
