//! Scripted network double for unit tests

use crate::error::{HarborError, HarborResult};
use crate::fetch::{Network, Request, Response, ResponseKind};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

struct Route {
    status: u16,
    body: Vec<u8>,
    kind: ResponseKind,
}

/// Network serving a fixed route table; unknown URLs answer 404
#[derive(Default)]
pub(crate) struct ScriptedNetwork {
    routes: HashMap<String, Route>,
    unreachable: HashSet<String>,
    offline: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl ScriptedNetwork {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(self, url: &str, body: &str) -> Self {
        self.route_with(url, 200, body, ResponseKind::Basic)
    }

    pub(crate) fn route_with(mut self, url: &str, status: u16, body: &str, kind: ResponseKind) -> Self {
        self.routes.insert(
            url.to_string(),
            Route {
                status,
                body: body.as_bytes().to_vec(),
                kind,
            },
        );
        self
    }

    pub(crate) fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }

    pub(crate) fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Network for ScriptedNetwork {
    async fn fetch(&self, request: &Request) -> HarborResult<Response> {
        let url = request.url().to_string();
        self.calls.lock().unwrap().push(url.clone());

        if self.offline.load(Ordering::SeqCst) || self.unreachable.contains(&url) {
            return Err(HarborError::network(url, "offline"));
        }

        Ok(match self.routes.get(&url) {
            Some(route) => Response::new(route.status, route.body.clone())
                .with_header("content-type", "application/octet-stream")
                .with_kind(route.kind),
            None => Response::new(404, "not found"),
        })
    }

    fn network_name(&self) -> &'static str {
        "scripted"
    }
}
