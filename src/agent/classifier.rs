//! Request classification
//!
//! Decides which retrieval strategy handles an intercepted request. Pages
//! and dynamic endpoints must never be served stale while online, so they go
//! network-first; every other asset goes cache-first.

use crate::fetch::{Destination, Request};
use serde::Serialize;
use std::fmt;

/// Schemes the agent can fetch and cache
const RETRIEVABLE_SCHEMES: &[&str] = &["http", "https"];

/// Strategy selected for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    /// Not intercepted; the host's default handling applies
    Skip,
    /// Static partition, then network
    CacheFirst,
    /// Network, then dynamic partition
    NetworkFirst,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::CacheFirst => write!(f, "cache-first"),
            Self::NetworkFirst => write!(f, "network-first"),
        }
    }
}

/// Pure request classifier configured with dynamic-content hosts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classifier {
    dynamic_hosts: Vec<String>,
}

impl Classifier {
    /// Create a classifier; a host also matches its subdomains
    pub fn new<S: AsRef<str>>(dynamic_hosts: &[S]) -> Self {
        Self {
            dynamic_hosts: dynamic_hosts
                .iter()
                .map(|h| h.as_ref().trim().trim_end_matches('.').to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    pub fn dynamic_hosts(&self) -> &[String] {
        &self.dynamic_hosts
    }

    pub fn classify(&self, request: &Request) -> Route {
        let url = request.url();

        if !RETRIEVABLE_SCHEMES.contains(&url.scheme()) {
            return Route::Skip;
        }

        let is_page = request.effective_destination() == Destination::Document
            || url.path().to_ascii_lowercase().ends_with(".html");
        let is_dynamic = url
            .host_str()
            .is_some_and(|host| self.is_dynamic_host(host));

        if is_page || is_dynamic {
            Route::NetworkFirst
        } else {
            Route::CacheFirst
        }
    }

    fn is_dynamic_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.dynamic_hosts.iter().any(|candidate| {
            host == *candidate
                || host
                    .strip_suffix(candidate.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        })
    }
}
