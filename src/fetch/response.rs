//! Response model

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Origin classification of a response, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Same-origin response
    Basic,
    /// Cross-origin response with CORS headers
    Cors,
    /// Cross-origin response the page cannot read
    Opaque,
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Cors => write!(f, "cors"),
            Self::Opaque => write!(f, "opaque"),
        }
    }
}

/// A response handed back to the page
///
/// Deliberately not `Clone`: a response is moved to its caller once, and any
/// copy kept for the cache goes through [`Response::duplicate`].
#[derive(Debug, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: BTreeMap<String, String>,
    body: Vec<u8>,
    kind: ResponseKind,
}

impl Response {
    /// Create a same-origin response with no headers
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
            kind: ResponseKind::Basic,
        }
    }

    /// Rebuild a response from stored parts
    pub fn from_parts(
        status: u16,
        headers: BTreeMap<String, String>,
        body: Vec<u8>,
        kind: ResponseKind,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            kind,
        }
    }

    /// Add a header (names are stored lower-case)
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_kind(mut self, kind: ResponseKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn kind(&self) -> ResponseKind {
        self.kind
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Look up a header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, lossily
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn into_parts(self) -> (u16, BTreeMap<String, String>, Vec<u8>, ResponseKind) {
        (self.status, self.headers, self.body, self.kind)
    }

    /// Copy the whole response, body included
    ///
    /// Used when the original must go back to the page while a second copy is
    /// written to a cache partition.
    pub fn duplicate(&self) -> Self {
        Self {
            status: self.status,
            headers: self.headers.clone(),
            body: self.body.clone(),
            kind: self.kind,
        }
    }
}
