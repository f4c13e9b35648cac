//! Intercepted request model

use crate::cache::RequestKey;
use crate::error::{HarborError, HarborResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// What the requesting context expects to receive
///
/// Mirrors the host's request destination metadata. `Unknown` means the host
/// supplied none, in which case [`Request::effective_destination`] falls back
/// to the URL suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// A full page (navigation, iframe)
    Document,
    Image,
    Font,
    Style,
    Script,
    /// Anything else the host labelled (fetch(), media, manifest, ...)
    Other,
    /// No metadata available
    #[default]
    Unknown,
}

impl Destination {
    /// Parse a host destination label
    ///
    /// The empty label is what hosts report for plain `fetch()` calls.
    pub fn from_label(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" | "iframe" | "frame" => Self::Document,
            "image" => Self::Image,
            "font" => Self::Font,
            "style" => Self::Style,
            "script" | "worker" | "sharedworker" => Self::Script,
            "unknown" => Self::Unknown,
            _ => Self::Other,
        }
    }

    /// Label used in config and CLI output
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Image => "image",
            Self::Font => "font",
            Self::Style => "style",
            Self::Script => "script",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }

    /// Infer a destination from a URL path when the host gives no metadata
    ///
    /// Directory-style paths and extensionless paths are treated as pages.
    pub fn infer_from_path(path: &str) -> Self {
        let last_segment = path.rsplit('/').next().unwrap_or_default();
        if last_segment.is_empty() {
            return Self::Document;
        }

        let Some((_, extension)) = last_segment.rsplit_once('.') else {
            return Self::Document;
        };

        match extension.to_ascii_lowercase().as_str() {
            "html" | "htm" => Self::Document,
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "avif" | "svg" | "ico" | "bmp" => Self::Image,
            "woff" | "woff2" | "ttf" | "otf" | "eot" => Self::Font,
            "css" => Self::Style,
            "js" | "mjs" => Self::Script,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// A request intercepted from the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    url: Url,
    destination: Destination,
}

impl Request {
    /// Create a GET request with no destination metadata
    pub fn get(url: Url) -> Self {
        Self {
            method: "GET".to_string(),
            url,
            destination: Destination::Unknown,
        }
    }

    /// Parse an absolute URL into a GET request
    pub fn parse(url: &str) -> HarborResult<Self> {
        let parsed = Url::parse(url).map_err(|e| HarborError::RequestUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::get(parsed))
    }

    /// Set the HTTP method (normalised to upper case)
    pub fn with_method(mut self, method: &str) -> Self {
        self.method = method.to_ascii_uppercase();
        self
    }

    /// Set the destination metadata reported by the host
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Destination used for routing and fallbacks
    pub fn effective_destination(&self) -> Destination {
        match self.destination {
            Destination::Unknown => Destination::infer_from_path(self.url.path()),
            known => known,
        }
    }

    /// Cache identity of this request
    pub fn key(&self) -> RequestKey {
        RequestKey::new(&self.method, &self.url)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
