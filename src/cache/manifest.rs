//! Static asset manifest
//!
//! The ordered list of URLs that must be available offline from first load.
//! Entries may be absolute or site-relative; relative entries resolve against
//! the configured site origin.

use crate::error::{HarborError, HarborResult};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use url::Url;

/// Resolved, immutable manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticManifest {
    urls: Vec<Url>,
}

impl StaticManifest {
    /// Resolve manifest entries against the site origin
    ///
    /// Rejects entries that do not parse and entries listed twice (after
    /// resolution, fragments ignored).
    pub fn resolve<S: AsRef<str>>(origin: &Url, entries: &[S]) -> HarborResult<Self> {
        let mut seen = HashSet::new();
        let mut urls = Vec::with_capacity(entries.len());

        for entry in entries {
            let entry = entry.as_ref().trim();
            let mut url = origin.join(entry).map_err(|e| HarborError::ManifestUrl {
                url: entry.to_string(),
                reason: e.to_string(),
            })?;
            url.set_fragment(None);

            if !matches!(url.scheme(), "http" | "https") {
                return Err(HarborError::ManifestUrl {
                    url: entry.to_string(),
                    reason: format!("scheme '{}' cannot be fetched", url.scheme()),
                });
            }

            if !seen.insert(url.clone()) {
                return Err(HarborError::ManifestUrl {
                    url: entry.to_string(),
                    reason: "listed more than once".to_string(),
                });
            }
            urls.push(url);
        }

        Ok(Self { urls })
    }

    pub fn urls(&self) -> &[Url] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Content-addressed version tag: SHA256 of the URL list, first 12 hex chars
    ///
    /// Changing the manifest changes the tag, which rolls every partition on
    /// the next activation.
    pub fn content_tag(&self) -> String {
        let mut hasher = Sha256::new();
        for url in &self.urls {
            hasher.update(url.as_str().as_bytes());
            hasher.update(b"\n");
        }
        let result = hasher.finalize();

        hex::encode(&result[..6])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn resolves_relative_entries() {
        let manifest =
            StaticManifest::resolve(&origin(), &["/", "/index.html", "https://cdn.example.net/a.css"])
                .unwrap();
        let urls: Vec<&str> = manifest.urls().iter().map(Url::as_str).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com/",
                "https://example.com/index.html",
                "https://cdn.example.net/a.css"
            ]
        );
    }

    #[test]
    fn encodes_spaces() {
        let manifest =
            StaticManifest::resolve(&origin(), &["/public/cars/Volkswagen ID.3.png"]).unwrap();
        assert_eq!(
            manifest.urls()[0].as_str(),
            "https://example.com/public/cars/Volkswagen%20ID.3.png"
        );
    }

    #[test]
    fn rejects_duplicates() {
        let err = StaticManifest::resolve(&origin(), &["/index.html", "/index.html#main"])
            .unwrap_err();
        assert!(matches!(err, HarborError::ManifestUrl { .. }));
    }

    #[test]
    fn rejects_unfetchable_scheme() {
        let err = StaticManifest::resolve(&origin(), &["data:text/plain,hi"]).unwrap_err();
        assert!(err.to_string().contains("cannot be fetched"));
    }

    #[test]
    fn content_tag_tracks_manifest() {
        let a = StaticManifest::resolve(&origin(), &["/", "/index.html"]).unwrap();
        let b = StaticManifest::resolve(&origin(), &["/", "/index.html"]).unwrap();
        let c = StaticManifest::resolve(&origin(), &["/", "/about.html"]).unwrap();

        assert_eq!(a.content_tag(), b.content_tag());
        assert_ne!(a.content_tag(), c.content_tag());
        assert_eq!(a.content_tag().len(), 12);
    }
}
