//! Offline fallback responses
//!
//! Used when neither a partition nor the network can answer. Pages get a
//! readable, self-contained offline document with a 200 status so the browser
//! renders it; every other asset gets an explicit 503 so dependent code sees
//! the failure instead of an empty image or script.

use crate::fetch::{Destination, Response};

/// Status for non-document fallbacks
pub const UNAVAILABLE_STATUS: u16 = 503;

/// Body for non-document fallbacks
pub const UNAVAILABLE_BODY: &str = "Service unavailable: you are offline and this resource is not cached.";

/// Self-contained offline page; inline styles only, nothing else is reachable
pub const OFFLINE_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Offline</title>
<style>
  body { margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center;
         font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
         background: #f4f6f8; color: #1f2933; }
  main { max-width: 28rem; padding: 2.5rem 2rem; text-align: center; background: #fff;
         border-radius: 12px; box-shadow: 0 4px 24px rgba(0, 0, 0, 0.08); }
  h1 { font-size: 1.5rem; margin: 0 0 0.75rem; }
  p { line-height: 1.5; margin: 0 0 1.5rem; color: #52606d; }
  button { font: inherit; padding: 0.6rem 1.4rem; border: 0; border-radius: 6px;
           background: #2563eb; color: #fff; cursor: pointer; }
</style>
</head>
<body>
<main>
  <h1>You are offline</h1>
  <p>This page is not available without a connection. Check your internet connection and try again.</p>
  <button type="button" onclick="window.location.reload()">Reload</button>
</main>
</body>
</html>
"#;

/// Synthesise the offline response for a request destination
pub fn fallback(destination: Destination) -> Response {
    match destination {
        Destination::Document => Response::new(200, OFFLINE_PAGE)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_header("cache-control", "no-cache"),
        _ => Response::new(UNAVAILABLE_STATUS, UNAVAILABLE_BODY)
            .with_header("content-type", "text/plain; charset=utf-8")
            .with_header("cache-control", "no-cache"),
    }
}
