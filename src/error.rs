//! Error types for Harbor
//!
//! All modules use `HarborResult<T>` as their return type. Request handling
//! never surfaces these to the host: storage and network failures are turned
//! into cached or synthetic responses at the strategy layer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Harbor operations
pub type HarborResult<T> = Result<T, HarborError>;

/// All errors that can occur in Harbor
#[derive(Error, Debug)]
pub enum HarborError {
    // Cache storage errors
    #[error("Cache storage failed during {operation}: {reason}")]
    Storage { operation: String, reason: String },

    // Network errors
    #[error("Network fetch failed for {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("Preload failed for {url}: {reason}")]
    Preload { url: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("Invalid manifest URL '{url}': {reason}")]
    ManifestUrl { url: String, reason: String },

    #[error("Invalid request URL '{url}': {reason}")]
    RequestUrl { url: String, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HarborError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a storage error for the named operation
    pub fn storage(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a network error for a URL
    pub fn network(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Preload { .. } => {
                Some("Every manifest URL must be reachable; check [manifest].urls and agent.origin")
            }
            Self::ManifestUrl { .. } => Some("Use absolute URLs or paths starting with '/'"),
            Self::ConfigInvalid { .. } => Some("Run: harbor config init --force to start from defaults"),
            _ => None,
        }
    }
}
