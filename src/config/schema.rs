//! Configuration schema for Harbor
//!
//! Configuration is stored in `harbor.toml` next to the site sources and is
//! fixed at deploy time.

use crate::agent::{AgentSettings, Classifier};
use crate::cache::{StaticManifest, VersionSet};
use crate::error::{HarborError, HarborResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Agent identity and site origin
    pub agent: AgentConfig,

    /// Assets preloaded on install
    pub manifest: ManifestConfig,

    /// Request classification
    pub classifier: ClassifierConfig,
}

impl Config {
    /// Build the immutable settings one agent version runs with
    pub fn agent_settings(&self) -> HarborResult<AgentSettings> {
        let origin = Url::parse(&self.agent.origin).map_err(|e| HarborError::InvalidSetting {
            key: "agent.origin".to_string(),
            reason: e.to_string(),
        })?;

        validate_name_part("agent.prefix", &self.agent.prefix)?;

        let manifest = StaticManifest::resolve(&origin, &self.manifest.urls)?;

        let tag = match &self.agent.version {
            Some(version) => {
                validate_name_part("agent.version", version)?;
                version.clone()
            }
            None => manifest.content_tag(),
        };

        Ok(AgentSettings {
            versions: VersionSet::new(&self.agent.prefix, &tag),
            manifest,
            classifier: Classifier::new(&self.classifier.dynamic_hosts),
            origin,
        })
    }
}

fn validate_name_part(key: &str, value: &str) -> HarborResult<()> {
    if value.is_empty() {
        return Err(HarborError::InvalidSetting {
            key: key.to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(HarborError::InvalidSetting {
            key: key.to_string(),
            reason: format!("'{}' contains whitespace", value),
        });
    }

    Ok(())
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Agent identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Partition name prefix
    pub prefix: String,

    /// Version tag; derived from the manifest when unset
    pub version: Option<String>,

    /// Origin the site is served from
    pub origin: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            prefix: "harbor".to_string(),
            version: None,
            origin: "http://localhost:8080".to_string(),
        }
    }
}

/// Static manifest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// URLs or site-relative paths, in preload order
    pub urls: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            urls: vec!["/".to_string(), "/index.html".to_string()],
        }
    }
}

/// Classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Hosts whose traffic is always network-first (forms, analytics)
    pub dynamic_hosts: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            dynamic_hosts: vec![
                "formspree.io".to_string(),
                "www.google-analytics.com".to_string(),
            ],
        }
    }
}
