//! Partition naming and the current version set

use serde::Serialize;
use std::fmt;

/// Logical role of a partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionRole {
    /// Preloaded and cache-first assets
    Static,
    /// Network-first pages kept for offline use
    Dynamic,
}

impl PartitionRole {
    pub fn all() -> &'static [Self] {
        &[Self::Static, Self::Dynamic]
    }
}

impl fmt::Display for PartitionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// Partition names that are current for the running agent version
///
/// Built once from configuration and passed to everything that touches
/// partitions. Any partition not named here is stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionSet {
    tag: String,
    static_name: String,
    dynamic_name: String,
}

impl VersionSet {
    /// Names follow `{prefix}-{role}-{tag}`
    pub fn new(prefix: &str, tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            static_name: format!("{}-{}-{}", prefix, PartitionRole::Static, tag),
            dynamic_name: format!("{}-{}-{}", prefix, PartitionRole::Dynamic, tag),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn static_name(&self) -> &str {
        &self.static_name
    }

    pub fn dynamic_name(&self) -> &str {
        &self.dynamic_name
    }

    pub fn name_for(&self, role: PartitionRole) -> &str {
        match role {
            PartitionRole::Static => &self.static_name,
            PartitionRole::Dynamic => &self.dynamic_name,
        }
    }

    /// Whether a partition name is current
    pub fn contains(&self, name: &str) -> bool {
        name == self.static_name || name == self.dynamic_name
    }
}
