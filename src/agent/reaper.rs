//! Activation-time removal of stale partitions

use crate::cache::{CacheStorage, VersionSet};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Result of an activation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivateOutcome {
    /// Stale partitions that were deleted
    pub removed: Vec<String>,
    /// Stale partitions whose deletion failed
    pub failed: Vec<String>,
    /// Current partitions left in place
    pub kept: Vec<String>,
    /// Take control of open pages without waiting for a reload
    pub claim_clients: bool,
}

/// Delete every partition whose name is not in `versions`
///
/// A failure on one partition is logged and does not stop the others.
pub async fn reap(storage: &dyn CacheStorage, versions: &VersionSet) -> ActivateOutcome {
    let mut outcome = ActivateOutcome {
        claim_clients: true,
        ..Default::default()
    };

    let names = match storage.list_names().await {
        Ok(names) => names,
        Err(e) => {
            warn!("Could not list partitions, nothing reaped: {}", e);
            return outcome;
        }
    };

    for name in names {
        if versions.contains(&name) {
            debug!("Keeping current partition {}", name);
            outcome.kept.push(name);
            continue;
        }

        match storage.delete(&name).await {
            Ok(_) => {
                info!("Removed stale partition {}", name);
                outcome.removed.push(name);
            }
            Err(e) => {
                warn!("Could not remove stale partition {}: {}", name, e);
                outcome.failed.push(name);
            }
        }
    }

    outcome
}
