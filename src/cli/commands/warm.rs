//! Warm command - run install and activate against the live site
//!
//! Uses in-memory partitions, so nothing persists; the point is to prove
//! every manifest asset is reachable before a version ships.

use crate::agent::{LifecycleHooks, OfflineAgent};
use crate::cache::{CacheStorage, MemoryStorage, StoredResponse};
use crate::cli::args::{OutputFormat, WarmArgs};
use crate::config::Config;
use crate::error::{HarborError, HarborResult};
use crate::fetch::HttpNetwork;
use console::style;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// One cached asset in the report
#[derive(Debug, Serialize)]
struct WarmEntry {
    url: String,
    status: u16,
    content_type: Option<String>,
    bytes: usize,
}

impl WarmEntry {
    fn new(url: &str, stored: &StoredResponse) -> Self {
        Self {
            url: url.to_string(),
            status: stored.status(),
            content_type: stored.headers().get("content-type").cloned(),
            bytes: stored.body().len(),
        }
    }
}

/// Execute the warm command
pub async fn execute(args: WarmArgs, config: &Config) -> HarborResult<()> {
    let mut config = config.clone();
    if let Some(origin) = args.origin {
        config.agent.origin = origin;
    }
    let settings = config.agent_settings()?;

    let storage = Arc::new(MemoryStorage::new());
    let network = Arc::new(HttpNetwork::new(settings.origin.clone()));
    let agent = OfflineAgent::new(settings, storage.clone(), network);

    let installed = agent.on_install().await?;
    let activated = agent.on_activate().await;
    debug!("Activation kept {:?}", activated.kept);

    let partition = storage.open(&installed.partition).await?;
    let mut entries = Vec::with_capacity(installed.cached.len());
    for key in &installed.cached {
        let stored = partition.get(key).await?.ok_or_else(|| {
            HarborError::Internal(format!("{} missing right after install", key))
        })?;
        entries.push(WarmEntry::new(key.url(), &stored));
    }

    match args.format {
        OutputFormat::Table => print_table(&installed.partition, &entries),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }

    Ok(())
}

fn print_table(partition: &str, entries: &[WarmEntry]) {
    println!("{:<60} {:<7} {:<28} {:>10}", "URL", "STATUS", "TYPE", "BYTES");
    println!("{}", "-".repeat(108));

    for entry in entries {
        println!(
            "{:<60} {:<7} {:<28} {:>10}",
            entry.url,
            style(entry.status).green(),
            entry.content_type.as_deref().unwrap_or("-"),
            entry.bytes
        );
    }

    let total: usize = entries.iter().map(|e| e.bytes).sum();
    println!();
    println!(
        "{} {} asset(s), {} bytes ready offline in {}",
        style("✓").green(),
        entries.len(),
        total,
        partition
    );
}
