//! Partitions command - show the version set a configuration yields

use crate::cache::PartitionRole;
use crate::config::Config;
use crate::error::HarborResult;
use console::style;

/// Execute the partitions command
pub async fn execute(config: &Config) -> HarborResult<()> {
    let settings = config.agent_settings()?;
    let versions = &settings.versions;

    let tag_source = if config.agent.version.is_some() {
        "configured"
    } else {
        "manifest hash"
    };

    println!("{}", style("Partitions").bold());
    println!("  {:<10} {} ({})", "version", versions.tag(), tag_source);
    for role in PartitionRole::all() {
        println!("  {:<10} {}", role.to_string(), versions.name_for(*role));
    }

    println!();
    println!(
        "{} ({} asset(s), origin {})",
        style("Static manifest").bold(),
        settings.manifest.len(),
        settings.origin
    );
    for url in settings.manifest.urls() {
        println!("  {} {}", style("•").cyan(), url);
    }

    if !settings.classifier.dynamic_hosts().is_empty() {
        println!();
        println!("{}", style("Network-first hosts").bold());
        for host in settings.classifier.dynamic_hosts() {
            println!("  {} {}", style("•").cyan(), host);
        }
    }

    Ok(())
}
