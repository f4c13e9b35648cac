//! Harbor - offline caching agent for static websites
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use harbor::cli::{Cli, Commands};
use harbor::config::{Config, ConfigManager};
use harbor::error::{HarborError, HarborResult};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> HarborResult<()> {
    let cli = Cli::parse();

    // Explicit path wins, then harbor.toml in cwd or an ancestor
    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| HarborError::io("getting current directory", e))?;
            match ConfigManager::find_local_config(&cwd) {
                Some(found) => ConfigManager::with_path(found),
                None => ConfigManager::new(),
            }
        }
    };

    let config = config_manager.load().await?;
    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());

    match cli.command {
        Commands::Config(args) => {
            harbor::cli::commands::config(args, &config, &config_manager).await
        }
        Commands::Partitions => harbor::cli::commands::partitions(&config).await,
        Commands::Classify(args) => harbor::cli::commands::classify(args, &config).await,
        Commands::Fallback(args) => harbor::cli::commands::fallback(args).await,
        Commands::Warm(args) => harbor::cli::commands::warm(args, &config).await,
    }
}

/// Initialize logging: 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("harbor=warn"),
        1 => EnvFilter::new("harbor=info"),
        _ => EnvFilter::new("harbor=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
