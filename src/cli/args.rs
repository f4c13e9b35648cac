//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Harbor - offline caching agent for static websites
///
/// Inspects the agent configuration of a deployed site: partition names,
/// request routing, offline fallbacks, and a live preload dry run.
#[derive(Parser, Debug)]
#[command(name = "harbor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "HARBOR_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or initialize configuration
    Config(ConfigArgs),

    /// Show current partition names and the static manifest
    Partitions,

    /// Show which strategy a request would be routed to
    Classify(ClassifyArgs),

    /// Print the offline fallback response for a destination
    Fallback(FallbackArgs),

    /// Preload the manifest from the live site and report what was cached
    Warm(WarmArgs),
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the classify command
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Absolute request URL
    pub url: String,

    /// Request destination (document, image, font, style, script, other)
    #[arg(short, long)]
    pub destination: Option<String>,

    /// HTTP method
    #[arg(short, long, default_value = "GET")]
    pub method: String,
}

/// Arguments for the fallback command
#[derive(Parser, Debug)]
pub struct FallbackArgs {
    /// Request destination (document, image, font, style, script, other)
    #[arg(short, long, default_value = "document")]
    pub destination: String,

    /// Print only the body
    #[arg(long)]
    pub body_only: bool,
}

/// Arguments for the warm command
#[derive(Parser, Debug)]
pub struct WarmArgs {
    /// Override the configured site origin
    #[arg(short, long)]
    pub origin: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Output format for reporting commands
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}
