//! CLI module for the GitSage dashboard client
//!
//! # Commands
//!
//! - `call` - Call a JSON endpoint and print the response
//! - `watch` - Poll environment status the way the dashboard root page does
//! - `notify` - Show a transient notification in the terminal
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Fetch environment status once
//! gitsage-dashboard call /api/environment
//!
//! # Poll every 10 seconds until Ctrl+C
//! gitsage-dashboard watch --interval-ms 10000
//! ```

pub mod call;
pub mod completions;
pub mod config;
pub mod notify;
pub mod output;
pub mod watch;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::GitSageConfig;
use crate::logging::init_tracing;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// GitSage dashboard client
#[derive(Parser, Debug)]
#[command(
    name = "gitsage-dashboard",
    version,
    about = "GitSage dashboard client - API calls, status polling and notifications"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Call a JSON endpoint
    Call(CallArgs),
    /// Poll environment status
    Watch(WatchArgs),
    /// Show a notification
    Notify(NotifyArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that talks to the dashboard.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "gitsage.toml")]
    pub config: PathBuf,

    /// Override the dashboard base URL
    #[arg(short = 'u', long, env = "GITSAGE_BASE_URL")]
    pub base_url: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GITSAGE_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct CallArgs {
    /// Endpoint path (e.g. /api/config) or absolute URL
    pub endpoint: String,

    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Extra header as 'Name: value' (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// JSON request body
    #[arg(short, long)]
    pub data: Option<String>,

    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Page path the client is running on; only "/" polls
    #[arg(long, default_value = "/")]
    pub path: String,

    /// Override the poll interval
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Fetch once, print the result and exit
    #[arg(long)]
    pub once: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// Message text
    pub message: String,

    /// Severity (info, success, warning, error, or any custom name)
    #[arg(short, long, default_value = "info")]
    pub severity: String,

    /// Return right away instead of waiting for the notification to expire
    #[arg(long)]
    pub no_wait: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "gitsage.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Install the tracing subscriber for a command. Failure is fatal for every
/// command.
pub fn init_logging(config: &GitSageConfig) -> anyhow::Result<()> {
    init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

/// Load configuration with CLI overrides
///
/// A missing config file means defaults; a present but broken one is an error.
pub fn load_config_with_overrides(args: &ConnectionArgs) -> anyhow::Result<GitSageConfig> {
    let mut config = if args.config.exists() {
        GitSageConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        GitSageConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(ref base_url) = args.base_url {
        config.client.base_url = base_url.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    Ok(config)
}
