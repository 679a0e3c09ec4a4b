pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "reown", version)]
#[command(about = "Hand ownership of a Google Drive folder tree to another account")]
pub struct Args {
    /// Path to the reown config directory (defaults to ~/.reown)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Drive API base URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<Url>,

    /// OAuth access token of the account that currently owns the files
    #[arg(long, global = true, env = "REOWN_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: crate::Command,
}
