//! Command-line interface definitions.

pub mod check;
pub mod output;
pub mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::app::config::{Settings, DEFAULT_SETTINGS_PATH};
use crate::error::Result;

/// Batchswap - paced native-asset swaps across many wallets.
#[derive(Parser, Debug)]
#[command(name = "batchswap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Swap from every configured wallet, one at a time
    Run(RunArgs),

    /// Validate the wallet and settings files without touching the network
    Check(ConfigPaths),
}

/// Config file locations shared by every command.
#[derive(Parser, Debug, Clone)]
pub struct ConfigPaths {
    /// Path to the wallet file
    #[arg(short, long, default_value = "wallets.txt")]
    pub wallets: PathBuf,

    /// Path to the settings file (defaults apply when settings.toml is absent)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,
}

impl ConfigPaths {
    /// Load settings from the explicit path, or from the default path if present.
    #[allow(clippy::result_large_err)]
    pub fn load_settings(&self) -> Result<Settings> {
        match &self.settings {
            Some(path) => Settings::load(path),
            None => Settings::load_or_default(DEFAULT_SETTINGS_PATH),
        }
    }
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub paths: ConfigPaths,

    /// Override the outcome log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Resolve, price and build every swap but submit nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Seed for wallet ordering and pacing draws
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}
