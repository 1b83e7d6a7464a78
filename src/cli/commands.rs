//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginated key-value configuration client
#[derive(Parser, Debug)]
#[command(name = "kvconfig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true, default_value = "kvconfig.yaml")]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch keys from config stores
    Fetch {
        /// Store to fetch from (default: every configured store)
        #[arg(long)]
        store: Option<String>,

        /// Key prefix (default: the configured context)
        #[arg(long)]
        context: Option<String>,

        /// Label filter overriding the store's own (comma-separated, in precedence order)
        #[arg(long)]
        label: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// List configured stores
    Stores,

    /// Validate the configuration file
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Human-readable output
    Pretty,
}
