//! CLI module
//!
//! Command-line interface for fetching keys from configured stores.
//!
//! # Commands
//!
//! - `fetch` - Fetch keys for a context from one or all stores
//! - `stores` - List configured stores
//! - `validate` - Validate the configuration file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
