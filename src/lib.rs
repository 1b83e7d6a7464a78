//! # kvconfig
//!
//! Client for paginated key-value configuration stores.
//!
//! ## Features
//!
//! - **Paginated listing**: follows `link: <...>; rel="next"` headers until the listing ends
//! - **Label precedence**: `prod,default` returns every `prod` item before any `default` item
//! - **Pluggable transport**: any `HttpExecutor` can serve the requests; `ReqwestExecutor` ships
//! - **Store configuration**: YAML/JSON config files and connection-string parsing
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kvconfig::{ConfigFetcher, ConfigStore, ConnectionString, ConnectionStringPool, ReqwestExecutor};
//!
//! #[tokio::main]
//! async fn main() -> kvconfig::Result<()> {
//!     let conn = "Endpoint=https://store.example.io;Id=abc;Secret=c2VjcmV0";
//!
//!     let mut pool = ConnectionStringPool::new();
//!     pool.insert("primary", ConnectionString::parse(conn)?);
//!
//!     let fetcher = ConfigFetcher::new(ReqwestExecutor::new()?, pool);
//!     let store = ConfigStore::new("primary", conn).with_label("prod,default");
//!
//!     for item in fetcher.fetch_keys("/application/", &store).await? {
//!         println!("{} [{}] = {}", item.key(), item.label(), item.value());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │        ConfigFetcher::fetch_keys(context, store)         │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴────┬──────────────┬──────────┐
//! │    Store     │       HTTP       │   Paginate   │  Order   │
//! ├──────────────┼──────────────────┼──────────────┼──────────┤
//! │ Conn string  │ HttpExecutor     │ Link header  │ Labels   │
//! │ Pool lookup  │ ReqwestExecutor  │ rel="next"   │ Dedup    │
//! └──────────────┴──────────────────┴──────────────┴──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Key-value data model
pub mod types;

/// Config store descriptors and connection strings
pub mod store;

/// HTTP executors
pub mod http;

/// Link header pagination
pub mod pagination;

/// Paginated fetch and label ordering
pub mod fetch;

/// Client configuration files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use fetch::{ConfigFetcher, FetchOptions};
pub use http::{HttpExecutor, KvRequest, KvResponse, ReqwestExecutor};
pub use store::{ConfigStore, ConnectionString, ConnectionStringPool};
pub use types::{KeyValueItem, KeyValueResponse, LABEL_SEPARATOR};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
