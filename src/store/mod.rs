//! Config store descriptors
//!
//! A `ConfigStore` names one backing key-value store and its label filter.
//! The `ConnectionStringPool` maps store names to parsed credentials and is
//! read-only once handed to a fetcher.

mod connection;
mod types;

pub use connection::{ConnectionString, ConnectionStringPool};
pub use types::ConfigStore;

#[cfg(test)]
mod tests;
