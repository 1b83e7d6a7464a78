//! HTTP module
//!
//! The I/O boundary of the fetcher.
//!
//! # Overview
//!
//! - `HttpExecutor` - the pluggable capability that turns a `KvRequest` into a `KvResponse`
//! - `ReqwestExecutor` - production executor backed by `reqwest`
//! - `KvRequest` / `KvResponse` - transport-neutral request and response values

mod client;
mod types;

pub use client::{HttpClientConfig, HttpClientConfigBuilder, HttpExecutor, ReqwestExecutor};
pub use types::{KvRequest, KvResponse};
