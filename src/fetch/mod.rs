//! Paginated fetch module
//!
//! Lists every key under a context from one config store.
//!
//! # Overview
//!
//! `ConfigFetcher::fetch_keys` issues `GET {endpoint}/kv?key={context}*&label={labels}`,
//! follows `rel="next"` links page by page, and merges the pages into one
//! deduplicated list in label precedence order.
//!
//! - 200 pages are decoded and merged
//! - 404 means the context has no keys and yields an empty list
//! - any other status aborts the whole fetch

mod ordering;

pub use ordering::{dedup, label_matches, order_by_labels};

use crate::error::{Error, Result};
use crate::http::{HttpExecutor, KvRequest, KvResponse};
use crate::pagination::{LinkHeaderPaginator, NextPage, PaginationState};
use crate::store::{ConfigStore, ConnectionStringPool};
use crate::types::{KeyValueItem, KeyValueResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Query parameter carrying the key filter
pub const KEY_PARAM: &str = "key";

/// Query parameter carrying the label filter
pub const LABEL_PARAM: &str = "label";

/// Path of the key-value listing endpoint
pub const KV_PATH: &str = "kv";

const NOT_FOUND: u16 = 404;
const OK: u16 = 200;

/// Options for a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Upper bound on pages followed in one fetch
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

fn default_max_pages() -> usize {
    1000
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Fetches keys from config stores through an injected executor
pub struct ConfigFetcher<E> {
    executor: E,
    pool: Arc<ConnectionStringPool>,
    paginator: LinkHeaderPaginator,
    options: FetchOptions,
}

impl<E: HttpExecutor> ConfigFetcher<E> {
    /// Create a fetcher over a connection string pool
    pub fn new(executor: E, pool: impl Into<Arc<ConnectionStringPool>>) -> Self {
        Self {
            executor,
            pool: pool.into(),
            paginator: LinkHeaderPaginator::default(),
            options: FetchOptions::default(),
        }
    }

    /// Set fetch options
    #[must_use]
    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn pool(&self) -> &ConnectionStringPool {
        &self.pool
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Fetch every key under `context` from `store`
    ///
    /// The store must be registered in the pool; an unknown store fails
    /// before any request is made.
    pub async fn fetch_keys(&self, context: &str, store: &ConfigStore) -> Result<Vec<KeyValueItem>> {
        let connection = self.pool.require(store.name())?;
        let labels = store.labels();
        let mut url = build_query_url(connection.endpoint(), context, store.label_filter().as_deref())?;

        let mut state = PaginationState::new();
        let mut items = Vec::new();

        loop {
            if state.pages >= self.options.max_pages {
                return Err(Error::PageLimitExceeded {
                    max_pages: self.options.max_pages,
                });
            }

            let request = KvRequest::get(url);
            let response = self.executor.execute(&request, connection).await?;

            match response.status() {
                OK => {}
                NOT_FOUND => {
                    debug!("No keys found for {request}");
                    return Ok(Vec::new());
                }
                status => return Err(Error::request_failure(status, response.to_string())),
            }

            let page = decode_page(&response, &request)?;
            let count = page.items.len();
            items.extend(page.items.into_iter().map(|item| item.in_context(context)));

            debug!(
                store = store.name(),
                "Page {}: fetched {count} items",
                state.pages + 1
            );

            match self.paginator.process_response(&response, count, &mut state) {
                NextPage::Continue { url: next } => url = request.url.join(&next)?,
                NextPage::Done => break,
            }
        }

        let result = order_by_labels(items, &labels);
        debug!(
            store = store.name(),
            complete = state.done,
            "Fetched {} keys for context '{context}' in {} pages ({} received)",
            result.len(),
            state.pages,
            state.total_fetched
        );
        Ok(result)
    }
}

/// Build the first listing URL for a context and optional label filter
pub fn build_query_url(endpoint: &Url, context: &str, label: Option<&str>) -> Result<Url> {
    let mut url = endpoint.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| Error::config(format!("endpoint '{endpoint}' cannot be a base URL")))?
        .pop_if_empty()
        .push(KV_PATH);

    {
        let mut query = url.query_pairs_mut();
        query.append_pair(KEY_PARAM, &format!("{context}*"));
        if let Some(label) = label {
            query.append_pair(LABEL_PARAM, label);
        }
    }

    Ok(url)
}

fn decode_page(response: &KvResponse, request: &KvRequest) -> Result<KeyValueResponse> {
    serde_json::from_slice(response.body())
        .map_err(|e| Error::decode(format!("invalid key-value page from {}: {e}", request.url)))
}
