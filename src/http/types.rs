//! Request and response values exchanged with an executor

use crate::error::Result;
use bytes::Bytes;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// A request to a config store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvRequest {
    pub method: Method,
    pub url: Url,
    /// Request-specific headers
    pub headers: HashMap<String, String>,
}

impl KvRequest {
    /// Create a GET request
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HashMap::new(),
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// First value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

impl fmt::Display for KvRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// A complete response: status, headers, and the fully read body
#[derive(Debug, Clone, Default)]
pub struct KvResponse {
    status: u16,
    reason: Option<String>,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl KvResponse {
    /// Create an empty response with the given status
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Set the status reason text
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Append a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the raw body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Set a JSON body
    pub fn with_json<T: Serialize>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)?;
        Ok(self.with_body(body))
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Reason text, falling back to the canonical reason for the status
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref().or_else(|| {
            StatusCode::from_u16(self.status)
                .ok()
                .and_then(|s| s.canonical_reason())
        })
    }

    /// First header value with the given name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, replacing invalid UTF-8
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl fmt::Display for KvResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(reason) = self.reason() {
            write!(f, " {reason}")?;
        }
        if !self.body.is_empty() {
            write!(f, ", body: {}", self.body_text())?;
        }
        Ok(())
    }
}
