//! Connection strings and the store-name pool
//!
//! Format: `Endpoint=https://store.example.io;Id=<credential id>;Secret=<base64>`

use crate::error::{Error, Result};
use base64::Engine as _;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use url::Url;

const ENDPOINT: &str = "Endpoint";
const ID: &str = "Id";
const SECRET: &str = "Secret";

/// Parsed credentials for one config store
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionString {
    endpoint: Url,
    id: String,
    secret: String,
}

impl ConnectionString {
    /// Parse a connection string
    pub fn parse(raw: &str) -> Result<Self> {
        let mut endpoint = None;
        let mut id = None;
        let mut secret = None;

        for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            // Secrets may contain '=' padding, so split on the first one only
            let (name, value) = segment.split_once('=').ok_or_else(|| {
                Error::connection_string(format!("segment '{segment}' has no value"))
            })?;

            match name.trim() {
                n if n.eq_ignore_ascii_case(ENDPOINT) => endpoint = Some(value.trim()),
                n if n.eq_ignore_ascii_case(ID) => id = Some(value.trim()),
                n if n.eq_ignore_ascii_case(SECRET) => secret = Some(value.trim()),
                other => {
                    return Err(Error::connection_string(format!(
                        "unknown segment '{other}'"
                    )))
                }
            }
        }

        let endpoint = required(endpoint, ENDPOINT)?;
        let id = required(id, ID)?;
        let secret = required(secret, SECRET)?;

        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::connection_string(format!("invalid endpoint '{endpoint}': {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::connection_string(format!(
                "endpoint must be http or https, got '{}'",
                endpoint.scheme()
            )));
        }

        let connection = Self {
            endpoint,
            id: id.to_string(),
            secret: secret.to_string(),
        };
        connection.secret_bytes()?;
        Ok(connection)
    }

    /// Store endpoint, e.g. `https://store.example.io`
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Credential id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Base64 credential secret
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Decoded credential secret bytes
    pub fn secret_bytes(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.secret)
            .map_err(|e| Error::connection_string(format!("secret is not valid base64: {e}")))
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::connection_string(format!(
            "missing required segment '{name}'"
        ))),
    }
}

impl FromStr for ConnectionString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionString")
            .field("endpoint", &self.endpoint.as_str())
            .field("id", &self.id)
            .field("secret", &"***")
            .finish()
    }
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{ENDPOINT}={};{ID}={};{SECRET}=***",
            self.endpoint.as_str().trim_end_matches('/'),
            self.id
        )
    }
}

// ============================================================================
// Pool
// ============================================================================

/// Mapping from store name to connection string
#[derive(Debug, Clone, Default)]
pub struct ConnectionStringPool {
    entries: HashMap<String, ConnectionString>,
}

impl ConnectionStringPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a store, replacing any previous entry under the same name
    pub fn insert(&mut self, name: impl Into<String>, connection: ConnectionString) {
        self.entries.insert(name.into(), connection);
    }

    pub fn get(&self, name: &str) -> Option<&ConnectionString> {
        self.entries.get(name)
    }

    /// Look up a store, failing with a configuration error when it is unknown
    pub fn require(&self, name: &str) -> Result<&ConnectionString> {
        self.get(name).ok_or_else(|| Error::unknown_store(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<(String, ConnectionString)> for ConnectionStringPool {
    fn from_iter<I: IntoIterator<Item = (String, ConnectionString)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
