//! Client configuration
//!
//! Loaded from YAML (JSON works too, being a subset of YAML):
//!
//! ```yaml
//! context: /application/
//! stores:
//!   - name: primary
//!     connection_string: "Endpoint=https://primary.example.io;Id=abc;Secret=c2VjcmV0"
//!     label: "prod,default"
//! http:
//!   timeout_secs: 30
//! fetch:
//!   max_pages: 1000
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::fetch::FetchOptions;
use crate::http::HttpClientConfig;
use crate::store::{ConfigStore, ConnectionString, ConnectionStringPool};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Key prefix to fetch when none is given
    #[serde(default = "default_context")]
    pub context: String,

    /// Config stores, in precedence order
    #[serde(default)]
    pub stores: Vec<ConfigStore>,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Fetch behaviour
    #[serde(default)]
    pub fetch: FetchOptions,
}

fn default_context() -> String {
    "/application/".to_string()
}

/// HTTP settings as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

impl HttpConfig {
    /// Convert to the executor's client configuration
    pub fn client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder().timeout(Duration::from_secs(self.timeout_secs));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }
}

impl ClientConfig {
    /// Find a store by name
    pub fn store(&self, name: &str) -> Option<&ConfigStore> {
        self.stores.iter().find(|s| s.name == name)
    }

    /// Parse every store's connection string into a pool
    pub fn pool(&self) -> Result<ConnectionStringPool> {
        self.stores
            .iter()
            .map(|store| -> Result<(String, ConnectionString)> {
                let connection = ConnectionString::parse(&store.connection_string)
                    .with_context(|| format!("store '{}'", store.name))?;
                Ok((store.name.clone(), connection))
            })
            .collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.stores.is_empty() {
            return Err(Error::missing_field("stores"));
        }

        let mut names = HashSet::new();
        for store in &self.stores {
            if store.name.trim().is_empty() {
                return Err(Error::config("Store name cannot be empty"));
            }
            if !names.insert(store.name.as_str()) {
                return Err(Error::config(format!(
                    "Duplicate store name '{}'",
                    store.name
                )));
            }
            if store.connection_string.trim().is_empty() {
                return Err(Error::missing_field(format!(
                    "stores.{}.connection_string",
                    store.name
                )));
            }
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::config("http.timeout_secs must be greater than zero"));
        }
        if self.fetch.max_pages == 0 {
            return Err(Error::config("fetch.max_pages must be greater than zero"));
        }

        self.pool().map(|_| ())
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load and validate a config file
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_config_from_str(&content)
}

/// Load and validate a config from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<ClientConfig> {
    let config: ClientConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
