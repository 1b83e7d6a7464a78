//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, ClientConfig};
use crate::error::{Error, Result};
use crate::fetch::ConfigFetcher;
use crate::http::{HttpExecutor, ReqwestExecutor};
use crate::store::ConfigStore;
use crate::types::KeyValueItem;
use serde_json::json;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = load_config(&self.cli.config)?;

        match &self.cli.command {
            Commands::Fetch {
                store,
                context,
                label,
                format,
            } => {
                let executor = ReqwestExecutor::with_config(config.http.client_config())?;
                let lines = fetch_lines(
                    &config,
                    executor,
                    store.as_deref(),
                    context.as_deref(),
                    label.as_deref(),
                    *format,
                )
                .await?;
                for line in lines {
                    println!("{line}");
                }
                Ok(())
            }
            Commands::Stores => {
                for line in store_lines(&config)? {
                    println!("{line}");
                }
                Ok(())
            }
            Commands::Validate => {
                println!(
                    "{}: valid ({} stores)",
                    self.cli.config.display(),
                    config.stores.len()
                );
                Ok(())
            }
        }
    }
}

/// Select the stores a fetch runs against, applying a label override
pub fn select_stores(
    config: &ClientConfig,
    store: Option<&str>,
    label: Option<&str>,
) -> Result<Vec<ConfigStore>> {
    let mut stores = match store {
        Some(name) => vec![config
            .store(name)
            .cloned()
            .ok_or_else(|| Error::unknown_store(name))?],
        None => config.stores.clone(),
    };

    if let Some(label) = label {
        stores = stores
            .into_iter()
            .map(|s| s.with_label(label))
            .collect();
    }
    Ok(stores)
}

/// Fetch every selected store and render one output line per item
pub async fn fetch_lines<E: HttpExecutor>(
    config: &ClientConfig,
    executor: E,
    store: Option<&str>,
    context: Option<&str>,
    label: Option<&str>,
    format: OutputFormat,
) -> Result<Vec<String>> {
    let stores = select_stores(config, store, label)?;
    let context = context.unwrap_or(&config.context);
    let fetcher = ConfigFetcher::new(executor, config.pool()?).with_options(config.fetch);

    let mut lines = Vec::new();
    for store in &stores {
        let items = fetcher.fetch_keys(context, store).await?;
        info!("Fetched {} keys from store '{}'", items.len(), store.name());
        for item in &items {
            lines.push(format_item(store.name(), item, format)?);
        }
    }
    Ok(lines)
}

/// Render one item
pub fn format_item(store: &str, item: &KeyValueItem, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut value = json!({
                "store": store,
                "key": item.key(),
                "value": item.value(),
                "label": item.label(),
            });
            if let Some(content_type) = item.content_type() {
                value["content_type"] = json!(content_type);
            }
            Ok(serde_json::to_string(&value)?)
        }
        OutputFormat::Pretty => {
            let label = if item.label().is_empty() {
                "(no label)"
            } else {
                item.label()
            };
            Ok(format!(
                "{store}  {}  [{label}]  = {}",
                item.key(),
                item.value()
            ))
        }
    }
}

/// Render the configured stores with secrets redacted
pub fn store_lines(config: &ClientConfig) -> Result<Vec<String>> {
    let pool = config.pool()?;
    config
        .stores
        .iter()
        .map(|store| -> Result<String> {
            let connection = pool.require(store.name())?;
            let labels = store.label_filter().unwrap_or_else(|| "(none)".to_string());
            Ok(format!("{}  {connection}  labels: {labels}", store.name()))
        })
        .collect()
}
