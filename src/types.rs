//! Key-value data model
//!
//! The items returned by a config store and the JSON envelope they arrive in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Separator between label names in a store's label filter
pub const LABEL_SEPARATOR: char = ',';

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// KeyValueItem
// ============================================================================

/// A single configuration entry
///
/// Two items are equal when they share the same key and label; value and
/// metadata do not take part in identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyValueItem {
    /// Context the item was fetched under (not part of the wire format)
    #[serde(skip)]
    context: String,

    /// Full key, including the context prefix
    key: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    value: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    etag: Option<String>,

    #[serde(default)]
    locked: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    tags: StringMap,
}

impl KeyValueItem {
    /// Create an item whose full key is `context` followed by `key`
    pub fn new(
        context: impl Into<String>,
        key: impl AsRef<str>,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        let context = context.into();
        let key = format!("{context}{}", key.as_ref());
        Self {
            context,
            key,
            value: value.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Set the content type
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Add a tag
    #[must_use]
    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }

    /// Tag a decoded item with the context it was fetched under
    pub(crate) fn in_context(mut self, context: &str) -> Self {
        context.clone_into(&mut self.context);
        self
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Key with the context prefix removed
    ///
    /// Falls back to the full key when it does not start with the context.
    pub fn relative_key(&self) -> &str {
        self.key
            .strip_prefix(self.context.as_str())
            .unwrap_or(&self.key)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    pub fn tags(&self) -> &StringMap {
        &self.tags
    }

    /// Identity tuple used for equality and deduplication
    pub fn identity(&self) -> (&str, &str) {
        (&self.key, &self.label)
    }
}

impl PartialEq for KeyValueItem {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for KeyValueItem {}

impl Hash for KeyValueItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// KeyValueResponse
// ============================================================================

/// One page of a key listing: `{"items": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyValueResponse {
    #[serde(default)]
    pub items: Vec<KeyValueItem>,
}

impl KeyValueResponse {
    pub fn new(items: Vec<KeyValueItem>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_identity_ignores_value() {
        let a = KeyValueItem::new("/app/", "k1", "v1", "dev");
        let b = KeyValueItem::new("/app/", "k1", "other", "dev");
        let c = KeyValueItem::new("/app/", "k1", "v1", "prod");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_item_keys() {
        let item = KeyValueItem::new("/app/", "db.url", "jdbc", "");
        assert_eq!(item.key(), "/app/db.url");
        assert_eq!(item.relative_key(), "db.url");
        assert_eq!(item.context(), "/app/");
    }

    #[test]
    fn test_decode_wire_item() {
        let body = json!({
            "items": [{
                "key": "/app/feature",
                "value": "on",
                "label": null,
                "content_type": "text/plain",
                "etag": "abc",
                "locked": true,
                "last_modified": "2024-05-01T10:00:00Z",
                "tags": {"team": "core"}
            }]
        });

        let response: KeyValueResponse = serde_json::from_value(body).unwrap();
        let item = response.items[0].clone().in_context("/app/");

        assert_eq!(item.key(), "/app/feature");
        assert_eq!(item.relative_key(), "feature");
        assert_eq!(item.label(), "");
        assert_eq!(item.content_type(), Some("text/plain"));
        assert_eq!(item.etag(), Some("abc"));
        assert!(item.is_locked());
        assert!(item.last_modified().is_some());
        assert_eq!(item.tags().get("team"), Some(&"core".to_string()));
    }

    #[test]
    fn test_decode_missing_items() {
        let response: KeyValueResponse = serde_json::from_str("{}").unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_context_not_serialized() {
        let item = KeyValueItem::new("/app/", "k", "v", "l");
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("context").is_none());
        assert_eq!(value["key"], "/app/k");
    }
}
