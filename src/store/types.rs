//! Store descriptor types

use crate::types::LABEL_SEPARATOR;
use serde::{Deserialize, Serialize};

/// Descriptor for one backing config store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStore {
    /// Store name, used to look up its connection string
    pub name: String,

    /// Raw connection string
    #[serde(default)]
    pub connection_string: String,

    /// Ordered label filter, e.g. `"prod,default"`
    #[serde(default)]
    pub label: Option<String>,
}

impl ConfigStore {
    /// Create a store descriptor without a label filter
    pub fn new(name: impl Into<String>, connection_string: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connection_string: connection_string.into(),
            label: None,
        }
    }

    /// Set the label filter
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Requested labels in precedence order
    ///
    /// Blank entries are dropped and repeated labels keep their first position.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        let Some(raw) = self.label.as_deref() else {
            return labels;
        };

        for label in raw.split(LABEL_SEPARATOR).map(str::trim) {
            if !label.is_empty() && !labels.iter().any(|l| l == label) {
                labels.push(label.to_string());
            }
        }
        labels
    }

    /// Label filter as sent on the wire, `None` when no labels are set
    pub fn label_filter(&self) -> Option<String> {
        let labels = self.labels();
        if labels.is_empty() {
            None
        } else {
            Some(labels.join(LABEL_SEPARATOR.to_string().as_str()))
        }
    }
}
