//! Label precedence and deduplication
//!
//! The service does not promise any ordering across labels, so the result is
//! put in requested-label order on the client.

use crate::types::KeyValueItem;
use std::collections::HashSet;
use tracing::debug;

/// Check whether an item label satisfies a requested label
///
/// A requested label ending in `*` matches by prefix.
pub fn label_matches(requested: &str, label: &str) -> bool {
    match requested.strip_suffix('*') {
        Some(prefix) => label.starts_with(prefix),
        None => requested == label,
    }
}

/// Order items by requested label precedence and drop duplicates
///
/// With two or more labels, items are grouped by the first requested label
/// they match, in request order, keeping arrival order inside each group.
/// Items matching no requested label are dropped. A single label keeps only
/// matching items in arrival order; no labels keeps everything.
pub fn order_by_labels(items: Vec<KeyValueItem>, labels: &[String]) -> Vec<KeyValueItem> {
    match labels {
        [] => return dedup(items),
        [label] => {
            return dedup(
                items
                    .into_iter()
                    .filter(|item| label_matches(label, item.label()))
                    .collect(),
            )
        }
        _ => {}
    }

    let total = items.len();
    let mut groups: Vec<Vec<KeyValueItem>> = vec![Vec::new(); labels.len()];
    for item in items {
        if let Some(index) = labels.iter().position(|l| label_matches(l, item.label())) {
            groups[index].push(item);
        }
    }

    let ordered: Vec<KeyValueItem> = groups.into_iter().flatten().collect();
    if ordered.len() < total {
        debug!(
            "Dropped {} items outside labels {:?}",
            total - ordered.len(),
            labels
        );
    }
    dedup(ordered)
}

/// Remove repeated (key, label) pairs, keeping the first occurrence
pub fn dedup(items: Vec<KeyValueItem>) -> Vec<KeyValueItem> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert((item.key().to_string(), item.label().to_string())))
        .collect()
}
