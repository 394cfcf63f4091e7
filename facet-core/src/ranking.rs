use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::models::{FilterValue, FrequencyMap};
use crate::sorting::compare_labels;

/// How a facet orders its entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Most frequent first.
    #[default]
    ByFrequency,
    /// A fixed list first (severities, issue types), then anything else ranked.
    Fixed(Vec<FilterValue>),
    /// By normalized display label.
    Alphabetical,
    /// By key, ascending. Date buckets keyed by ISO-8601 dates sort in time
    /// order.
    Chronological,
}

/// All keys of `frequencies`, most frequent first.
///
/// The sort is stable: equal counts keep the map's own key order.
pub fn rank_entries(frequencies: &FrequencyMap) -> Vec<FilterValue> {
    let mut keys: Vec<(&FilterValue, u64)> = frequencies.iter().map(|(k, v)| (k, *v)).collect();
    keys.sort_by_key(|(_, count)| Reverse(*count));
    keys.into_iter().map(|(k, _)| k.clone()).collect()
}

/// Order the entries of one facet under `policy`.
///
/// `label` resolves a key to its display name and is only consulted by
/// [`OrderingPolicy::Alphabetical`].
pub fn order_entries<F>(policy: &OrderingPolicy, frequencies: &FrequencyMap, label: F) -> Vec<FilterValue>
where
    F: Fn(&str) -> String,
{
    match policy {
        OrderingPolicy::ByFrequency => rank_entries(frequencies),
        OrderingPolicy::Fixed(order) => {
            let mut entries: Vec<FilterValue> = Vec::with_capacity(order.len() + frequencies.len());
            for value in order {
                if !entries.contains(value) {
                    entries.push(value.clone());
                }
            }
            for value in rank_entries(frequencies) {
                if !entries.contains(&value) {
                    entries.push(value);
                }
            }
            entries
        }
        OrderingPolicy::Alphabetical => {
            let mut labelled: Vec<(String, FilterValue)> = frequencies
                .keys()
                .map(|k| (label(k.as_str()), k.clone()))
                .collect();
            labelled.sort_by(|(a_label, a_key), (b_label, b_key)| {
                compare_labels(a_label, a_key, b_label, b_key)
            });
            labelled.into_iter().map(|(_, k)| k).collect()
        }
        OrderingPolicy::Chronological => {
            let mut keys: Vec<FilterValue> = frequencies.keys().cloned().collect();
            keys.sort();
            keys
        }
    }
}
