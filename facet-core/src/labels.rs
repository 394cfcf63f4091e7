use serde::{Deserialize, Serialize};

use crate::models::{FacetSnapshot, LabelLookup};

/// Display name for `key`, or the key itself when the lookup has no entry.
pub fn resolve_label(key: &str, lookup: &LabelLookup) -> String {
    lookup
        .get(key)
        .map(|referenced| referenced.name.clone())
        .unwrap_or_else(|| key.to_string())
}

/// Where a facet takes its entry labels from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "table", rename_all = "snake_case")]
pub enum LabelSource {
    /// Show raw keys.
    #[default]
    Raw,
    /// Look keys up in the named table of the snapshot's `referenced` data.
    Referenced(String),
}

impl LabelSource {
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::Raw => None,
            Self::Referenced(table) => Some(table),
        }
    }

    /// Resolve `key` against `snapshot`. A missing table behaves as an empty one.
    pub fn resolve(&self, key: &str, snapshot: &FacetSnapshot) -> String {
        match self.table().and_then(|table| snapshot.labels(table)) {
            Some(lookup) => resolve_label(key, lookup),
            None => key.to_string(),
        }
    }
}
