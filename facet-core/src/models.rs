use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::query::Query;

/// Opaque key identifying one facet entry, e.g. a language identifier.
pub type FilterValue = String;

/// Facet counts keyed by value, in the order the data source listed them.
/// A key missing from the map has an unknown count, not a zero count.
pub type FrequencyMap = IndexMap<FilterValue, u64>;

/// Friendly names for facet values, keyed by value.
pub type LabelLookup = HashMap<FilterValue, ReferencedLabel>;

/// The values currently selected for one facet field.
///
/// Holds no duplicates. The type relies on its callers for that and does not
/// repair a set that breaks it; `validation` reports such sets instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedSet(Vec<FilterValue>);

impl SelectedSet {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterValue> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[FilterValue] {
        &self.0
    }
}

impl From<Vec<FilterValue>> for SelectedSet {
    fn from(values: Vec<FilterValue>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[&str; N]> for SelectedSet {
    fn from(values: [&str; N]) -> Self {
        Self(values.iter().map(|v| v.to_string()).collect())
    }
}

impl FromIterator<FilterValue> for SelectedSet {
    fn from_iter<I: IntoIterator<Item = FilterValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SelectedSet {
    type Item = &'a FilterValue;
    type IntoIter = std::slice::Iter<'a, FilterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A referenced entity (language, rule, user...) that can name a facet value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencedLabel {
    pub name: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ReferencedLabel {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: HashMap::new(),
        }
    }
}

/// How a click should combine with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleMode {
    /// Plain click: collapse to the clicked value.
    #[default]
    Single,
    /// Modifier click (Ctrl or Cmd held): add or remove the clicked value.
    Multiple,
}

impl ToggleMode {
    /// Build the mode from whether a modifier key was held during the click.
    pub fn from_modifier(multiple: bool) -> Self {
        if multiple {
            Self::Multiple
        } else {
            Self::Single
        }
    }

    pub fn is_multiple(self) -> bool {
        self == Self::Multiple
    }
}

/// The component the issues page is scoped to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentContext {
    pub key: String,
    pub qualifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

/// Everything one sidebar render needs, as supplied by the surrounding app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetSnapshot {
    /// Frequency data per facet field. Absent field means not fetched yet.
    #[serde(default)]
    pub facets: BTreeMap<String, FrequencyMap>,
    /// Label tables by name, e.g. "languages" or "rules".
    #[serde(default)]
    pub referenced: BTreeMap<String, LabelLookup>,
    #[serde(default)]
    pub query: Query,
    #[serde(default)]
    pub open_facets: BTreeMap<String, bool>,
    /// Per-field fetch in flight.
    #[serde(default)]
    pub loading_facets: BTreeMap<String, bool>,
    /// Whole-page reload in flight; stats are hidden meanwhile.
    #[serde(default)]
    pub loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentContext>,
}

impl FacetSnapshot {
    pub fn frequencies(&self, field: &str) -> Option<&FrequencyMap> {
        self.facets.get(field)
    }

    pub fn labels(&self, table: &str) -> Option<&LabelLookup> {
        self.referenced.get(table)
    }

    pub fn is_open(&self, field: &str) -> bool {
        self.open_facets.get(field).copied().unwrap_or(false)
    }

    pub fn is_fetching(&self, field: &str) -> bool {
        self.loading_facets.get(field).copied().unwrap_or(false)
    }

    pub fn selected(&self, field: &str) -> &SelectedSet {
        self.query.field(field)
    }
}
