use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::SelectedSet;
use crate::panel::FacetEvent;
use crate::selection::add_value;

static EMPTY: SelectedSet = SelectedSet::new();

/// Characters escaped in query strings: the separators, `%` itself, and
/// whitespace so that parsing can trim. Non-ASCII is always escaped.
const QUERY_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'%')
    .add(b'&')
    .add(b'=')
    .add(b',')
    .add(b'+')
    .add(b'#');

fn encode(text: &str) -> String {
    utf8_percent_encode(text, QUERY_ESCAPE).to_string()
}

fn decode(text: &str) -> String {
    percent_decode_str(text.trim()).decode_utf8_lossy().into_owned()
}

/// Parse facet filter strings in the format "key=value" into a filter map
/// Multiple values for the same key are collected into a vector
pub fn parse_facet_filters(facet_strings: &[String]) -> HashMap<String, Vec<String>> {
    let mut facet_map = HashMap::new();

    for facet_str in facet_strings {
        if let Some((key, value)) = facet_str.split_once('=') {
            facet_map
                .entry(key.trim().to_string())
                .or_insert_with(Vec::new)
                .push(value.trim().to_string());
        }
    }

    facet_map
}

/// The selected values of every facet field. Fields with nothing selected
/// are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query(BTreeMap<String, SelectedSet>);

impl<'de> Deserialize<'de> for Query {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = BTreeMap::<String, SelectedSet>::deserialize(deserializer)?;
        Ok(Self::from(fields))
    }
}

impl From<BTreeMap<String, SelectedSet>> for Query {
    /// Empty selections are dropped.
    fn from(fields: BTreeMap<String, SelectedSet>) -> Self {
        Self(fields.into_iter().filter(|(_, v)| !v.is_empty()).collect())
    }
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from parsed `key=value` filters, dropping repeated values.
    pub fn from_filters(filters: &HashMap<String, Vec<String>>) -> Self {
        let mut query = Self::new();
        for (field, values) in filters {
            let selected = values
                .iter()
                .fold(SelectedSet::new(), |acc, value| add_value(&acc, value));
            query.set(field, selected);
        }
        query
    }

    /// Selected values of `field`; empty when nothing is selected.
    pub fn field(&self, field: &str) -> &SelectedSet {
        self.0.get(field).unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, field: &str, selected: SelectedSet) {
        if selected.is_empty() {
            self.0.remove(field);
        } else {
            self.0.insert(field.to_string(), selected);
        }
    }

    /// Fold a sidebar event into the query. Panel toggles don't touch it.
    pub fn apply(&mut self, event: &FacetEvent) {
        if let FacetEvent::Changed { field, values } = event {
            self.set(field, values.clone());
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &SelectedSet)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `field=v1,v2&other=v3`, fields in name order. Separators inside
    /// names and values are percent-encoded.
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(field, values)| {
                let values: Vec<String> = values.iter().map(|v| encode(v)).collect();
                format!("{}={}", encode(field), values.join(","))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Inverse of [`Query::to_query_string`]. Empty segments and values are skipped.
    pub fn parse_query_string(input: &str) -> Self {
        let mut query = Self::new();
        for segment in input.split('&').filter(|s| !s.trim().is_empty()) {
            let Some((field, raw_values)) = segment.split_once('=') else {
                continue;
            };
            let selected = raw_values
                .split(',')
                .map(decode)
                .filter(|v| !v.is_empty())
                .fold(SelectedSet::new(), |acc, value| add_value(&acc, &value));
            query.set(&decode(field), selected);
        }
        query
    }
}
