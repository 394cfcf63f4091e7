//! One facet panel of the sidebar.
//!
//! A panel is configuration only: the field it edits, how it orders and
//! labels entries, and when it is shown. Rendering reads a [`FacetSnapshot`]
//! and user actions come back as [`FacetEvent`]s for the caller to apply.

use serde::{Deserialize, Serialize};

use crate::labels::LabelSource;
use crate::models::{ComponentContext, FacetSnapshot, FilterValue, SelectedSet, ToggleMode};
use crate::query::Query;
use crate::ranking::{order_entries, OrderingPolicy};
use crate::selection::{add_value, clear, shows_multiselect_hint, toggle_value};
use crate::stats::{format_stat_with, StatFormat};

/// Outbound notification from a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FacetEvent {
    /// The selection of `field` is now `values`.
    Changed {
        field: String,
        values: SelectedSet,
    },
    /// The panel for `field` was expanded or collapsed.
    Toggled { field: String },
}

impl FacetEvent {
    pub fn field(&self) -> &str {
        match self {
            Self::Changed { field, .. } | Self::Toggled { field } => field,
        }
    }
}

/// When a panel is shown, based on the component the page is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetVisibility {
    /// Only shown when the page is scoped to a component.
    pub requires_component: bool,
    /// Hidden when the component has one of these qualifiers.
    pub hidden_for_qualifiers: Vec<String>,
}

impl FacetVisibility {
    pub fn is_visible(&self, component: Option<&ComponentContext>) -> bool {
        match component {
            None => !self.requires_component,
            Some(component) => !self
                .hidden_for_qualifiers
                .iter()
                .any(|q| q == &component.qualifier),
        }
    }
}

/// Date histogram behavior: clicking a bucket selects the range from that
/// bucket's key up to the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub after_field: String,
    pub before_field: String,
}

impl DateRange {
    fn header_values(&self, query: &Query) -> Vec<String> {
        let after = query.field(&self.after_field).iter().next();
        let before = query.field(&self.before_field).iter().next();
        match (after, before) {
            (Some(after), Some(before)) => vec![format!("{} to {}", after, before)],
            (Some(after), None) => vec![format!("since {}", after)],
            (None, Some(before)) => vec![format!("before {}", before)],
            (None, None) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetPanel {
    pub field: String,
    pub title: String,
    #[serde(default)]
    pub ordering: OrderingPolicy,
    #[serde(default)]
    pub label_source: LabelSource,
    #[serde(default)]
    pub half_width: bool,
    #[serde(default)]
    pub visibility: FacetVisibility,
    /// Entries with no count cannot be clicked unless already selected.
    #[serde(default)]
    pub disable_empty: bool,
    /// Other query fields this panel edits, e.g. `resolved` next to
    /// `resolutions`. They are cleared along with the panel.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Nested panels; a panel with sub-facets is a group and holds no values
    /// of its own.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subfacets: Vec<FacetPanel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetEntry {
    pub value: FilterValue,
    pub label: String,
    /// Formatted count; `None` when unknown or while the page is loading.
    pub stat: Option<String>,
    pub active: bool,
    /// Show the modifier-click hint on this entry.
    pub tooltip: bool,
    pub half_width: bool,
    /// Shown but not clickable.
    pub disabled: bool,
}

/// Data for the "show more" picker under the ranked list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetFooter {
    /// Values already listed above, to leave out of the picker.
    pub excluded: Vec<FilterValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPanel {
    pub field: String,
    pub title: String,
    pub open: bool,
    pub fetching: bool,
    /// Labels of the selected values, in selection order.
    pub header_values: Vec<String>,
    pub entries: Option<Vec<FacetEntry>>,
    pub footer: Option<FacetFooter>,
    /// Rendered sub-facets of an open group.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderedPanel>,
}

impl FacetPanel {
    pub fn new(field: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            title: title.into(),
            ordering: OrderingPolicy::default(),
            label_source: LabelSource::default(),
            half_width: false,
            visibility: FacetVisibility::default(),
            disable_empty: false,
            extra_fields: Vec::new(),
            date_range: None,
            subfacets: Vec::new(),
        }
    }

    /// A panel that only groups `subfacets`; `field` keys its open flag.
    pub fn group(
        field: impl Into<String>,
        title: impl Into<String>,
        subfacets: Vec<FacetPanel>,
    ) -> Self {
        Self {
            subfacets,
            ..Self::new(field, title)
        }
    }

    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_labels(mut self, table: impl Into<String>) -> Self {
        self.label_source = LabelSource::Referenced(table.into());
        self
    }

    pub fn with_half_width(mut self) -> Self {
        self.half_width = true;
        self
    }

    pub fn with_visibility(mut self, visibility: FacetVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_disable_empty(mut self) -> Self {
        self.disable_empty = true;
        self
    }

    pub fn with_extra_fields(mut self, fields: &[&str]) -> Self {
        self.extra_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Turn the panel into a date histogram; buckets sort chronologically.
    pub fn with_date_range(
        mut self,
        after_field: impl Into<String>,
        before_field: impl Into<String>,
    ) -> Self {
        self.ordering = OrderingPolicy::Chronological;
        self.date_range = Some(DateRange {
            after_field: after_field.into(),
            before_field: before_field.into(),
        });
        self
    }

    pub fn is_group(&self) -> bool {
        !self.subfacets.is_empty()
    }

    /// Every query field this panel (or its sub-facets) edits.
    pub fn query_fields(&self) -> Vec<&str> {
        if self.is_group() {
            return self.subfacets.iter().flat_map(|p| p.query_fields()).collect();
        }
        let mut fields = vec![self.field.as_str()];
        if let Some(range) = &self.date_range {
            fields.push(&range.after_field);
            fields.push(&range.before_field);
        }
        fields.extend(self.extra_fields.iter().map(String::as_str));
        fields
    }

    pub fn is_visible(&self, component: Option<&ComponentContext>) -> bool {
        self.visibility.is_visible(component)
    }

    pub fn label(&self, key: &str, snapshot: &FacetSnapshot) -> String {
        self.label_source.resolve(key, snapshot)
    }

    /// Whether `value` shows as selected. A date panel marks the bucket its
    /// range starts at.
    pub fn is_active(&self, query: &Query, value: &str) -> bool {
        match &self.date_range {
            Some(range) => query.field(&range.after_field).contains(value),
            None => query.field(&self.field).contains(value),
        }
    }

    pub fn is_disabled(&self, snapshot: &FacetSnapshot, value: &str) -> bool {
        let count = snapshot
            .frequencies(&self.field)
            .and_then(|f| f.get(value))
            .copied()
            .unwrap_or(0);
        self.disable_empty && count == 0 && !self.is_active(&snapshot.query, value)
    }

    pub fn render(&self, snapshot: &FacetSnapshot, format: &StatFormat) -> RenderedPanel {
        let open = snapshot.is_open(&self.field);
        if self.is_group() {
            return self.render_group(snapshot, format, open);
        }

        let selected = snapshot.selected(&self.field);
        let frequencies = snapshot.frequencies(&self.field);

        let mut header_values: Vec<String> =
            selected.iter().map(|v| self.label(v, snapshot)).collect();
        if let Some(range) = &self.date_range {
            header_values.extend(range.header_values(&snapshot.query));
        }
        for extra in &self.extra_fields {
            let values = snapshot.selected(extra);
            if !values.is_empty() {
                header_values.push(format!("{}={}", extra, values.as_slice().join(",")));
            }
        }

        let entries = frequencies.filter(|_| open).map(|frequencies| {
            order_entries(&self.ordering, frequencies, |k| self.label(k, snapshot))
                .into_iter()
                .map(|value| {
                    let count = if snapshot.loading {
                        None
                    } else {
                        frequencies.get(&value).copied()
                    };
                    let disabled = self.is_disabled(snapshot, &value);
                    let tooltip = self.date_range.is_none()
                        && !disabled
                        && shows_multiselect_hint(selected, &value);
                    FacetEntry {
                        label: self.label(&value, snapshot),
                        stat: format_stat_with(count, format),
                        active: self.is_active(&snapshot.query, &value),
                        tooltip,
                        half_width: self.half_width,
                        disabled,
                        value,
                    }
                })
                .collect()
        });

        let footer = frequencies.filter(|_| open).map(|frequencies| FacetFooter {
            excluded: frequencies.keys().cloned().collect(),
        });

        RenderedPanel {
            field: self.field.clone(),
            title: self.title.clone(),
            open,
            fetching: snapshot.is_fetching(&self.field),
            header_values,
            entries,
            footer,
            children: Vec::new(),
        }
    }

    fn render_group(
        &self,
        snapshot: &FacetSnapshot,
        format: &StatFormat,
        open: bool,
    ) -> RenderedPanel {
        let children: Vec<RenderedPanel> = self
            .subfacets
            .iter()
            .map(|panel| panel.render(snapshot, format))
            .collect();

        RenderedPanel {
            field: self.field.clone(),
            title: self.title.clone(),
            open,
            fetching: children.iter().any(|c| c.fetching),
            header_values: children
                .iter()
                .flat_map(|c| c.header_values.iter().cloned())
                .collect(),
            entries: None,
            footer: None,
            children: if open { children } else { Vec::new() },
        }
    }

    pub fn handle_click(&self, query: &Query, value: &str, mode: ToggleMode) -> FacetEvent {
        self.changed(&self.field, toggle_value(query.field(&self.field), value, mode))
    }

    /// A value picked from the "show more" footer.
    pub fn handle_select(&self, query: &Query, value: &str) -> FacetEvent {
        self.changed(&self.field, add_value(query.field(&self.field), value))
    }

    /// Click on a date bucket: the range runs from `value` to the next
    /// bucket, or is open-ended on the last one. Clicking the bucket the
    /// current range starts at clears the panel.
    pub fn handle_range_click(
        &self,
        range: &DateRange,
        snapshot: &FacetSnapshot,
        value: &str,
    ) -> Vec<FacetEvent> {
        if self.is_active(&snapshot.query, value) {
            return self.handle_clear(&snapshot.query);
        }

        let mut buckets: Vec<&FilterValue> = snapshot
            .frequencies(&self.field)
            .map(|f| f.keys().collect())
            .unwrap_or_default();
        buckets.sort();
        let next = buckets
            .iter()
            .position(|k| k.as_str() == value)
            .and_then(|i| buckets.get(i + 1));

        let mut events = vec![
            self.changed(&range.after_field, SelectedSet::from(vec![value.to_string()])),
            self.changed(
                &range.before_field,
                next.map(|k| SelectedSet::from(vec![k.to_string()])).unwrap_or_default(),
            ),
        ];
        for field in std::iter::once(&self.field).chain(&self.extra_fields) {
            if field == &self.field || !snapshot.selected(field).is_empty() {
                events.push(self.changed(field, clear()));
            }
        }
        events
    }

    /// Clear the panel's own field, plus any other owned field that is set.
    pub fn handle_clear(&self, query: &Query) -> Vec<FacetEvent> {
        self.query_fields()
            .into_iter()
            .filter(|field| *field == self.field || !query.field(field).is_empty())
            .map(|field| self.changed(field, clear()))
            .collect()
    }

    pub fn handle_header_click(&self) -> FacetEvent {
        FacetEvent::Toggled {
            field: self.field.clone(),
        }
    }

    fn changed(&self, field: &str, values: SelectedSet) -> FacetEvent {
        FacetEvent::Changed {
            field: field.to_string(),
            values,
        }
    }
}
