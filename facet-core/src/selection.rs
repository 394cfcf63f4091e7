//! Selection rules for a multi-valued facet field.
//!
//! Every function takes the current selection by reference and returns the
//! next one; nothing here holds state between calls.

use tracing::debug;

use crate::models::{FilterValue, SelectedSet, ToggleMode};

/// Apply a click on `clicked` to the current selection.
///
/// A modifier click adds or removes the value and leaves the result sorted
/// by `str` ordering, i.e. by UTF-8 bytes (Unicode code point order).
/// A plain click collapses the selection to the clicked value, except that
/// clicking the only selected value clears the field.
pub fn toggle_value(selected: &SelectedSet, clicked: &str, mode: ToggleMode) -> SelectedSet {
    let next = match mode {
        ToggleMode::Multiple => {
            let mut values: Vec<FilterValue> = if selected.contains(clicked) {
                selected.iter().filter(|v| *v != clicked).cloned().collect()
            } else {
                selected.iter().cloned().chain([clicked.to_string()]).collect()
            };
            values.sort();
            SelectedSet::from(values)
        }
        ToggleMode::Single => {
            // len() < 2 together with contains() can only mean len() == 1
            if selected.contains(clicked) && selected.len() < 2 {
                SelectedSet::new()
            } else {
                SelectedSet::from(vec![clicked.to_string()])
            }
        }
    };

    debug!(clicked, ?mode, before = selected.len(), after = next.len(), "toggled facet value");
    next
}

/// Add a value picked outside the ranked list, keeping the set duplicate-free.
pub fn add_value(selected: &SelectedSet, new_value: &str) -> SelectedSet {
    if selected.contains(new_value) {
        return selected.clone();
    }

    selected
        .iter()
        .cloned()
        .chain([new_value.to_string()])
        .collect()
}

/// The selection after an explicit "clear" on the facet.
pub fn clear() -> SelectedSet {
    SelectedSet::new()
}

/// Whether the "modifier-click to multi-select" hint applies to `entry`.
///
/// Only shown on unselected entries while exactly one other value is active.
pub fn shows_multiselect_hint(selected: &SelectedSet, entry: &str) -> bool {
    selected.len() == 1 && !selected.contains(entry)
}
