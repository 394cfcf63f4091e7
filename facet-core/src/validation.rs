use std::collections::HashSet;
use tracing::warn;

use crate::models::FacetSnapshot;
use crate::sidebar::Sidebar;

/// Check a loaded snapshot against the sidebar layout.
/// Returns Ok(()) if valid, or Err(Vec<String>) with every problem found
///
/// Selection functions assume duplicate-free sets and never repair them, so
/// this is where such input gets caught.
pub fn validate_snapshot(snapshot: &FacetSnapshot, sidebar: &Sidebar) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (field, selected) in snapshot.query.fields() {
        if field.trim().is_empty() {
            errors.push("Query contains an empty field name".to_string());
        }

        if sidebar.owner_of(field).is_none() {
            errors.push(format!("Query field '{}' has no facet panel", field));
        }

        let mut seen = HashSet::new();
        for value in selected {
            if !seen.insert(value) {
                errors.push(format!("Field '{}' has duplicate value: '{}'", field, value));
            }
        }
    }

    for panel in sidebar.all_panels() {
        if panel.field.trim().is_empty() {
            errors.push(format!("Facet '{}' has an empty field name", panel.title));
        }

        // Labels fall back to raw keys.
        if let Some(table) = panel.label_source.table() {
            let used = snapshot.frequencies(&panel.field).is_some()
                || !snapshot.selected(&panel.field).is_empty();
            if used && snapshot.labels(table).is_none() {
                warn!(
                    field = %panel.field,
                    table = %table,
                    "label table missing, showing raw keys"
                );
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        for error in &errors {
            warn!(%error, "invalid snapshot");
        }
        Err(errors)
    }
}
