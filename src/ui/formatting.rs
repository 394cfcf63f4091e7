use facet_core::{FacetEntry, FacetEvent, FacetFooter, RenderedPanel};

use crate::state::Platform;

/// Hint shown next to entries that could join a multi-selection
pub fn hint_text(platform: Platform) -> &'static str {
    match platform {
        Platform::Mac => "⌘ + click to add to selection",
        Platform::Other => "Ctrl + click to add to selection",
    }
}

/// Panel header: open marker, title, selected labels, spinner
pub fn format_header(panel: &RenderedPanel) -> String {
    let marker = if panel.open { "▾" } else { "▸" };
    let mut header = format!("{} {}", marker, panel.title);

    if !panel.header_values.is_empty() {
        header.push_str(": ");
        header.push_str(&panel.header_values.join(", "));
    }
    if panel.fetching {
        header.push_str(" …");
    }

    header
}

/// Width of the label column, so stats line up
pub fn label_width(entries: &[FacetEntry]) -> usize {
    entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0)
}

/// One entry row, without the hint
pub fn format_entry(entry: &FacetEntry, width: usize) -> String {
    let checkbox = if entry.active {
        "[x]"
    } else if entry.disabled {
        "[-]"
    } else {
        "[ ]"
    };
    let stat = entry.stat.as_deref().unwrap_or("");
    let indent = if entry.half_width { "    " } else { "  " };

    format!("{}{} {:<width$}  {:>6}", indent, checkbox, entry.label, stat, width = width)
        .trim_end()
        .to_string()
}

pub fn format_footer(field: &str, footer: &FacetFooter) -> String {
    format!(
        "  + add:{}=VALUE to pick a value not among these {}",
        field,
        footer.excluded.len()
    )
}

pub fn format_event(event: &FacetEvent) -> String {
    match event {
        FacetEvent::Changed { field, values } if values.is_empty() => {
            format!("changed {} -> (cleared)", field)
        }
        FacetEvent::Changed { field, values } => {
            format!("changed {} -> [{}]", field, values.as_slice().join(", "))
        }
        FacetEvent::Toggled { field } => format!("toggled {}", field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_core::SelectedSet;

    fn entry(label: &str, stat: Option<&str>, active: bool) -> FacetEntry {
        FacetEntry {
            value: label.to_lowercase(),
            label: label.to_string(),
            stat: stat.map(str::to_string),
            active,
            tooltip: false,
            half_width: false,
            disabled: false,
        }
    }

    fn panel(open: bool, fetching: bool, values: &[&str]) -> RenderedPanel {
        RenderedPanel {
            field: "languages".to_string(),
            title: "Language".to_string(),
            open,
            fetching,
            header_values: values.iter().map(|v| v.to_string()).collect(),
            entries: None,
            footer: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_format_header() {
        assert_eq!(format_header(&panel(false, false, &[])), "▸ Language");
        assert_eq!(
            format_header(&panel(true, true, &["Java", "Python"])),
            "▾ Language: Java, Python …"
        );
    }

    #[test]
    fn test_format_entry_aligns_stats() {
        let entries = vec![entry("Java", Some("1.2k"), true), entry("Go", Some("7"), false)];
        let width = label_width(&entries);
        assert_eq!(width, 4);
        assert_eq!(format_entry(&entries[0], width), "  [x] Java    1.2k");
        assert_eq!(format_entry(&entries[1], width), "  [ ] Go         7");
    }

    #[test]
    fn test_format_entry_without_stat() {
        assert_eq!(format_entry(&entry("Java", None, false), 4), "  [ ] Java");
    }

    #[test]
    fn test_format_disabled_entry() {
        let disabled = FacetEntry {
            disabled: true,
            ..entry("Bug", Some("0"), false)
        };
        assert_eq!(format_entry(&disabled, 3), "  [-] Bug       0");
    }

    #[test]
    fn test_format_event() {
        let changed = FacetEvent::Changed {
            field: "languages".to_string(),
            values: SelectedSet::from(["java", "py"]),
        };
        assert_eq!(format_event(&changed), "changed languages -> [java, py]");

        let cleared = FacetEvent::Changed {
            field: "languages".to_string(),
            values: SelectedSet::new(),
        };
        assert_eq!(format_event(&cleared), "changed languages -> (cleared)");
    }

    #[test]
    fn test_hint_text_names_modifier() {
        assert!(hint_text(Platform::Mac).starts_with('⌘'));
        assert!(hint_text(Platform::Other).starts_with("Ctrl"));
    }
}
