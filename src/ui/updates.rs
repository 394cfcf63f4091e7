use anyhow::Result;
use colored::Colorize;
use facet_core::{FacetEvent, Query, RenderedPanel, RenderedSidebar};

use super::formatting::{
    format_entry, format_event, format_footer, format_header, hint_text, label_width,
};
use crate::state::{AppState, UiState};

/// Print the whole sidebar for the current state
pub fn print_sidebar(app_state: &AppState, ui_state: &UiState, rendered: &RenderedSidebar) {
    println!("{}", app_state.get_title().bold());
    if let Some(config) = &app_state.config_file {
        println!("{}", format!("layout: {}", config.display()).dimmed());
    }
    println!();

    for panel in &rendered.panels {
        print_panel(panel, ui_state, "");
    }
}

fn print_panel(panel: &RenderedPanel, ui_state: &UiState, indent: &str) {
    let header = format!("{}{}", indent, format_header(panel));
    if panel.header_values.is_empty() {
        println!("{}", header);
    } else {
        println!("{}", header.bold());
    }

    if let Some(entries) = &panel.entries {
        let width = label_width(entries);
        for entry in entries {
            let row = format!("{}{}", indent, format_entry(entry, width));
            let row = if entry.active {
                row.cyan().bold().to_string()
            } else if entry.disabled || entry.stat.is_none() {
                row.dimmed().to_string()
            } else {
                row
            };

            if entry.tooltip {
                println!("{}  {}", row, hint_text(ui_state.platform).yellow());
            } else {
                println!("{}", row);
            }
        }
    }

    if let Some(footer) = &panel.footer {
        println!("{}{}", indent, format_footer(&panel.field, footer).dimmed());
    }

    let nested = format!("{}  ", indent);
    for child in &panel.children {
        print_panel(child, ui_state, &nested);
    }
}

pub fn print_events(events: &[FacetEvent]) {
    if events.is_empty() {
        return;
    }
    println!("\n{}", "Events".bold());
    for event in events {
        println!("- {}", format_event(event));
    }
}

pub fn print_query(app_state: &AppState) {
    let encoded = app_state.snapshot.query.to_query_string();
    let shown = if encoded.is_empty() {
        "(no filters)".dimmed().to_string()
    } else {
        encoded
    };
    println!("\n{} {}", "Query:".bold(), shown);

    if app_state.needs_refetch {
        println!("{}", "Facet counts are stale until the data source is queried again.".yellow());
    }
}

pub fn print_json(rendered: &RenderedSidebar, events: &[FacetEvent], query: &Query) -> Result<()> {
    let output = serde_json::json!({
        "sidebar": rendered,
        "events": events,
        "query": query,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
