use anyhow::Result;
use facet_core::{Query, SidebarAction, ToggleMode};
use tracing::info;

use crate::state::{AppState, UiState};
use crate::ui::{set_status, StatusLevel};

/// Handle an action that edits a filter: click, modifier click, add or clear
pub fn handle_filter_action(
    app_state: &mut AppState,
    ui_state: &mut UiState,
    action: &SidebarAction,
) -> Result<()> {
    let events = app_state.apply(action)?;

    let message = match action {
        SidebarAction::Click {
            field,
            value,
            mode: ToggleMode::Multiple,
        } => format!("Toggled {} in {}", value, field),
        SidebarAction::Click { field, value, .. } => format!("Clicked {} in {}", value, field),
        SidebarAction::Add { field, value } => format!("Added {} to {}", value, field),
        SidebarAction::Clear { field } => format!("Cleared {}", field),
        SidebarAction::TogglePanel { field } => format!("Toggled panel {}", field),
    };
    info!(field = action.field(), "{}", message);

    ui_state.record(events);
    set_status(
        format!(
            "{}: {}",
            message,
            describe_selection(&app_state.snapshot.query, action.field())
        ),
        StatusLevel::Info,
    );

    Ok(())
}

/// Apply `--facet` / `--query` selections given on the command line
pub fn handle_initial_filters(app_state: &mut AppState, query: &Query) {
    if query.is_empty() {
        return;
    }
    for (field, _) in query.fields() {
        if app_state.sidebar.owner_of(field).is_none() {
            set_status(
                format!("Warning: no facet panel for '{}'; it will not be shown", field),
                StatusLevel::Warning,
            );
        }
    }
    app_state.override_query(query);
    set_status(
        format!("Initial filters: {}", query.to_query_string()),
        StatusLevel::Info,
    );
}

fn describe_selection(query: &Query, field: &str) -> String {
    let selected = query.field(field);
    if selected.is_empty() {
        "no filter".to_string()
    } else {
        selected.as_slice().join(" OR ")
    }
}
