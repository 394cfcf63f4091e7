use anyhow::Result;
use facet_core::SidebarAction;
use tracing::info;

use crate::state::{AppState, UiState};
use crate::ui::{set_status, StatusLevel};

/// Handle a click on a panel header
pub fn handle_panel_toggle(
    app_state: &mut AppState,
    ui_state: &mut UiState,
    action: &SidebarAction,
) -> Result<()> {
    let events = app_state.apply(action)?;
    let field = action.field();
    let state = if app_state.snapshot.is_open(field) {
        "expanded"
    } else {
        "collapsed"
    };

    info!(field, state, "panel toggled");
    ui_state.record(events);
    set_status(format!("Panel {} {}", field, state), StatusLevel::Info);

    Ok(())
}

/// Expand every panel before rendering
pub fn handle_open_all(app_state: &mut AppState) {
    app_state.open_all();
}
