pub mod filter_handlers;
pub mod ui_handlers;

pub use filter_handlers::{handle_filter_action, handle_initial_filters};
pub use ui_handlers::{handle_open_all, handle_panel_toggle};

use anyhow::Result;
use facet_core::SidebarAction;

use crate::state::{AppState, UiState};

/// Route one action to its handler
pub fn dispatch_action(
    app_state: &mut AppState,
    ui_state: &mut UiState,
    action: &SidebarAction,
) -> Result<()> {
    match action {
        SidebarAction::TogglePanel { .. } => handle_panel_toggle(app_state, ui_state, action),
        _ => handle_filter_action(app_state, ui_state, action),
    }
}
