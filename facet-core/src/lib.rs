// Public modules
pub mod config;
pub mod error;
pub mod io;
pub mod labels;
pub mod models;
pub mod panel;
pub mod query;
pub mod ranking;
pub mod selection;
pub mod sidebar;
pub mod sorting;
pub mod stats;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::{load_config, SidebarConfig};
pub use error::{FacetError, Result};
pub use io::{load_snapshot, save_snapshot};
pub use labels::{resolve_label, LabelSource};
pub use models::{
    ComponentContext, FacetSnapshot, FilterValue, FrequencyMap, LabelLookup, ReferencedLabel,
    SelectedSet, ToggleMode,
};
pub use panel::{
    DateRange, FacetEntry, FacetEvent, FacetFooter, FacetPanel, FacetVisibility, RenderedPanel,
};
pub use query::{parse_facet_filters, Query};
pub use ranking::{order_entries, rank_entries, OrderingPolicy};
pub use selection::{add_value, clear, shows_multiselect_hint, toggle_value};
pub use sidebar::{RenderedSidebar, Sidebar, SidebarAction};
pub use sorting::{compare_labels, normalize_for_sorting, strip_leading_articles};
pub use stats::{format_short_int, format_stat, format_stat_with, StatFormat};
pub use validation::validate_snapshot;
