use anyhow::Result;
use facet_core::{
    load_config, load_snapshot, save_snapshot, validate_snapshot, FacetError, FacetEvent,
    FacetSnapshot, Query, Sidebar, SidebarAction,
};
use std::path::{Path, PathBuf};

/// Application state management - Domain state only
/// The sidebar layout plus the caller-held snapshot it renders
#[derive(Debug)]
pub struct AppState {
    /// Panel layout (default issues layout unless a config was given)
    pub sidebar: Sidebar,
    /// Frequencies, labels, query and panel flags
    pub snapshot: FacetSnapshot,
    /// Path the snapshot was loaded from
    pub snapshot_file: Option<PathBuf>,
    /// Path of the sidebar config, if any
    pub config_file: Option<PathBuf>,
    /// Whether the query or panel flags changed since loading
    pub dirty: bool,
    /// Whether a filter change left the counts out of date
    pub needs_refetch: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            sidebar: Sidebar::issues_default(),
            snapshot: FacetSnapshot::default(),
            snapshot_file: None,
            config_file: None,
            dirty: false,
            needs_refetch: false,
        }
    }

    /// Load the sidebar layout from a TOML file
    pub fn load_config(&mut self, path: PathBuf) -> Result<()> {
        let config = load_config(&path)?;
        self.sidebar = Sidebar::from_config(&config);
        self.config_file = Some(path);
        Ok(())
    }

    /// Load a snapshot and check it against the current layout
    pub fn load_from_file(&mut self, path: PathBuf) -> Result<()> {
        let snapshot = load_snapshot(&path)?;

        validate_snapshot(&snapshot, &self.sidebar)
            .map_err(|errors| FacetError::Validation { errors })?;

        self.snapshot = snapshot;
        self.snapshot_file = Some(path);
        self.dirty = false;
        self.needs_refetch = false;

        Ok(())
    }

    /// Save the snapshot to a new file
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        save_snapshot(&self.snapshot, path)?;
        self.snapshot_file = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Replace the selection of every field named in `query`
    pub fn override_query(&mut self, query: &Query) {
        for (field, selected) in query.fields() {
            self.snapshot.query.set(field, selected.clone());
        }
        if !query.is_empty() {
            self.mark_dirty();
        }
    }

    /// Expand every panel of the layout
    pub fn open_all(&mut self) {
        for panel in self.sidebar.all_panels() {
            self.snapshot.open_facets.insert(panel.field.clone(), true);
        }
    }

    /// Run one user action through the sidebar
    pub fn apply(&mut self, action: &SidebarAction) -> Result<Vec<FacetEvent>> {
        let events = self.sidebar.apply(&mut self.snapshot, action)?;
        if events.iter().any(|e| matches!(e, FacetEvent::Changed { .. })) {
            self.needs_refetch = true;
        }
        self.mark_dirty();
        Ok(events)
    }

    /// Mark state as modified
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Get a title with file name and dirty indicator
    pub fn get_title(&self) -> String {
        let file_name = self
            .snapshot_file
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled");

        let dirty_marker = if self.dirty { "*" } else { "" };

        format!("Issues - {}{}", file_name, dirty_marker)
    }
}
