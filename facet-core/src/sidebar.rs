use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

use crate::config::SidebarConfig;
use crate::error::{FacetError, Result};
use crate::models::{ComponentContext, FacetSnapshot, ToggleMode};
use crate::panel::{FacetEvent, FacetPanel, RenderedPanel};
use crate::stats::StatFormat;

/// A user interaction with the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarAction {
    /// Click on an entry, with or without the multi-select modifier.
    Click {
        field: String,
        value: String,
        mode: ToggleMode,
    },
    /// Pick a value from the "show more" footer.
    Add { field: String, value: String },
    Clear { field: String },
    /// Click on a panel header.
    TogglePanel { field: String },
}

impl SidebarAction {
    pub fn field(&self) -> &str {
        match self {
            Self::Click { field, .. }
            | Self::Add { field, .. }
            | Self::Clear { field }
            | Self::TogglePanel { field } => field,
        }
    }
}

impl FromStr for SidebarAction {
    type Err = FacetError;

    /// `click:field=value`, `multi:field=value`, `add:field=value`,
    /// `clear:field` or `toggle:field`.
    fn from_str(input: &str) -> Result<Self> {
        let invalid = |reason: &str| FacetError::InvalidAction {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (verb, rest) = input
            .split_once(':')
            .ok_or_else(|| invalid("expected VERB:ARGS"))?;

        let field_value = || -> Result<(String, String)> {
            let (field, value) = rest
                .split_once('=')
                .ok_or_else(|| invalid("expected field=value"))?;
            let (field, value) = (field.trim(), value.trim());
            if field.is_empty() || value.is_empty() {
                return Err(invalid("field and value must not be empty"));
            }
            Ok((field.to_string(), value.to_string()))
        };
        let field_only = || -> Result<String> {
            let field = rest.trim();
            if field.is_empty() {
                return Err(invalid("field must not be empty"));
            }
            Ok(field.to_string())
        };

        match verb.trim() {
            "click" | "multi" => {
                let (field, value) = field_value()?;
                Ok(Self::Click {
                    field,
                    value,
                    mode: ToggleMode::from_modifier(verb.trim() == "multi"),
                })
            }
            "add" => {
                let (field, value) = field_value()?;
                Ok(Self::Add { field, value })
            }
            "clear" => Ok(Self::Clear {
                field: field_only()?,
            }),
            "toggle" => Ok(Self::TogglePanel {
                field: field_only()?,
            }),
            _ => Err(invalid("unknown verb, expected click, multi, add, clear or toggle")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSidebar {
    pub panels: Vec<RenderedPanel>,
}

/// The ordered set of facet panels for the issues page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    panels: Vec<FacetPanel>,
    stats: StatFormat,
}

impl Sidebar {
    pub fn new(panels: Vec<FacetPanel>) -> Self {
        Self {
            panels,
            stats: StatFormat::default(),
        }
    }

    pub fn from_config(config: &SidebarConfig) -> Self {
        Self {
            panels: config.facets.clone(),
            stats: config.stats.clone(),
        }
    }

    /// The stock issues layout.
    pub fn issues_default() -> Self {
        Self::from_config(&SidebarConfig::default())
    }

    pub fn panels(&self) -> &[FacetPanel] {
        &self.panels
    }

    /// Every panel, sub-facets right after their group.
    pub fn all_panels(&self) -> Vec<&FacetPanel> {
        fn walk<'a>(panels: &'a [FacetPanel], out: &mut Vec<&'a FacetPanel>) {
            for panel in panels {
                out.push(panel);
                walk(&panel.subfacets, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.panels, &mut out);
        out
    }

    /// The panel (or sub-facet) keyed by `field`.
    pub fn panel(&self, field: &str) -> Option<&FacetPanel> {
        self.all_panels().into_iter().find(|p| p.field == field)
    }

    /// The panel that edits query field `field`.
    pub fn owner_of(&self, field: &str) -> Option<&FacetPanel> {
        self.all_panels()
            .into_iter()
            .filter(|p| !p.is_group())
            .find(|p| p.query_fields().contains(&field))
    }

    pub fn visible_panels<'a>(
        &'a self,
        component: Option<&'a ComponentContext>,
    ) -> impl Iterator<Item = &'a FacetPanel> + 'a {
        self.panels.iter().filter(move |p| p.is_visible(component))
    }

    pub fn render(&self, snapshot: &FacetSnapshot) -> RenderedSidebar {
        RenderedSidebar {
            panels: self
                .visible_panels(snapshot.component.as_ref())
                .map(|panel| panel.render(snapshot, &self.stats))
                .collect(),
        }
    }

    /// Dispatch `action` to its panel and fold the outcome into `snapshot`.
    ///
    /// A filter change marks every panel as fetching, since all counts depend
    /// on the whole query; the caller refetches and clears the flags. Clicks
    /// on disabled entries produce no events.
    pub fn apply(&self, snapshot: &mut FacetSnapshot, action: &SidebarAction) -> Result<Vec<FacetEvent>> {
        let panel = self
            .panel(action.field())
            .ok_or_else(|| FacetError::UnknownFacet {
                field: action.field().to_string(),
            })?;

        let events = match action {
            SidebarAction::TogglePanel { .. } => vec![panel.handle_header_click()],
            SidebarAction::Clear { .. } => panel.handle_clear(&snapshot.query),
            SidebarAction::Click { .. } | SidebarAction::Add { .. } if panel.is_group() => {
                return Err(FacetError::InvalidAction {
                    input: action.field().to_string(),
                    reason: "a facet group has no values of its own, pick one of its sub-facets"
                        .to_string(),
                });
            }
            SidebarAction::Click { value, .. } if panel.is_disabled(snapshot, value) => {
                debug!(field = %panel.field, value = %value, "click on disabled entry ignored");
                Vec::new()
            }
            SidebarAction::Click { value, mode, .. } => match &panel.date_range {
                Some(range) => panel.handle_range_click(range, snapshot, value),
                None => vec![panel.handle_click(&snapshot.query, value, *mode)],
            },
            SidebarAction::Add { value, .. } => match &panel.date_range {
                Some(range) => panel.handle_range_click(range, snapshot, value),
                None => vec![panel.handle_select(&snapshot.query, value)],
            },
        };

        let mut changed = false;
        for event in &events {
            match event {
                FacetEvent::Changed { field, values } => {
                    debug!(field = %field, values = ?values.as_slice(), "facet selection changed");
                    snapshot.query.apply(event);
                    changed = true;
                }
                FacetEvent::Toggled { field } => {
                    let open = !snapshot.is_open(field);
                    debug!(field = %field, open, "facet panel toggled");
                    snapshot.open_facets.insert(field.clone(), open);
                }
            }
        }
        if changed {
            for p in self.all_panels().into_iter().filter(|p| !p.is_group()) {
                snapshot.loading_facets.insert(p.field.clone(), true);
            }
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SelectedSet;
    use serde_json::json;

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            "click:languages=java".parse::<SidebarAction>().unwrap(),
            SidebarAction::Click {
                field: "languages".to_string(),
                value: "java".to_string(),
                mode: ToggleMode::Single,
            }
        );
        assert_eq!(
            "multi:languages=py".parse::<SidebarAction>().unwrap(),
            SidebarAction::Click {
                field: "languages".to_string(),
                value: "py".to_string(),
                mode: ToggleMode::Multiple,
            }
        );
        assert_eq!(
            "add:tags=security".parse::<SidebarAction>().unwrap(),
            SidebarAction::Add {
                field: "tags".to_string(),
                value: "security".to_string(),
            }
        );
        assert_eq!(
            "clear:tags".parse::<SidebarAction>().unwrap(),
            SidebarAction::Clear {
                field: "tags".to_string()
            }
        );
        assert_eq!(
            "toggle:tags".parse::<SidebarAction>().unwrap(),
            SidebarAction::TogglePanel {
                field: "tags".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_malformed_actions() {
        for input in ["languages=java", "click:languages", "click:=java", "clear:", "drag:tags"] {
            let err = input.parse::<SidebarAction>().unwrap_err();
            assert_eq!(err.kind(), "invalid-action", "{input}");
        }
    }

    #[test]
    fn test_default_layout_visibility() {
        let sidebar = Sidebar::issues_default();
        let fields = |component: Option<&ComponentContext>| -> Vec<String> {
            sidebar
                .visible_panels(component)
                .map(|p| p.field.clone())
                .collect()
        };

        let global = fields(None);
        assert!(global.contains(&"projects".to_string()));
        assert!(global.contains(&"authors".to_string()));
        assert!(!global.contains(&"modules".to_string()));
        assert!(!global.contains(&"files".to_string()));

        let project = ComponentContext {
            key: "p".to_string(),
            qualifier: "TRK".to_string(),
            organization: None,
        };
        let in_project = fields(Some(&project));
        assert!(!in_project.contains(&"projects".to_string()));
        assert!(in_project.contains(&"modules".to_string()));
        assert!(in_project.contains(&"directories".to_string()));
        assert!(in_project.contains(&"files".to_string()));

        let directory = ComponentContext {
            qualifier: "DIR".to_string(),
            ..project.clone()
        };
        let in_directory = fields(Some(&directory));
        assert!(!in_directory.contains(&"modules".to_string()));
        assert!(!in_directory.contains(&"directories".to_string()));
        assert!(in_directory.contains(&"files".to_string()));

        let developer = ComponentContext {
            qualifier: "DEV".to_string(),
            ..project
        };
        assert!(!fields(Some(&developer)).contains(&"authors".to_string()));
    }

    #[test]
    fn test_apply_click_updates_query_and_marks_fetching() {
        let sidebar = Sidebar::issues_default();
        let mut snapshot: FacetSnapshot = serde_json::from_value(json!({
            "facets": { "languages": { "java": 5, "py": 3 } },
            "query": { "languages": ["java"] }
        }))
        .unwrap();

        let action: SidebarAction = "multi:languages=py".parse().unwrap();
        let events = sidebar.apply(&mut snapshot, &action).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(snapshot.selected("languages"), &SelectedSet::from(["java", "py"]));
        assert!(snapshot.is_fetching("languages"));
        assert!(snapshot.is_fetching("types"));
    }

    #[test]
    fn test_apply_toggle_flips_open_flag() {
        let sidebar = Sidebar::issues_default();
        let mut snapshot = FacetSnapshot::default();
        let toggle = SidebarAction::TogglePanel {
            field: "types".to_string(),
        };

        sidebar.apply(&mut snapshot, &toggle).unwrap();
        assert!(snapshot.is_open("types"));
        sidebar.apply(&mut snapshot, &toggle).unwrap();
        assert!(!snapshot.is_open("types"));
        assert!(snapshot.loading_facets.is_empty());
    }

    #[test]
    fn test_apply_unknown_field() {
        let sidebar = Sidebar::issues_default();
        let mut snapshot = FacetSnapshot::default();
        let action = SidebarAction::Clear {
            field: "colors".to_string(),
        };
        let err = sidebar.apply(&mut snapshot, &action).unwrap_err();
        assert_eq!(err.kind(), "unknown-facet");
    }

    #[test]
    fn test_render_skips_hidden_panels() {
        let sidebar = Sidebar::issues_default();
        let rendered = sidebar.render(&FacetSnapshot::default());
        assert!(rendered.panels.iter().all(|p| p.field != "files"));
        assert_eq!(rendered.panels[4].field, "createdAt");
        assert_eq!(rendered.panels[0].field, "types");
    }

    #[test]
    fn test_query_fields_resolve_to_owning_panel() {
        let sidebar = Sidebar::issues_default();
        assert_eq!(sidebar.owner_of("createdAfter").unwrap().field, "createdAt");
        assert_eq!(sidebar.owner_of("sinceLeakPeriod").unwrap().field, "createdAt");
        assert_eq!(sidebar.owner_of("resolved").unwrap().field, "resolutions");
        assert_eq!(sidebar.owner_of("cwe").unwrap().field, "cwe");
        assert!(sidebar.owner_of("standards").is_none());
        assert!(sidebar.owner_of("colors").is_none());
        assert!(sidebar.panel("sansTop25").is_some());
    }

    #[test]
    fn test_apply_date_click_sets_range() {
        let sidebar = Sidebar::issues_default();
        let mut snapshot: FacetSnapshot = serde_json::from_value(json!({
            "facets": { "createdAt": { "2018-01-01": 3, "2018-02-01": 5 } },
            "query": { "sinceLeakPeriod": ["true"] }
        }))
        .unwrap();

        let action: SidebarAction = "click:createdAt=2018-01-01".parse().unwrap();
        let events = sidebar.apply(&mut snapshot, &action).unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(snapshot.selected("createdAfter"), &SelectedSet::from(["2018-01-01"]));
        assert_eq!(snapshot.selected("createdBefore"), &SelectedSet::from(["2018-02-01"]));
        assert!(snapshot.selected("sinceLeakPeriod").is_empty());
        assert!(snapshot.is_fetching("createdAt"));
        assert!(snapshot.is_fetching("cwe"));
        assert!(!snapshot.is_fetching("standards"));
    }

    #[test]
    fn test_apply_on_standards() {
        let sidebar = Sidebar::issues_default();
        let mut snapshot = FacetSnapshot::default();

        let click: SidebarAction = "click:cwe=79".parse().unwrap();
        sidebar.apply(&mut snapshot, &click).unwrap();
        assert_eq!(snapshot.selected("cwe"), &SelectedSet::from(["79"]));

        let toggle: SidebarAction = "toggle:standards".parse().unwrap();
        sidebar.apply(&mut snapshot, &toggle).unwrap();
        assert!(snapshot.is_open("standards"));

        let clear: SidebarAction = "clear:standards".parse().unwrap();
        sidebar.apply(&mut snapshot, &clear).unwrap();
        assert!(snapshot.query.is_empty());

        let on_group: SidebarAction = "click:standards=79".parse().unwrap();
        let err = sidebar.apply(&mut snapshot, &on_group).unwrap_err();
        assert_eq!(err.kind(), "invalid-action");
    }

    #[test]
    fn test_click_on_disabled_entry_is_ignored() {
        let sidebar = Sidebar::issues_default();
        let mut snapshot: FacetSnapshot = serde_json::from_value(json!({
            "facets": { "types": { "BUG": 4, "VULNERABILITY": 0 } }
        }))
        .unwrap();

        let action: SidebarAction = "click:types=VULNERABILITY".parse().unwrap();
        let events = sidebar.apply(&mut snapshot, &action).unwrap();
        assert!(events.is_empty());
        assert!(snapshot.query.is_empty());
        assert!(snapshot.loading_facets.is_empty());
    }
}
