use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{FacetError, Result};
use crate::panel::{FacetPanel, FacetVisibility};
use crate::ranking::OrderingPolicy;
use crate::stats::StatFormat;

pub const SEVERITIES: [&str; 5] = ["BLOCKER", "CRITICAL", "MAJOR", "MINOR", "INFO"];
pub const ISSUE_TYPES: [&str; 3] = ["BUG", "VULNERABILITY", "CODE_SMELL"];
pub const RESOLUTIONS: [&str; 4] = ["FIXED", "FALSE-POSITIVE", "WONTFIX", "REMOVED"];
pub const STATUSES: [&str; 5] = ["OPEN", "CONFIRMED", "REOPENED", "RESOLVED", "CLOSED"];
pub const OWASP_TOP10: [&str; 11] = [
    "a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8", "a9", "a10", "unknown",
];
pub const SANS_TOP25: [&str; 3] = ["insecure-interaction", "risky-resource", "porous-defenses"];

/// Sidebar layout, normally read from a TOML file.
///
/// ```toml
/// [stats]
/// decimal_separator = ","
///
/// [[facets]]
/// field = "languages"
/// title = "Language"
/// label_source = { kind = "referenced", table = "languages" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarConfig {
    #[serde(default)]
    pub stats: StatFormat,
    #[serde(default)]
    pub facets: Vec<FacetPanel>,
}

fn fixed(values: &[&str]) -> OrderingPolicy {
    OrderingPolicy::Fixed(values.iter().map(|v| v.to_string()).collect())
}

fn hidden_for(qualifiers: &[&str], requires_component: bool) -> FacetVisibility {
    FacetVisibility {
        requires_component,
        hidden_for_qualifiers: qualifiers.iter().map(|q| q.to_string()).collect(),
    }
}

impl Default for SidebarConfig {
    fn default() -> Self {
        let facets = vec![
            FacetPanel::new("types", "Type")
                .with_ordering(fixed(&ISSUE_TYPES))
                .with_disable_empty(),
            FacetPanel::new("severities", "Severity")
                .with_ordering(fixed(&SEVERITIES))
                .with_half_width()
                .with_disable_empty(),
            FacetPanel::new("resolutions", "Resolution")
                .with_ordering(fixed(&RESOLUTIONS))
                .with_half_width()
                .with_disable_empty()
                .with_extra_fields(&["resolved"]),
            FacetPanel::new("statuses", "Status")
                .with_ordering(fixed(&STATUSES))
                .with_half_width()
                .with_disable_empty(),
            FacetPanel::new("createdAt", "Creation Date")
                .with_date_range("createdAfter", "createdBefore")
                .with_extra_fields(&["createdInLast", "sinceLeakPeriod"]),
            FacetPanel::new("languages", "Language").with_labels("languages"),
            FacetPanel::new("rules", "Rule").with_labels("rules"),
            FacetPanel::group(
                "standards",
                "Standard",
                vec![
                    FacetPanel::new("owaspTop10", "OWASP Top 10")
                        .with_ordering(fixed(&OWASP_TOP10)),
                    FacetPanel::new("sansTop25", "SANS Top 25").with_ordering(fixed(&SANS_TOP25)),
                    FacetPanel::new("cwe", "CWE"),
                ],
            ),
            FacetPanel::new("tags", "Tag").with_ordering(OrderingPolicy::Alphabetical),
            FacetPanel::new("projects", "Project")
                .with_labels("components")
                .with_visibility(hidden_for(&["TRK", "BRC", "DIR", "DEV_PRJ"], false)),
            FacetPanel::new("modules", "Module")
                .with_labels("components")
                .with_visibility(hidden_for(&["DIR"], true)),
            FacetPanel::new("directories", "Directory")
                .with_labels("components")
                .with_visibility(hidden_for(&["DIR"], true)),
            FacetPanel::new("files", "File")
                .with_labels("components")
                .with_visibility(hidden_for(&[], true)),
            FacetPanel::new("assignees", "Assignee")
                .with_labels("users")
                .with_extra_fields(&["assigned"]),
            FacetPanel::new("authors", "Author")
                .with_ordering(OrderingPolicy::Alphabetical)
                .with_visibility(hidden_for(&["DEV"], false)),
        ];

        Self {
            stats: StatFormat::default(),
            facets,
        }
    }
}

impl SidebarConfig {
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| FacetError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load a sidebar layout from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SidebarConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| FacetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SidebarConfig::from_toml_str(&contents, path)
}
