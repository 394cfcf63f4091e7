use facet_core::FacetError;
use std::io::ErrorKind;
use std::path::Path;

/// Map file loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_file_load_error(error: &anyhow::Error, path: &Path) -> (String, String, String) {
    match error.downcast_ref::<FacetError>() {
        Some(FacetError::Validation { errors }) => (
            "Validation Error".to_string(),
            "The snapshot does not match the sidebar layout.".to_string(),
            errors.join("\n"),
        ),
        Some(FacetError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => (
            "File Not Found".to_string(),
            "The file could not be found.".to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                path.display()
            ),
        ),
        Some(FacetError::Io { source, .. }) if source.kind() == ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to read this file:\n{}", path.display()),
        ),
        Some(FacetError::Json { source, .. }) => (
            "Invalid Snapshot".to_string(),
            "The snapshot is not valid JSON for a facet sidebar.".to_string(),
            source.to_string(),
        ),
        Some(FacetError::Toml { source, .. }) => (
            "Invalid Configuration".to_string(),
            "The sidebar configuration could not be parsed.".to_string(),
            source.to_string(),
        ),
        _ => (
            "Error Loading File".to_string(),
            format!("Failed to load {}.", path.display()),
            format!("{:#}", error),
        ),
    }
}

/// Map file saving errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_file_save_error(error: &anyhow::Error, path: &Path) -> (String, String, String) {
    match error.downcast_ref::<FacetError>() {
        Some(FacetError::Io { source, .. }) if source.kind() == ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to write to:\n{}", path.display()),
        ),
        _ => (
            "Error Saving File".to_string(),
            "Failed to save snapshot file.".to_string(),
            format!("{:#}", error),
        ),
    }
}

/// Map action errors (bad syntax, unknown facet) to user-friendly messages
/// Returns (title, message, details)
pub fn map_action_error(error: &anyhow::Error, sidebar_fields: &[String]) -> (String, String, String) {
    match error.downcast_ref::<FacetError>() {
        Some(FacetError::UnknownFacet { field }) => (
            "Unknown Facet".to_string(),
            format!("There is no '{}' facet in this sidebar.", field),
            format!("Available facets: {}", sidebar_fields.join(", ")),
        ),
        Some(FacetError::InvalidAction { input, reason }) => (
            "Invalid Action".to_string(),
            format!("Could not understand '{}'.", input),
            format!(
                "{}\n\nExpected click:FIELD=VALUE, multi:FIELD=VALUE, add:FIELD=VALUE, clear:FIELD or toggle:FIELD",
                reason
            ),
        ),
        _ => (
            "Action Failed".to_string(),
            "The action could not be applied.".to_string(),
            format!("{:#}", error),
        ),
    }
}
