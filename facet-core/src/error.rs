use std::path::PathBuf;

use thiserror::Error;

/// Shared `Result` alias for facet operations that can fail.
pub type Result<T> = std::result::Result<T, FacetError>;

/// Errors raised while loading sidebar inputs or dispatching actions.
///
/// The selection model itself is total and never produces these.
#[derive(Debug, Error)]
pub enum FacetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown facet '{field}'")]
    UnknownFacet { field: String },

    #[error("invalid action '{input}': {reason}")]
    InvalidAction { input: String, reason: String },

    #[error("Validation failed:\n{}", .errors.join("\n"))]
    Validation { errors: Vec<String> },
}

impl FacetError {
    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Json { .. } => "json",
            Self::Toml { .. } => "toml",
            Self::UnknownFacet { .. } => "unknown-facet",
            Self::InvalidAction { .. } => "invalid-action",
            Self::Validation { .. } => "validation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_error() {
        let err = FacetError::Validation {
            errors: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(err.to_string(), "Validation failed:\nfirst\nsecond");
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_unknown_facet_message() {
        let err = FacetError::UnknownFacet {
            field: "colors".to_string(),
        };
        assert_eq!(err.to_string(), "unknown facet 'colors'");
    }
}
