use std::fs;
use std::path::Path;

use crate::error::{FacetError, Result};
use crate::models::FacetSnapshot;

/// Load a sidebar snapshot from a JSON file
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<FacetSnapshot> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| FacetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| FacetError::Json {
        context: path.display().to_string(),
        source,
    })
}

/// Save a snapshot to a JSON file with pretty printing
pub fn save_snapshot<P: AsRef<Path>>(snapshot: &FacetSnapshot, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(snapshot).map_err(|source| FacetError::Json {
        context: "snapshot".to_string(),
        source,
    })?;
    fs::write(path, json).map_err(|source| FacetError::Io {
        path: path.to_path_buf(),
        source,
    })
}
