use crate::error::DataSourceError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A commodity to analyse: the code naming its price file and a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub code: String,
    pub name: String,
}

/// Reads the JSON target list, e.g. `[{"code": "LA1", "name": "Cabbage"}]`.
pub fn load_manifest(path: &Path) -> Result<Vec<TargetSpec>, DataSourceError> {
    let raw = fs::read_to_string(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let targets: Vec<TargetSpec> =
        serde_json::from_str(&raw).map_err(|source| DataSourceError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;

    if targets.is_empty() {
        return Err(DataSourceError::EmptyManifest(path.to_path_buf()));
    }
    tracing::info!(count = targets.len(), path = %path.display(), "Loaded target manifest");
    Ok(targets)
}
