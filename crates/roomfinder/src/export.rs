//! Writes the final building dataset.

use crate::campus::Building;
use crate::files::to_pretty_json;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize buildings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returns the buildings that ended up with at least one classroom.
pub fn buildings_with_classrooms(buildings: &[Building]) -> Vec<&Building> {
    buildings.iter().filter(|b| b.has_classrooms()).collect()
}

/// Writes every non-empty building, with nested classrooms and availability,
/// as pretty-printed JSON.
///
/// # Returns
/// * `Ok(usize)` - Number of buildings written
/// * `Err(ExportError)` - If serialization or the write fails
pub fn export_buildings(buildings: &[Building], path: &Path) -> Result<usize, ExportError> {
    let kept = buildings_with_classrooms(buildings);
    let bytes = to_pretty_json(&kept)?;
    fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        buildings = kept.len(),
        dropped = buildings.len() - kept.len(),
        path = %path.display(),
        "Exported building data"
    );
    Ok(kept.len())
}
