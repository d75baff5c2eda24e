//! Campus buildings, classrooms and the input datasets they come from

mod error;
pub mod matcher;
mod types;

pub use error::DatasetError;
pub use matcher::{match_rooms, split_room_name};
pub use types::*;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::info;

/// Loads the buildings dataset. Every building starts with no classrooms.
///
/// # Arguments
/// * `path` - JSON array of `{name, code, building_id, latitude, longitude}`
///
/// # Returns
/// * `Ok(Vec<Building>)` - Buildings in file order
/// * `Err(DatasetError)` - If the file is missing or malformed
pub fn load_buildings(path: &Path) -> Result<Vec<Building>, DatasetError> {
    let mut buildings: Vec<Building> = read_dataset(path)?;
    for building in &mut buildings {
        building.classrooms.clear();
    }
    info!("Loaded {} buildings from {}", buildings.len(), path.display());
    Ok(buildings)
}

/// Loads the room-id dataset (`[{"id": 1, "name": "ESJ 0202"}, ...]`).
pub fn load_rooms(path: &Path) -> Result<Vec<RoomRecord>, DatasetError> {
    let rooms: Vec<RoomRecord> = read_dataset(path)?;
    info!("Loaded {} rooms from {}", rooms.len(), path.display());
    Ok(rooms)
}

fn read_dataset<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
