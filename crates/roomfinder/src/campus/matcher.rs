//! Associates room records with buildings by their composite name.
//!
//! A room name such as `"ESJ 0202"` is split into a building token (`ESJ`)
//! and a room number (`0202`). The token is looked up by building code
//! first and by building name second.

use super::types::{Building, Classroom, RoomRecord};
use std::collections::HashMap;
use tracing::debug;

/// Lookup indexes over a building list, keyed by position in that list.
struct BuildingIndex {
    by_code: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl BuildingIndex {
    fn new(buildings: &[Building]) -> Self {
        let mut by_code = HashMap::new();
        let mut by_name = HashMap::new();

        for (idx, building) in buildings.iter().enumerate() {
            if let Some(code) = building.lookup_code() {
                by_code.insert(code.to_string(), idx);
            }
            by_name.insert(building.name.clone(), idx);
        }

        Self { by_code, by_name }
    }

    /// Code match wins over name match.
    fn resolve(&self, token: &str) -> Option<usize> {
        self.by_code
            .get(token)
            .or_else(|| self.by_name.get(token))
            .copied()
    }
}

/// Splits a composite room name into `(building_token, room_number)`.
///
/// Returns `None` when the name has fewer than two whitespace-separated
/// tokens. The room number is the remaining tokens joined by single spaces.
pub fn split_room_name(name: &str) -> Option<(String, String)> {
    let mut parts = name.split_whitespace();
    let token = parts.next()?;
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        return None;
    }
    Some((token.to_string(), rest.join(" ")))
}

/// Attaches each room to its building and returns the rooms that could not
/// be placed.
///
/// Unmatched classrooms carry only `id`, `name` and `room_number`; names that
/// cannot be split yield an empty room number.
pub fn match_rooms(buildings: &mut [Building], rooms: Vec<RoomRecord>) -> Vec<Classroom> {
    let index = BuildingIndex::new(buildings);
    let mut unmatched = Vec::new();

    for room in rooms {
        let Some((token, room_number)) = split_room_name(&room.name) else {
            debug!(room_id = room.id, name = %room.name, "Room name has no building token");
            unmatched.push(Classroom::unplaced(room.id, room.name, ""));
            continue;
        };

        match index.resolve(&token) {
            Some(idx) => {
                let building = &mut buildings[idx];
                let mut classroom = Classroom::unplaced(room.id, room.name, room_number);
                classroom.place_in(building);
                building.classrooms.push(classroom);
            }
            None => {
                debug!(room_id = room.id, token = %token, "No building for room token");
                unmatched.push(Classroom::unplaced(room.id, room.name, room_number));
            }
        }
    }

    unmatched
}
