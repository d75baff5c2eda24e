/// Types for campus buildings and classrooms
use serde::{Deserialize, Serialize};

use crate::de;

/// A campus building, as read from the buildings dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    #[serde(default)]
    pub name: String,

    /// Short abbreviation (e.g. "ESJ"); not every building has one
    #[serde(default)]
    pub code: Option<String>,

    /// External identifier; empty for buildings synthesized during reconciliation
    #[serde(default, deserialize_with = "de::text")]
    pub building_id: String,

    #[serde(default, deserialize_with = "de::coordinate")]
    pub latitude: f64,

    #[serde(default, deserialize_with = "de::coordinate")]
    pub longitude: f64,

    #[serde(default)]
    pub classrooms: Vec<Classroom>,
}

impl Building {
    /// Returns the building code if it is usable as a lookup key.
    pub fn lookup_code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.is_empty())
    }

    pub fn has_classrooms(&self) -> bool {
        !self.classrooms.is_empty()
    }
}

/// A schedulable room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: i64,
    pub name: String,
    pub room_number: String,
    pub capacity: Option<u32>,
    pub has_whiteboard: bool,
    pub has_projector: bool,
    pub availability_times: Vec<AvailabilitySlot>,
    pub building_name: Option<String>,
    pub building_code: Option<String>,
    pub building_latitude: Option<f64>,
    pub building_longitude: Option<f64>,
}

impl Classroom {
    /// Creates a classroom that is not yet associated with any building.
    pub fn unplaced(id: i64, name: impl Into<String>, room_number: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            room_number: room_number.into(),
            capacity: None,
            has_whiteboard: true,
            has_projector: true,
            availability_times: Vec::new(),
            building_name: None,
            building_code: None,
            building_latitude: None,
            building_longitude: None,
        }
    }

    /// Copies the building's identifying fields onto this classroom.
    pub fn place_in(&mut self, building: &Building) {
        self.building_name = Some(building.name.clone());
        self.building_code = building.code.clone();
        self.building_latitude = Some(building.latitude);
        self.building_longitude = Some(building.longitude);
    }
}

/// One merged time window in a classroom's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    #[serde(default)]
    pub date: String,
    /// Names of all events sharing this window, joined with ", "
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub time_start: String,
    #[serde(default)]
    pub time_end: String,
    /// Upstream category code (`type_id`)
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub additional_details: String,
}

/// A row of the room-id dataset, e.g. `{"id": 1, "name": "ESJ 0202"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_building_defaults_when_fields_missing() {
        let building: Building = serde_json::from_str(r#"{"code": "ESJ"}"#).unwrap();
        assert_eq!(building.name, "");
        assert_eq!(building.building_id, "");
        assert_eq!(building.latitude, 0.0);
        assert_eq!(building.longitude, 0.0);
        assert!(building.classrooms.is_empty());
    }

    #[test]
    fn test_building_accepts_string_coordinates_and_numeric_id() {
        let building: Building = serde_json::from_str(
            r#"{"name": "Edward St. John", "code": "ESJ", "building_id": 226,
                "latitude": "38.9869", "longitude": "-76.9418"}"#,
        )
        .unwrap();
        assert_eq!(building.building_id, "226");
        assert_eq!(building.latitude, 38.9869);
        assert_eq!(building.longitude, -76.9418);
    }

    #[test]
    fn test_empty_code_is_not_a_lookup_key() {
        let mut building: Building = serde_json::from_str(r#"{"name": "Annex", "code": ""}"#).unwrap();
        assert_eq!(building.lookup_code(), None);
        building.code = Some("ANX".to_string());
        assert_eq!(building.lookup_code(), Some("ANX"));
    }

    #[test]
    fn test_unplaced_classroom_serializes_nulls() {
        let classroom = Classroom::unplaced(7, "XYZ 101", "101");
        let value = serde_json::to_value(&classroom).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["has_whiteboard"], true);
        assert_eq!(value["has_projector"], true);
        assert!(value["capacity"].is_null());
        assert!(value["building_name"].is_null());
        assert!(value["building_latitude"].is_null());
        assert_eq!(value["availability_times"], serde_json::json!([]));
    }

    #[test]
    fn test_place_in_copies_building_fields() {
        let building = Building {
            name: "Edward St. John".to_string(),
            code: Some("ESJ".to_string()),
            building_id: "b1".to_string(),
            latitude: 38.9,
            longitude: -76.9,
            classrooms: Vec::new(),
        };
        let mut classroom = Classroom::unplaced(1, "ESJ 0202", "0202");
        assert_eq!(classroom.building_name, None);

        classroom.place_in(&building);
        assert_eq!(classroom.building_name.as_deref(), Some("Edward St. John"));
        assert_eq!(classroom.building_code.as_deref(), Some("ESJ"));
        assert_eq!(classroom.building_latitude, Some(38.9));
        assert_eq!(classroom.building_longitude, Some(-76.9));
    }
}
