//! Parsing and validation of hand-labeled classroom entries.

use crate::campus::{AvailabilitySlot, Building, Classroom};
use crate::de;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// One entry of the labeling file, as a person left it.
#[derive(Debug, Clone, Deserialize)]
pub struct LabeledEntry {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub room_number: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default = "default_true")]
    pub has_whiteboard: bool,
    #[serde(default = "default_true")]
    pub has_projector: bool,
    #[serde(default)]
    pub availability_times: Vec<AvailabilitySlot>,
    #[serde(default)]
    pub building_name: Option<String>,
    #[serde(default)]
    pub building_code: Option<String>,
    #[serde(default, deserialize_with = "de::optional_coordinate")]
    pub building_latitude: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_coordinate")]
    pub building_longitude: Option<f64>,
}

fn default_true() -> bool {
    true
}

/// Why a labeled entry was not accepted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelProblem {
    /// The entry could not be read as a classroom at all
    #[error("malformed entry: {message}")]
    Malformed { message: String },

    /// One or more building fields were left blank
    #[error("incomplete labeling, missing {}", .missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },
}

/// An entry that failed validation, with its id when one could be read.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLabel {
    pub id: Option<i64>,
    pub problem: LabelProblem,
}

/// Result of validating a whole labeling file.
#[derive(Debug, Clone, Default)]
pub struct LabelBatch {
    pub accepted: Vec<Classroom>,
    pub rejected: Vec<RejectedLabel>,
}

impl LabeledEntry {
    /// Lists the building fields that are still missing.
    ///
    /// Name and code must be non-empty; coordinates only need to be present,
    /// since 0.0 is a valid value.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(self.building_name.as_deref()) {
            missing.push("building_name");
        }
        if is_blank(self.building_code.as_deref()) {
            missing.push("building_code");
        }
        if self.building_latitude.is_none() {
            missing.push("building_latitude");
        }
        if self.building_longitude.is_none() {
            missing.push("building_longitude");
        }
        missing
    }

    /// Converts a fully labeled entry into a placed classroom.
    pub fn into_classroom(self) -> Result<Classroom, LabelProblem> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(LabelProblem::Incomplete { missing });
        }

        Ok(Classroom {
            id: self.id,
            name: self.name,
            room_number: self.room_number,
            capacity: self.capacity,
            has_whiteboard: self.has_whiteboard,
            has_projector: self.has_projector,
            availability_times: self.availability_times,
            building_name: self.building_name,
            building_code: self.building_code,
            building_latitude: self.building_latitude,
            building_longitude: self.building_longitude,
        })
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

/// Validates raw JSON entries one by one.
///
/// A bad entry never affects its neighbours; it just lands in `rejected`.
pub fn validate_entries(entries: Vec<Value>) -> LabelBatch {
    let mut batch = LabelBatch::default();

    for raw in entries {
        let id = raw.get("id").and_then(Value::as_i64);
        let result = serde_json::from_value::<LabeledEntry>(raw)
            .map_err(|e| LabelProblem::Malformed {
                message: e.to_string(),
            })
            .and_then(LabeledEntry::into_classroom);

        match result {
            Ok(classroom) => batch.accepted.push(classroom),
            Err(problem) => batch.rejected.push(RejectedLabel { id, problem }),
        }
    }

    batch
}

/// Copies edits from an earlier pending file onto this run's export, by id.
///
/// Fresh availability is kept; every field a person may have filled in is
/// taken from the edit. Returns how many classrooms picked up building
/// fields. Entries that cannot be read are ignored.
pub fn carry_pending_labels(classrooms: &mut [Classroom], entries: Vec<Value>) -> usize {
    let mut edits: HashMap<i64, LabeledEntry> = entries
        .into_iter()
        .filter_map(|raw| serde_json::from_value::<LabeledEntry>(raw).ok())
        .map(|entry| (entry.id, entry))
        .collect();

    let mut carried = 0;
    for classroom in classrooms.iter_mut() {
        let Some(edit) = edits.remove(&classroom.id) else {
            continue;
        };
        if edit.missing_fields().len() < 4 {
            carried += 1;
        }
        classroom.capacity = edit.capacity;
        classroom.has_whiteboard = edit.has_whiteboard;
        classroom.has_projector = edit.has_projector;
        classroom.building_name = edit.building_name;
        classroom.building_code = edit.building_code;
        classroom.building_latitude = edit.building_latitude;
        classroom.building_longitude = edit.building_longitude;
    }

    carried
}

/// Builds a building for a labeled classroom that matches nothing known.
pub fn synthesize_building(classroom: &Classroom) -> Building {
    Building {
        name: classroom
            .building_name
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        code: classroom.building_code.clone(),
        building_id: String::new(),
        latitude: classroom.building_latitude.unwrap_or(0.0),
        longitude: classroom.building_longitude.unwrap_or(0.0),
        classrooms: Vec::new(),
    }
}

/// Finds the building a labeled classroom belongs to: by code, then by name.
fn find_building(buildings: &[Building], classroom: &Classroom) -> Option<usize> {
    let by_code = classroom
        .building_code
        .as_deref()
        .filter(|code| !code.is_empty())
        .and_then(|code| {
            buildings
                .iter()
                .position(|b| b.code.as_deref() == Some(code))
        });

    by_code.or_else(|| {
        classroom
            .building_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .and_then(|name| buildings.iter().position(|b| b.name == name))
    })
}

/// Attaches labeled classrooms to existing buildings, creating new ones as
/// needed. Returns the number of buildings created.
pub fn merge_labeled(buildings: &mut Vec<Building>, classrooms: Vec<Classroom>) -> usize {
    let mut created = 0;

    for classroom in classrooms {
        let idx = match find_building(buildings, &classroom) {
            Some(idx) => idx,
            None => {
                buildings.push(synthesize_building(&classroom));
                created += 1;
                buildings.len() - 1
            }
        };
        buildings[idx].classrooms.push(classroom);
    }

    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labeled(id: i64, name: &str, code: &str, lat: f64, lon: f64) -> Value {
        json!({
            "id": id,
            "name": format!("{code} 100"),
            "room_number": "100",
            "building_name": name,
            "building_code": code,
            "building_latitude": lat,
            "building_longitude": lon
        })
    }

    fn building(name: &str, code: Option<&str>) -> Building {
        Building {
            name: name.to_string(),
            code: code.map(str::to_string),
            building_id: "b".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            classrooms: Vec::new(),
        }
    }

    #[test]
    fn test_accepts_complete_entry() {
        let batch = validate_entries(vec![labeled(1, "Mystery Hall", "MYS", 38.9, -76.9)]);
        assert!(batch.rejected.is_empty());
        let classroom = &batch.accepted[0];
        assert_eq!(classroom.id, 1);
        assert!(classroom.has_whiteboard);
        assert_eq!(classroom.building_code.as_deref(), Some("MYS"));
        assert_eq!(classroom.building_latitude, Some(38.9));
    }

    #[test]
    fn test_zero_coordinates_are_valid() {
        let batch = validate_entries(vec![labeled(1, "Origin", "ORG", 0.0, 0.0)]);
        assert_eq!(batch.accepted.len(), 1);
    }

    #[test]
    fn test_missing_latitude_is_rejected() {
        let mut entry = labeled(2, "Mystery Hall", "MYS", 38.9, -76.9);
        entry["building_latitude"] = Value::Null;

        let batch = validate_entries(vec![entry]);
        assert!(batch.accepted.is_empty());
        assert_eq!(
            batch.rejected,
            vec![RejectedLabel {
                id: Some(2),
                problem: LabelProblem::Incomplete {
                    missing: vec!["building_latitude"]
                }
            }]
        );
    }

    #[test]
    fn test_blank_name_and_code_are_rejected() {
        let batch = validate_entries(vec![json!({
            "id": 3, "name": "XYZ 1", "room_number": "1",
            "building_name": "", "building_latitude": 1.0, "building_longitude": 1.0
        })]);
        let LabelProblem::Incomplete { missing } = &batch.rejected[0].problem else {
            panic!("expected incomplete labeling");
        };
        assert_eq!(missing, &vec!["building_name", "building_code"]);
    }

    #[test]
    fn test_malformed_entry_does_not_affect_others() {
        let batch = validate_entries(vec![
            json!({"name": "no id"}),
            json!("not an object"),
            labeled(4, "Mystery Hall", "MYS", 38.9, -76.9),
        ]);
        assert_eq!(batch.accepted.len(), 1);
        assert_eq!(batch.rejected.len(), 2);
        assert_eq!(batch.rejected[0].id, None);
        assert!(matches!(
            batch.rejected[1].problem,
            LabelProblem::Malformed { .. }
        ));
    }

    #[test]
    fn test_merge_prefers_code_then_name() {
        let mut buildings = vec![building("Hall A", Some("HA")), building("Hall B", Some("HB"))];
        let batch = validate_entries(vec![
            labeled(1, "Hall B", "HA", 0.0, 0.0),
            labeled(2, "Hall B", "ZZ", 0.0, 0.0),
        ]);

        let created = merge_labeled(&mut buildings, batch.accepted);
        assert_eq!(created, 0);
        assert_eq!(buildings[0].classrooms[0].id, 1);
        assert_eq!(buildings[1].classrooms[0].id, 2);
    }

    #[test]
    fn test_merge_synthesizes_building_once() {
        let mut buildings = vec![building("Hall A", Some("HA"))];
        let batch = validate_entries(vec![
            labeled(1, "Annex", "ANX", 38.5, -76.5),
            labeled(2, "Annex", "ANX", 38.5, -76.5),
        ]);

        let created = merge_labeled(&mut buildings, batch.accepted);
        assert_eq!(created, 1);
        assert_eq!(buildings.len(), 2);
        let annex = &buildings[1];
        assert_eq!(annex.name, "Annex");
        assert_eq!(annex.code.as_deref(), Some("ANX"));
        assert_eq!(annex.building_id, "");
        assert_eq!(annex.latitude, 38.5);
        assert_eq!(annex.classrooms.len(), 2);
    }

    #[test]
    fn test_carry_pending_labels_keeps_fresh_availability() {
        let mut fresh = Classroom::unplaced(7, "MYS 101", "101");
        fresh.availability_times = vec![AvailabilitySlot {
            date: "2024-01-02".to_string(),
            event_name: "Fresh".to_string(),
            time_start: "9".to_string(),
            time_end: "10".to_string(),
            status: "1".to_string(),
            additional_details: "N/A".to_string(),
        }];
        let mut classrooms = vec![fresh, Classroom::unplaced(8, "QQ 1", "1")];
        let mut edited = labeled(7, "Mystery Hall", "MYS", 38.5, -76.5);
        edited["capacity"] = json!(40);

        let carried = carry_pending_labels(
            &mut classrooms,
            vec![
                edited,
                json!({"id": 8, "name": "QQ 1", "building_name": null}),
                json!("garbage"),
            ],
        );

        assert_eq!(carried, 1);
        assert_eq!(classrooms[0].building_code.as_deref(), Some("MYS"));
        assert_eq!(classrooms[0].building_latitude, Some(38.5));
        assert_eq!(classrooms[0].capacity, Some(40));
        assert_eq!(classrooms[0].availability_times[0].event_name, "Fresh");
        assert_eq!(classrooms[1].building_name, None);
    }

    #[test]
    fn test_synthesized_name_defaults_to_unknown() {
        let classroom = Classroom::unplaced(9, "Q 1", "1");
        let building = synthesize_building(&classroom);
        assert_eq!(building.name, "Unknown");
        assert_eq!(building.latitude, 0.0);
        assert_eq!(building.longitude, 0.0);
    }
}
