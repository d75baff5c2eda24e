/// Wire types for the 25Live availability endpoint
use serde::Deserialize;
use serde_json::Value;

/// Top-level response of `availabilitydata.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

/// One day of a location's schedule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub item_date: Option<Value>,

    #[serde(default)]
    pub items: Vec<ScheduleItem>,
}

/// A single reservation, blackout or closure on a given day.
///
/// Upstream mixes strings and numbers for these fields, so they are kept as
/// raw JSON and rendered to text during grouping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleItem {
    #[serde(default)]
    pub start: Option<Value>,

    #[serde(default)]
    pub end: Option<Value>,

    #[serde(rename = "itemName", default)]
    pub item_name: Option<Value>,

    #[serde(default)]
    pub type_id: Option<Value>,

    #[serde(rename = "itemId2", default)]
    pub item_id2: Option<Value>,
}
