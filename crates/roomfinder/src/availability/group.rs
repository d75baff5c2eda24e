//! Collapses raw schedule items into one slot per time window.

use super::types::{AvailabilityResponse, ScheduleItem};
use crate::campus::AvailabilitySlot;
use crate::de::value_to_text;
use serde_json::Value;
use std::collections::HashMap;

/// Placeholder for item fields upstream left out.
const MISSING: &str = "N/A";

/// Grouping key: `(date, time_start, time_end)`.
type SlotKey = (String, String, String);

/// A slot under construction; names and details are joined at the end.
struct PendingSlot {
    date: String,
    time_start: String,
    time_end: String,
    status: String,
    event_names: Vec<String>,
    details: Vec<String>,
}

impl PendingSlot {
    fn seed(key: &SlotKey, item: &ScheduleItem) -> Self {
        Self {
            date: key.0.clone(),
            time_start: key.1.clone(),
            time_end: key.2.clone(),
            status: field_text(item.type_id.as_ref()),
            event_names: vec![field_text(item.item_name.as_ref())],
            details: vec![field_text(item.item_id2.as_ref())],
        }
    }

    fn absorb(&mut self, item: &ScheduleItem) {
        self.event_names.push(field_text(item.item_name.as_ref()));
        self.details.push(field_text(item.item_id2.as_ref()));
    }

    fn finish(self) -> AvailabilitySlot {
        AvailabilitySlot {
            date: self.date,
            event_name: self.event_names.join(", "),
            time_start: self.time_start,
            time_end: self.time_end,
            status: self.status,
            additional_details: self.details.join(", "),
        }
    }
}

/// Groups every item in the response by `(date, start, end)`.
///
/// The first item seen for a window provides its status; later items sharing
/// the window only contribute their names and details. Slots come back in
/// the order their windows were first seen.
pub fn group_items(response: &AvailabilityResponse) -> Vec<AvailabilitySlot> {
    let mut slots: Vec<PendingSlot> = Vec::new();
    let mut positions: HashMap<SlotKey, usize> = HashMap::new();

    for subject in &response.subjects {
        let date = subject
            .item_date
            .as_ref()
            .map(text_or_empty)
            .unwrap_or_default();

        for item in &subject.items {
            let key = (
                date.clone(),
                field_text(item.start.as_ref()),
                field_text(item.end.as_ref()),
            );

            match positions.get(&key) {
                Some(&idx) => slots[idx].absorb(item),
                None => {
                    slots.push(PendingSlot::seed(&key, item));
                    positions.insert(key, slots.len() - 1);
                }
            }
        }
    }

    slots.into_iter().map(PendingSlot::finish).collect()
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(v) => value_to_text(v),
    }
}

fn text_or_empty(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        v => value_to_text(v),
    }
}
