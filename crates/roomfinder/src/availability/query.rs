//! "Is this room free?" queries over fetched schedules.
//!
//! A room is free for a window when the campus is open for the whole window
//! and none of the room's slots on that day overlap it. Slot times are
//! decimal hours as returned upstream (`"9.5"` is 09:30).

use crate::campus::{Building, Classroom};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;
use std::fmt;

/// Fixed university holidays as `(year, month, day)`.
const UNIVERSITY_HOLIDAYS: [(i32, u32, u32); 3] = [(2024, 1, 1), (2024, 7, 4), (2024, 12, 25)];

const OPENS_AT_HOUR: u32 = 7;
const CLOSES_AT_HOUR: u32 = 22;

/// Answer to an availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoomStatus {
    Available,
    Unavailable,
    /// The building has no classrooms to ask about
    #[serde(rename = "No Data")]
    NoData,
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomStatus::Available => write!(f, "Available"),
            RoomStatus::Unavailable => write!(f, "Unavailable"),
            RoomStatus::NoData => write!(f, "No Data"),
        }
    }
}

/// When rooms can be booked at all.
#[derive(Debug, Clone)]
pub struct OperatingCalendar {
    /// First bookable hour of a weekday
    pub opens_at: u32,
    /// Hour by which every booking must end
    pub closes_at: u32,
    /// Days the campus is closed
    pub holidays: Vec<NaiveDate>,
}

impl Default for OperatingCalendar {
    fn default() -> Self {
        Self {
            opens_at: OPENS_AT_HOUR,
            closes_at: CLOSES_AT_HOUR,
            holidays: UNIVERSITY_HOLIDAYS
                .iter()
                .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
                .collect(),
        }
    }
}

impl OperatingCalendar {
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Whether `[start, end)` lies inside opening hours on a working day.
    pub fn is_open(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        if start >= end || start.date() != end.date() {
            return false;
        }
        if matches!(start.weekday(), Weekday::Sat | Weekday::Sun) || self.is_holiday(start.date()) {
            return false;
        }

        minute_of_day(start) >= self.opens_at as i64 * 60
            && minute_of_day(end) <= self.closes_at as i64 * 60
    }

    /// Checks one classroom for the window `[start, end)`.
    ///
    /// # Arguments
    /// * `classroom` - Room with its fetched `availability_times`
    /// * `start` / `end` - Requested window, local time, same day
    ///
    /// # Returns
    /// * `RoomStatus::Available` - Campus open and no slot overlaps
    /// * `RoomStatus::Unavailable` - Otherwise
    pub fn classroom_status(
        &self,
        classroom: &Classroom,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RoomStatus {
        if !self.is_open(start, end) {
            return RoomStatus::Unavailable;
        }

        let day = start.date().format("%Y-%m-%d").to_string();
        let from = minute_of_day(start);
        let to = minute_of_day(end);

        let busy = classroom
            .availability_times
            .iter()
            .filter(|slot| slot.date.split('T').next() == Some(day.as_str()))
            .any(|slot| {
                match (
                    decimal_hours_to_minutes(&slot.time_start),
                    decimal_hours_to_minutes(&slot.time_end),
                ) {
                    (Some(slot_start), Some(slot_end)) => !(to <= slot_start || from >= slot_end),
                    // unreadable slot times block the room
                    _ => true,
                }
            });

        if busy {
            RoomStatus::Unavailable
        } else {
            RoomStatus::Available
        }
    }

    /// A building is available when any of its classrooms is.
    pub fn building_status(
        &self,
        building: &Building,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RoomStatus {
        if building.classrooms.is_empty() {
            return RoomStatus::NoData;
        }

        let any_free = building
            .classrooms
            .iter()
            .any(|c| self.classroom_status(c, start, end) == RoomStatus::Available);

        if any_free {
            RoomStatus::Available
        } else {
            RoomStatus::Unavailable
        }
    }
}

fn minute_of_day(at: NaiveDateTime) -> i64 {
    (at.hour() * 60 + at.minute()) as i64
}

/// Converts decimal hours (`"13.25"`) to minutes since midnight.
fn decimal_hours_to_minutes(text: &str) -> Option<i64> {
    let hours: f64 = text.trim().parse().ok()?;
    if !hours.is_finite() {
        return None;
    }
    let whole = hours.floor();
    let minutes = ((hours - whole) * 60.0).round();
    Some(whole as i64 * 60 + minutes as i64)
}
