//! Room availability fetching from the 25Live scheduling service.
//!
//! Each classroom gets one request for a fixed-size page of events starting
//! at midnight of the chosen date. Raw items are grouped into one slot per
//! `(date, start, end)` window before being attached to the classroom.

mod client;
mod error;
mod group;
pub mod query;
mod types;

pub use client::{AvailabilityClient, AvailabilityConfig, FetchSummary};
pub use error::AvailabilityError;
pub use group::group_items;
pub use query::{OperatingCalendar, RoomStatus};
pub use types::{AvailabilityResponse, ScheduleItem, Subject};

use chrono::{Local, NaiveDate};

/// Resolves the first day of the schedule window, defaulting to today.
pub fn resolve_start_date(start_date: Option<NaiveDate>) -> NaiveDate {
    start_date.unwrap_or_else(|| Local::now().date_naive())
}
