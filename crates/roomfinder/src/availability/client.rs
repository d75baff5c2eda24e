//! HTTP client for the 25Live availability service.
//!
//! One GET per classroom, no retries. Fetches for many classrooms share a
//! single `reqwest::Client` and run through a bounded stream of futures.

use super::error::AvailabilityError;
use super::group::group_items;
use super::types::AvailabilityResponse;
use crate::campus::{AvailabilitySlot, Classroom};
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Availability data endpoint for the UMD 25Live instance.
const AVAILABILITY_URL: &str =
    "https://25live.collegenet.com/25live/data/umd/run/availability/availabilitydata.json";

/// Categories requested alongside regular reservations.
const INCLUDE_CATEGORIES: &str = "closed blackouts pending related empty";

const CALLER_TAG: &str = "pro-AvailService.getData";

/// Log a progress line after this many completed fetches.
const PROGRESS_INTERVAL: usize = 50;

/// Configuration for the availability client.
#[derive(Debug, Clone)]
pub struct AvailabilityConfig {
    /// Full URL of `availabilitydata.json`
    pub base_url: String,
    /// Number of events requested per room
    pub page_size: u32,
    /// Maximum number of requests in flight
    pub workers: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            base_url: AVAILABILITY_URL.to_string(),
            page_size: 100,
            workers: 50,
            timeout: Duration::from_secs(10),
            user_agent: format!("roomfinder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Outcome of a fetch phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub total: usize,
    pub failed: usize,
}

impl FetchSummary {
    pub fn succeeded(&self) -> usize {
        self.total - self.failed
    }
}

/// Client for fetching classroom schedules.
pub struct AvailabilityClient {
    client: Client,
    endpoint: Url,
    config: AvailabilityConfig,
}

impl AvailabilityClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self, AvailabilityError> {
        Self::with_config(AvailabilityConfig::default())
    }

    /// Creates a new client with custom configuration.
    pub fn with_config(config: AvailabilityConfig) -> Result<Self, AvailabilityError> {
        let endpoint = Url::parse(&config.base_url)?;

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AvailabilityError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// Builds the query string for one room's schedule window.
    pub fn query_params(&self, space_id: i64, start_date: NaiveDate) -> Vec<(&'static str, String)> {
        vec![
            ("obj_cache_accl", "0".to_string()),
            ("start_dt", format!("{}T00:00:00", start_date.format("%Y-%m-%d"))),
            ("comptype", "availability_daily".to_string()),
            ("compsubject", "location".to_string()),
            ("page_size", self.config.page_size.to_string()),
            ("space_id", space_id.to_string()),
            ("include", INCLUDE_CATEGORIES.to_string()),
            ("caller", CALLER_TAG.to_string()),
        ]
    }

    /// Fetches and groups the schedule for one room.
    ///
    /// # Arguments
    /// * `space_id` - The room's 25Live location id (the classroom `id`)
    /// * `start_date` - First day of the window; the time is fixed at midnight
    ///
    /// # Returns
    /// * `Ok(Vec<AvailabilitySlot>)` - Slots in first-seen window order
    /// * `Err(AvailabilityError)` - On transport, status or decode failure
    pub async fn fetch_slots(
        &self,
        space_id: i64,
        start_date: NaiveDate,
    ) -> Result<Vec<AvailabilitySlot>, AvailabilityError> {
        debug!(space_id, start_date = %start_date, "Requesting availability");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&self.query_params(space_id, start_date))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AvailabilityError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let data: AvailabilityResponse = serde_json::from_str(&body)?;

        Ok(group_items(&data))
    }

    /// Replaces a classroom's availability with a fresh fetch.
    ///
    /// On failure the classroom's availability is cleared and the error is
    /// logged and returned; the caller decides whether it matters.
    pub async fn refresh(
        &self,
        classroom: &mut Classroom,
        start_date: NaiveDate,
    ) -> Result<usize, AvailabilityError> {
        match self.fetch_slots(classroom.id, start_date).await {
            Ok(slots) => {
                let count = slots.len();
                classroom.availability_times = slots;
                Ok(count)
            }
            Err(e) => {
                warn!(
                    classroom_id = classroom.id,
                    error = %e,
                    "Failed to fetch availability"
                );
                classroom.availability_times = Vec::new();
                Err(e)
            }
        }
    }

    /// Refreshes every classroom with at most `workers` requests in flight.
    ///
    /// Returns once every fetch has completed or failed.
    pub async fn refresh_all<'a, I>(&self, classrooms: I, start_date: NaiveDate) -> FetchSummary
    where
        I: IntoIterator<Item = &'a mut Classroom>,
    {
        let classrooms: Vec<&'a mut Classroom> = classrooms.into_iter().collect();
        let total = classrooms.len();
        let workers = self.config.workers.max(1);
        let start = Instant::now();

        info!(
            total,
            workers,
            start_date = %start_date,
            "Fetching classroom availability"
        );

        let mut pending = stream::iter(classrooms)
            .map(|classroom| self.refresh(classroom, start_date))
            .buffer_unordered(workers);

        let mut summary = FetchSummary {
            total,
            failed: 0,
        };
        let mut completed = 0usize;

        while let Some(result) = pending.next().await {
            completed += 1;
            if result.is_err() {
                summary.failed += 1;
            }

            if completed % PROGRESS_INTERVAL == 0 || completed == total {
                info!(
                    progress = format!("{}/{}", completed, total),
                    failed = summary.failed,
                    "Availability fetch progress"
                );
            }
        }

        info!(
            succeeded = summary.succeeded(),
            failed = summary.failed,
            duration_ms = start.elapsed().as_millis() as u64,
            "Availability fetch finished"
        );

        summary
    }
}
