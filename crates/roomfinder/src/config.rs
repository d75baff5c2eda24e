/// Configuration for a pipeline run
use crate::availability::AvailabilityConfig;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Default locations, relative to the working directory.
pub const DEFAULT_BUILDINGS_FILE: &str = "buildings.json";
pub const DEFAULT_ROOMS_FILE: &str = "room_ids.json";
pub const DEFAULT_LABELED_FILE: &str = "labeled_unmatched_classrooms.json";
pub const DEFAULT_PENDING_FILE: &str = "unmatched_classrooms_to_label.json";
pub const DEFAULT_OUTPUT_FILE: &str = "buildings_data.json";

/// Everything a single run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Buildings dataset (mandatory)
    pub buildings_path: PathBuf,
    /// Room-id dataset (mandatory)
    pub rooms_path: PathBuf,
    /// Labeled classrooms cache, reused across runs when present
    pub labeled_path: PathBuf,
    /// Editable file written for manual labeling
    pub pending_path: PathBuf,
    /// Final building dataset
    pub output_path: PathBuf,
    /// First day of the availability window; `None` means today
    pub start_date: Option<NaiveDate>,
    pub availability: AvailabilityConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            buildings_path: PathBuf::from(DEFAULT_BUILDINGS_FILE),
            rooms_path: PathBuf::from(DEFAULT_ROOMS_FILE),
            labeled_path: PathBuf::from(DEFAULT_LABELED_FILE),
            pending_path: PathBuf::from(DEFAULT_PENDING_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            start_date: None,
            availability: AvailabilityConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Places every data file under `dir`, keeping the default file names.
    pub fn in_directory(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            buildings_path: dir.join(DEFAULT_BUILDINGS_FILE),
            rooms_path: dir.join(DEFAULT_ROOMS_FILE),
            labeled_path: dir.join(DEFAULT_LABELED_FILE),
            pending_path: dir.join(DEFAULT_PENDING_FILE),
            output_path: dir.join(DEFAULT_OUTPUT_FILE),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.buildings_path, PathBuf::from("buildings.json"));
        assert_eq!(config.output_path, PathBuf::from("buildings_data.json"));
        assert_eq!(config.start_date, None);
        assert_eq!(config.availability.workers, 50);
        assert_eq!(config.availability.page_size, 100);
        assert_eq!(config.availability.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_in_directory() {
        let config = PipelineConfig::in_directory("/data");
        assert_eq!(config.rooms_path, PathBuf::from("/data/room_ids.json"));
        assert_eq!(
            config.labeled_path,
            PathBuf::from("/data/labeled_unmatched_classrooms.json")
        );
    }
}
