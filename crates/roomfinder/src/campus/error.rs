//! Error types for loading the campus datasets.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the mandatory input datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be opened or read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not the expected JSON shape
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
