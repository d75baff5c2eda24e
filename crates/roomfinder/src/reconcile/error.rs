//! Error types for the reconciliation workflow.

use std::path::PathBuf;
use thiserror::Error;

/// File-level failures while reconciling unmatched classrooms.
///
/// These are never fatal: the pipeline logs them and exports without the
/// reconciled rooms.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Reading, writing or removing a reconciliation file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A reconciliation file is not a JSON array
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The confirmation step itself failed (e.g. stdin closed with an error)
    #[error("Confirmation failed: {0}")]
    Confirmation(#[source] std::io::Error),
}

impl ReconcileError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ReconcileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &std::path::Path, source: serde_json::Error) -> Self {
        ReconcileError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}
