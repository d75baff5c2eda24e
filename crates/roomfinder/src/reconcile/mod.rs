//! Reconciliation of classrooms the matcher could not place.
//!
//! Two states, decided by whether the labeled cache file exists:
//!
//! - **Cached**: the cache from an earlier run is validated and merged.
//! - **Uncached**: unmatched classrooms are written to an editable pending
//!   file, a [`Confirmation`] waits for someone to label it, and the labeled
//!   result is validated, saved as the new cache, and merged. Labels left in
//!   a pending file by an earlier run are kept when it is rewritten.
//!
//! File errors in either state are logged and the run continues without
//! reconciliation.

mod confirm;
mod error;
pub mod labels;

pub use confirm::{Confirmation, ConsolePrompt, SkipLabeling};
pub use error::ReconcileError;
pub use labels::{carry_pending_labels, merge_labeled, validate_entries, LabelBatch, LabelProblem, LabeledEntry, RejectedLabel};

use crate::campus::{AvailabilitySlot, Building, Classroom};
use crate::files::to_pretty_json;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Which path the workflow took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileState {
    /// Labels were loaded from the cache file
    Cached,
    /// Labels were collected through the pending file this run
    Labeled,
    /// No cache and nothing unmatched
    NothingToLabel,
    /// The confirmation step said not to continue
    Declined,
    /// A file error stopped reconciliation
    Failed,
}

/// Summary of a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    pub state: ReconcileState,
    /// Classrooms attached to a building
    pub attached: usize,
    /// Entries skipped or discarded for incomplete labeling
    pub rejected: usize,
    /// Buildings synthesized for labels that matched nothing
    pub created_buildings: usize,
}

impl ReconcileReport {
    fn empty(state: ReconcileState) -> Self {
        Self {
            state,
            attached: 0,
            rejected: 0,
            created_buildings: 0,
        }
    }
}

/// Drives the reconciliation workflow for one pipeline run.
pub struct Reconciler {
    labeled_path: PathBuf,
    pending_path: PathBuf,
    confirmation: Box<dyn Confirmation + Send>,
}

impl Reconciler {
    /// # Arguments
    /// * `labeled_path` - Cache of labeled classrooms kept across runs
    /// * `pending_path` - Temporary file handed to a person for labeling
    /// * `confirmation` - How to wait for that person
    pub fn new(
        labeled_path: impl Into<PathBuf>,
        pending_path: impl Into<PathBuf>,
        confirmation: Box<dyn Confirmation + Send>,
    ) -> Self {
        Self {
            labeled_path: labeled_path.into(),
            pending_path: pending_path.into(),
            confirmation,
        }
    }

    /// Resolves `unmatched` into `buildings`.
    ///
    /// Never fails: errors are logged and reported as [`ReconcileState::Failed`].
    pub fn run(&self, buildings: &mut Vec<Building>, unmatched: Vec<Classroom>) -> ReconcileReport {
        let result = if self.labeled_path.exists() {
            self.apply_cached(buildings, unmatched)
        } else {
            self.collect_labels(buildings, unmatched)
        };

        match result {
            Ok(report) => report,
            Err(e) => {
                error!(error = %e, "Error reading labeled unmatched classrooms, skipping reconciliation");
                ReconcileReport::empty(ReconcileState::Failed)
            }
        }
    }

    /// Cached state: validate and merge the labels saved by an earlier run.
    fn apply_cached(
        &self,
        buildings: &mut Vec<Building>,
        unmatched: Vec<Classroom>,
    ) -> Result<ReconcileReport, ReconcileError> {
        info!(path = %self.labeled_path.display(), "Loading labeled classrooms");

        let entries = read_entries(&self.labeled_path)?;
        let mut batch = validate_entries(entries);
        for rejected in &batch.rejected {
            warn!(
                classroom_id = ?rejected.id,
                reason = %rejected.problem,
                "Skipping labeled classroom"
            );
        }

        let unlabeled = carry_fresh_availability(&mut batch.accepted, unmatched);
        if unlabeled > 0 {
            info!(unlabeled, "Unmatched classrooms have no entry in the labeled cache");
        }

        Ok(self.merge(buildings, batch, ReconcileState::Cached))
    }

    /// Uncached state: hand unmatched classrooms to a person and merge the result.
    fn collect_labels(
        &self,
        buildings: &mut Vec<Building>,
        mut unmatched: Vec<Classroom>,
    ) -> Result<ReconcileReport, ReconcileError> {
        if unmatched.is_empty() {
            info!("No unmatched classrooms to label");
            return Ok(ReconcileReport::empty(ReconcileState::NothingToLabel));
        }

        if self.pending_path.exists() {
            let earlier = read_entries(&self.pending_path)?;
            let carried = carry_pending_labels(&mut unmatched, earlier);
            if carried > 0 {
                info!(
                    carried,
                    path = %self.pending_path.display(),
                    "Kept labels from an earlier pending file"
                );
            }
        }

        write_json(&self.pending_path, &unmatched)?;
        info!(
            count = unmatched.len(),
            path = %self.pending_path.display(),
            "Exported unmatched classrooms for labeling"
        );

        let proceed = self
            .confirmation
            .confirm(&self.pending_path)
            .map_err(ReconcileError::Confirmation)?;
        if !proceed {
            warn!(
                path = %self.pending_path.display(),
                "Labeling not confirmed, leaving pending file for a later run"
            );
            return Ok(ReconcileReport::empty(ReconcileState::Declined));
        }

        let entries = read_entries(&self.pending_path)?;
        let batch = validate_entries(entries);
        for rejected in &batch.rejected {
            warn!(
                classroom_id = ?rejected.id,
                reason = %rejected.problem,
                "Discarding classroom"
            );
        }

        if batch.accepted.is_empty() {
            warn!(
                rejected = batch.rejected.len(),
                path = %self.pending_path.display(),
                "No classroom was fully labeled, leaving pending file and cache untouched"
            );
            return Ok(ReconcileReport {
                rejected: batch.rejected.len(),
                ..ReconcileReport::empty(ReconcileState::Labeled)
            });
        }

        write_json(&self.labeled_path, &batch.accepted)?;
        info!(
            count = batch.accepted.len(),
            path = %self.labeled_path.display(),
            "Saved labeled classrooms for future runs"
        );

        let report = self.merge(buildings, batch, ReconcileState::Labeled);

        if let Err(e) = fs::remove_file(&self.pending_path) {
            warn!(
                path = %self.pending_path.display(),
                error = %e,
                "Failed to remove pending labeling file"
            );
        }
        if report.rejected > 0 {
            info!(
                "Discarded {} classrooms due to incomplete labeling",
                report.rejected
            );
        }

        Ok(report)
    }

    fn merge(&self, buildings: &mut Vec<Building>, batch: LabelBatch, state: ReconcileState) -> ReconcileReport {
        let attached = batch.accepted.len();
        let created_buildings = merge_labeled(buildings, batch.accepted);

        info!(
            attached,
            rejected = batch.rejected.len(),
            created_buildings,
            "Reconciled unmatched classrooms"
        );

        ReconcileReport {
            state,
            attached,
            rejected: batch.rejected.len(),
            created_buildings,
        }
    }
}

/// Replaces cached availability with this run's fetch where the ids match.
///
/// Returns how many unmatched classrooms had no cached label.
fn carry_fresh_availability(labeled: &mut [Classroom], unmatched: Vec<Classroom>) -> usize {
    let mut fresh: HashMap<i64, Vec<AvailabilitySlot>> = unmatched
        .into_iter()
        .map(|c| (c.id, c.availability_times))
        .collect();

    for classroom in labeled.iter_mut() {
        if let Some(slots) = fresh.remove(&classroom.id) {
            classroom.availability_times = slots;
        }
    }

    fresh.len()
}

fn read_entries(path: &Path) -> Result<Vec<Value>, ReconcileError> {
    let content = fs::read_to_string(path).map_err(|e| ReconcileError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| ReconcileError::json(path, e))
}

fn write_json(path: &Path, classrooms: &[Classroom]) -> Result<(), ReconcileError> {
    let bytes = to_pretty_json(classrooms).map_err(|e| ReconcileError::json(path, e))?;
    fs::write(path, bytes).map_err(|e| ReconcileError::io(path, e))
}
