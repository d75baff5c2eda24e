//! End-to-end run: load, match, fetch, reconcile, export.

use crate::availability::{resolve_start_date, AvailabilityClient, AvailabilityError, FetchSummary};
use crate::campus::{self, DatasetError};
use crate::config::PipelineConfig;
use crate::export::{export_buildings, ExportError};
use crate::reconcile::{Confirmation, ReconcileReport, Reconciler};
use thiserror::Error;
use tracing::info;

/// Failures that stop a run. Everything else is logged and skipped.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Failed to set up availability client: {0}")]
    Client(#[from] AvailabilityError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Reconciliation task panicked: {0}")]
    Reconcile(#[from] tokio::task::JoinError),
}

/// What a run did, for the final log line.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub buildings_loaded: usize,
    pub rooms_loaded: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub fetch: FetchSummary,
    pub reconcile: ReconcileReport,
    pub exported: usize,
}

/// Runs the whole pipeline once.
///
/// # Arguments
/// * `config` - Paths and client settings
/// * `confirmation` - How to wait for manual labeling when it is needed
///
/// # Returns
/// * `Ok(PipelineSummary)` - Counts for each stage
/// * `Err(PipelineError)` - If an input dataset is unreadable or the output
///   cannot be written
pub async fn run(
    config: PipelineConfig,
    confirmation: Box<dyn Confirmation + Send>,
) -> Result<PipelineSummary, PipelineError> {
    let mut buildings = campus::load_buildings(&config.buildings_path)?;
    let rooms = campus::load_rooms(&config.rooms_path)?;
    let buildings_loaded = buildings.len();
    let rooms_loaded = rooms.len();

    let mut unmatched = campus::match_rooms(&mut buildings, rooms);
    let matched: usize = buildings.iter().map(|b| b.classrooms.len()).sum();
    info!(matched, unmatched = unmatched.len(), "Matched rooms to buildings");

    let client = AvailabilityClient::with_config(config.availability.clone())?;
    let start_date = resolve_start_date(config.start_date);
    let fetch = if matched + unmatched.len() > 0 {
        let classrooms = buildings
            .iter_mut()
            .flat_map(|b| b.classrooms.iter_mut())
            .chain(unmatched.iter_mut());
        client.refresh_all(classrooms, start_date).await
    } else {
        info!("No classrooms found to fetch availability data");
        FetchSummary::default()
    };

    let unmatched_count = unmatched.len();
    let reconciler = Reconciler::new(&config.labeled_path, &config.pending_path, confirmation);
    let (buildings, reconcile) = tokio::task::spawn_blocking(move || {
        let report = reconciler.run(&mut buildings, unmatched);
        (buildings, report)
    })
    .await?;

    let exported = export_buildings(&buildings, &config.output_path)?;

    Ok(PipelineSummary {
        buildings_loaded,
        rooms_loaded,
        matched,
        unmatched: unmatched_count,
        fetch,
        reconcile,
        exported,
    })
}
