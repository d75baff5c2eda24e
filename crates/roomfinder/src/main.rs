use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roomfinder::availability::AvailabilityConfig;
use roomfinder::config::{
    DEFAULT_BUILDINGS_FILE, DEFAULT_LABELED_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_PENDING_FILE,
    DEFAULT_ROOMS_FILE,
};
use roomfinder::reconcile::{Confirmation, ConsolePrompt, SkipLabeling};
use roomfinder::PipelineConfig;

/// Command-line arguments for roomfinder
#[derive(Parser, Debug)]
#[command(name = "roomfinder")]
#[command(about = "Merge campus buildings, rooms and live 25Live availability into one dataset")]
#[command(version)]
struct Args {
    /// Buildings dataset
    #[arg(long, default_value = DEFAULT_BUILDINGS_FILE, env = "ROOMFINDER_BUILDINGS")]
    buildings: PathBuf,

    /// Room-id dataset
    #[arg(long, default_value = DEFAULT_ROOMS_FILE, env = "ROOMFINDER_ROOMS")]
    rooms: PathBuf,

    /// Labeled classrooms cache from earlier runs
    #[arg(long, default_value = DEFAULT_LABELED_FILE, env = "ROOMFINDER_LABELED")]
    labeled: PathBuf,

    /// Editable file written for manual labeling
    #[arg(long, default_value = DEFAULT_PENDING_FILE, env = "ROOMFINDER_PENDING")]
    pending: PathBuf,

    /// Output dataset
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE, env = "ROOMFINDER_OUTPUT")]
    output: PathBuf,

    /// First day of the availability window (YYYY-MM-DD); defaults to today
    #[arg(long, env = "ROOMFINDER_START_DATE")]
    start_date: Option<NaiveDate>,

    /// Events requested per room
    #[arg(long, default_value_t = 100)]
    page_size: u32,

    /// Maximum concurrent availability requests
    #[arg(short, long, default_value_t = 50, env = "ROOMFINDER_WORKERS")]
    workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Availability endpoint (availabilitydata.json)
    #[arg(long, env = "ROOMFINDER_ENDPOINT")]
    endpoint: Option<String>,

    /// Do not wait for manual labeling; write the pending file and export without it
    #[arg(long)]
    no_prompt: bool,
}

impl Args {
    fn into_config(self) -> PipelineConfig {
        let defaults = AvailabilityConfig::default();
        PipelineConfig {
            buildings_path: self.buildings,
            rooms_path: self.rooms,
            labeled_path: self.labeled,
            pending_path: self.pending,
            output_path: self.output,
            start_date: self.start_date,
            availability: AvailabilityConfig {
                base_url: self.endpoint.unwrap_or(defaults.base_url),
                page_size: self.page_size,
                workers: self.workers.max(1),
                timeout: Duration::from_secs(self.timeout_secs),
                user_agent: defaults.user_agent,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomfinder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let confirmation: Box<dyn Confirmation + Send> = if args.no_prompt {
        Box::new(SkipLabeling)
    } else {
        Box::new(ConsolePrompt)
    };
    let config = args.into_config();
    let output = config.output_path.clone();

    info!("Starting roomfinder {}", env!("CARGO_PKG_VERSION"));

    let summary = roomfinder::run(config, confirmation)
        .await
        .context("roomfinder run failed")?;

    info!(
        buildings = summary.buildings_loaded,
        rooms = summary.rooms_loaded,
        matched = summary.matched,
        unmatched = summary.unmatched,
        fetch_failures = summary.fetch.failed,
        reconciled = summary.reconcile.attached,
        "Run complete"
    );
    info!(
        "Building data with classrooms and availability has been exported to {} ({} buildings)",
        output.display(),
        summary.exported
    );

    Ok(())
}
