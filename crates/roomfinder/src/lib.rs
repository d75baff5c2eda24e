//! # roomfinder
//!
//! Builds a campus classroom dataset for "find an open classroom" features.
//!
//! ## Architecture
//!
//! - **campus**: building/classroom types, dataset loading, room-to-building matching
//! - **availability**: concurrent 25Live schedule fetches and slot grouping
//! - **reconcile**: manual labeling workflow for rooms the matcher could not place
//! - **export**: final JSON dataset
//! - **pipeline**: runs the stages above in order

pub mod availability;
pub mod campus;
pub mod config;
mod de;
pub mod export;
mod files;
pub mod pipeline;
pub mod reconcile;

pub use config::PipelineConfig;
pub use pipeline::{run, PipelineError, PipelineSummary};
