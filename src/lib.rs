//! Diagnostics for the channel training-data pipeline
//!
//! Media for each channel moves through a fixed series of stages
//! (raw audio → transcripts → features → interactions) before being
//! aggregated into JSONL training files.
//!
//! ## Main Components
//!
//! - `scan`: per-channel file tallies across stages and output line counts
//! - `data`: JSONL validation, NaN detection and label distributions
//! - `report`: console rendering
//! - `config`: stage layout and validation settings

pub mod config;
pub mod data;
pub mod errors;
pub mod report;
pub mod scan;

pub use config::Config;
pub use data::{validate_file, validate_files};
pub use errors::{PipelineError, Result};
pub use scan::scan_pipeline;
