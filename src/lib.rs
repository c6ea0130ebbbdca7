//! Geometry Overhead Estimation
//!
//! Estimates what it costs to keep per-point geometry (coordinates,
//! Jacobians, metric terms) next to a numerical model's state, and renders
//! the results as Markdown reports.
//!
//! ## Main Components
//!
//! - `config`: Configurations, estimator constants and output paths
//! - `estimator`: Memory, bandwidth and occupancy estimates
//! - `benchmarks`: Timing samples from an external harness
//! - `analysis`: One report run's records
//! - `report`: Markdown document builder, console and JSON output

pub mod analysis;
pub mod benchmarks;
pub mod config;
pub mod estimator;
pub mod report;
pub mod utils;

pub use analysis::{Analysis, TimingReport};
pub use config::{Config, Configuration, EstimatorConstants};
pub use estimator::{EstimateError, EstimateResult, Estimator};
pub use report::{ReportDocument, ReportError};

/// Library errors
pub use anyhow::{Error, Result};
