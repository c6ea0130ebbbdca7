//! One report run: every configuration estimated, plus optional timings
//!
//! The records collected here are the single source for both the console
//! summary and the Markdown/JSON files.

use crate::benchmarks::{OverheadRow, TimingError, TimingSet};
use crate::config::{Config, Configuration, EstimatorConstants};
use crate::estimator::{EstimateError, EstimateResult, Estimator, OccupancyEstimate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timing overhead table for one harness run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingReport {
    pub baseline: String,
    pub rows: Vec<OverheadRow>,
}

impl TimingReport {
    pub fn from_set(set: &TimingSet, baseline: Option<&str>) -> Result<Self, TimingError> {
        let baseline = set.resolve_baseline(baseline)?;
        Ok(Self {
            baseline: baseline.to_string(),
            rows: set.overhead_rows(baseline)?,
        })
    }

    /// Non-baseline row with the largest overhead
    pub fn worst(&self) -> Option<&OverheadRow> {
        self.rows
            .iter()
            .filter(|r| !r.is_baseline)
            .max_by(|a, b| a.overhead_percent.total_cmp(&b.overhead_percent))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub generated_at: DateTime<Utc>,
    pub constants: EstimatorConstants,
    pub configurations: Vec<Configuration>,
    pub results: Vec<EstimateResult>,
    pub occupancy: OccupancyEstimate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timings: Option<TimingReport>,
}

impl Analysis {
    /// Estimate every configuration in `config`, in order
    pub fn run(config: &Config) -> Result<Self, EstimateError> {
        let estimator = Estimator::new(config.constants.clone())?;
        let results = estimator.estimate_all(&config.configurations)?;
        let occupancy = estimator.estimate_occupancy(
            config.constants.base_registers,
            config.constants.overhead_registers,
        );

        tracing::info!(configurations = results.len(), "analysis complete");

        Ok(Self {
            generated_at: Utc::now(),
            constants: config.constants.clone(),
            configurations: config.configurations.clone(),
            results,
            occupancy,
            timings: None,
        })
    }

    pub fn with_timings(mut self, timings: TimingReport) -> Self {
        self.timings = Some(timings);
        self
    }

    pub fn largest_geometry_share(&self) -> Option<&EstimateResult> {
        self.results
            .iter()
            .max_by(|a, b| a.geometry_share_percent.total_cmp(&b.geometry_share_percent))
    }

    pub fn smallest_geometry_share(&self) -> Option<&EstimateResult> {
        self.results
            .iter()
            .min_by(|a, b| a.geometry_share_percent.total_cmp(&b.geometry_share_percent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmarks::TimingSample;

    #[test]
    fn test_run_preserves_order() {
        let analysis = Analysis::run(&Config::default()).unwrap();
        let names: Vec<_> = analysis.results.iter().map(|r| r.config_name.as_str()).collect();
        assert_eq!(names, vec!["Development", "Production", "High Resolution"]);
        assert_eq!(analysis.occupancy.without_percent, 50);
    }

    #[test]
    fn test_timing_report_worst() {
        let set = TimingSet::from_samples(vec![
            TimingSample::new("baseline", 10.0),
            TimingSample::new("slow", 30.0),
            TimingSample::new("slower", 40.0),
        ]);
        let report = TimingReport::from_set(&set, Some("baseline")).unwrap();
        assert_eq!(report.worst().unwrap().operation, "slower");
    }
}
