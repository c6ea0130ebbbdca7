//! Timing samples from an external benchmark harness
//!
//! The harness reports `{operation, elapsed_us}` pairs. Overhead is always
//! expressed relative to one designated baseline operation:
//! `100 × (t − t_base) / t_base`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimingError {
    #[error("baseline operation '{0}' not found in timing samples")]
    BaselineNotFound(String),

    #[error("baseline operation '{operation}' has non-positive time {elapsed_us}us")]
    InvalidBaseline { operation: String, elapsed_us: f64 },

    #[error("no baseline operation given and none recorded in the timing file")]
    MissingBaseline,

    #[error("failed to read timing file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse timing file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One measured operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSample {
    pub operation: String,
    pub elapsed_us: f64,
}

impl TimingSample {
    pub fn new(operation: &str, elapsed_us: f64) -> Self {
        Self {
            operation: operation.to_string(),
            elapsed_us,
        }
    }
}

/// A sample with its overhead against the baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverheadRow {
    pub operation: String,
    pub elapsed_us: f64,
    pub overhead_percent: f64,
    pub is_baseline: bool,
}

/// Samples from one harness run, in the order the harness reported them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingSet {
    #[serde(default)]
    pub baseline: Option<String>,
    pub samples: Vec<TimingSample>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimingFile {
    Set(TimingSet),
    List(Vec<TimingSample>),
}

impl TimingSet {
    pub fn from_samples(samples: Vec<TimingSample>) -> Self {
        Self {
            baseline: None,
            samples,
        }
    }

    /// Load from JSON: either `{"baseline": ..., "samples": [...]}` or a bare array
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TimingError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| TimingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: TimingFile =
            serde_json::from_str(&json).map_err(|source| TimingError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let set = match parsed {
            TimingFile::Set(set) => set,
            TimingFile::List(samples) => Self::from_samples(samples),
        };
        tracing::debug!(path = %path.display(), samples = set.samples.len(), "loaded timings");
        Ok(set)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Pick the baseline: an explicit override wins over the file's own
    pub fn resolve_baseline<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str, TimingError> {
        explicit
            .or(self.baseline.as_deref())
            .ok_or(TimingError::MissingBaseline)
    }

    /// Overhead of every sample relative to `baseline`, in input order
    ///
    /// If several samples share the baseline's name, the first one is the
    /// reference and the rest are reported like any other operation.
    pub fn overhead_rows(&self, baseline: &str) -> Result<Vec<OverheadRow>, TimingError> {
        let base_index = self
            .samples
            .iter()
            .position(|s| s.operation == baseline)
            .ok_or_else(|| TimingError::BaselineNotFound(baseline.to_string()))?;
        let base = &self.samples[base_index];

        if !base.elapsed_us.is_finite() || base.elapsed_us <= 0.0 {
            return Err(TimingError::InvalidBaseline {
                operation: base.operation.clone(),
                elapsed_us: base.elapsed_us,
            });
        }

        Ok(self
            .samples
            .iter()
            .enumerate()
            .map(|(i, s)| OverheadRow {
                operation: s.operation.clone(),
                elapsed_us: s.elapsed_us,
                overhead_percent: overhead_percent(s.elapsed_us, base.elapsed_us),
                is_baseline: i == base_index,
            })
            .collect())
    }
}

pub fn overhead_percent(elapsed_us: f64, baseline_us: f64) -> f64 {
    100.0 * (elapsed_us - baseline_us) / baseline_us
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> TimingSet {
        TimingSet::from_samples(vec![
            TimingSample::new("raw array", 100.0),
            TimingSample::new("geometry access", 150.0),
            TimingSample::new("cached geometry", 90.0),
        ])
    }

    #[test]
    fn test_overhead_relative_to_baseline() {
        let rows = sample_set().overhead_rows("raw array").unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_baseline);
        assert_eq!(rows[0].overhead_percent, 0.0);
        assert!((rows[1].overhead_percent - 50.0).abs() < 1e-12);
        assert!((rows[2].overhead_percent + 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_baseline() {
        let err = sample_set().overhead_rows("nothing").unwrap_err();
        assert!(matches!(err, TimingError::BaselineNotFound(ref name) if name == "nothing"));
    }

    #[test]
    fn test_zero_baseline() {
        let set = TimingSet::from_samples(vec![TimingSample::new("empty", 0.0)]);
        assert!(matches!(
            set.overhead_rows("empty"),
            Err(TimingError::InvalidBaseline { .. })
        ));
    }

    #[test]
    fn test_resolve_baseline_prefers_explicit() {
        let mut set = sample_set();
        set.baseline = Some("raw array".to_string());
        assert_eq!(set.resolve_baseline(None).unwrap(), "raw array");
        assert_eq!(
            set.resolve_baseline(Some("cached geometry")).unwrap(),
            "cached geometry"
        );
        set.baseline = None;
        assert!(set.resolve_baseline(None).is_err());
    }

    #[test]
    fn test_repeated_baseline_name_marks_first_only() {
        let set = TimingSet::from_samples(vec![
            TimingSample::new("raw array", 100.0),
            TimingSample::new("raw array", 120.0),
        ]);
        let rows = set.overhead_rows("raw array").unwrap();
        assert!(rows[0].is_baseline);
        assert!(!rows[1].is_baseline);
        assert!((rows[1].overhead_percent - 20.0).abs() < 1e-12);
    }
}
