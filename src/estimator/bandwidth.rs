//! Compute intensity penalty of streaming geometry alongside the state

use super::{validate_bytes_per_point, validate_configuration, EstimateError};
use crate::config::{Configuration, EstimatorConstants};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BandwidthImpact {
    Significant,
    Moderate,
    Reasonable,
}

impl BandwidthImpact {
    /// Three-way threshold classification of a bytes-moved ratio
    pub fn classify(ratio: f64, constants: &EstimatorConstants) -> Self {
        if ratio > constants.significant_ratio {
            BandwidthImpact::Significant
        } else if ratio > constants.moderate_ratio {
            BandwidthImpact::Moderate
        } else {
            BandwidthImpact::Reasonable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BandwidthImpact::Significant => "Significant",
            BandwidthImpact::Moderate => "Moderate",
            BandwidthImpact::Reasonable => "Reasonable",
        }
    }
}

impl fmt::Display for BandwidthImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandwidthEstimate {
    /// Bytes moved per point with geometry, over bytes moved for state alone
    pub ratio: f64,
    pub impact: BandwidthImpact,
}

/// Estimate how much extra memory traffic geometry access adds per point
pub fn estimate_bandwidth(
    config: &Configuration,
    bytes_per_geometry_point: f64,
    constants: &EstimatorConstants,
) -> Result<BandwidthEstimate, EstimateError> {
    constants.validate()?;
    validate_configuration(config)?;
    validate_bytes_per_point(config, bytes_per_geometry_point)?;

    let state_bytes = config.variable_count as f64 * constants.bytes_per_value as f64;
    let aux_bytes = constants.bandwidth_aux_bytes() as f64;
    let ratio = (state_bytes + bytes_per_geometry_point + aux_bytes) / state_bytes;

    Ok(BandwidthEstimate {
        ratio,
        impact: BandwidthImpact::classify(ratio, constants),
    })
}
