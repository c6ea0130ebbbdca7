//! Geometry overhead estimation
//!
//! Converts a [`Configuration`] into memory, bandwidth and occupancy
//! estimates using only the coefficients in [`EstimatorConstants`]. Nothing
//! here performs I/O.

pub mod bandwidth;
pub mod memory;
pub mod occupancy;

use crate::config::{Configuration, EstimatorConstants};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use bandwidth::{estimate_bandwidth, BandwidthEstimate, BandwidthImpact};
pub use memory::{estimate_memory, MemoryEstimate};
pub use occupancy::{estimate_occupancy, occupancy_for_registers, OccupancyEstimate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error("invalid configuration '{name}': {field} out of range ({value})")]
    InvalidConfiguration {
        name: String,
        field: &'static str,
        value: String,
    },

    #[error("invalid estimator constant {field}: {reason}, got {value}")]
    InvalidConstant {
        field: &'static str,
        reason: &'static str,
        value: String,
    },
}

/// Reject configurations with any non-positive structural count
///
/// Returns the total point count, which must also fit in an `i64`.
pub fn validate_configuration(config: &Configuration) -> Result<i64, EstimateError> {
    let fields = [
        ("horizontal_elements", config.horizontal_elements),
        (
            "quadrature_points_per_element",
            config.quadrature_points_per_element,
        ),
        ("vertical_levels", config.vertical_levels),
        ("variable_count", config.variable_count),
    ];

    for (field, value) in fields {
        if value <= 0 {
            return Err(EstimateError::InvalidConfiguration {
                name: config.name.clone(),
                field,
                value: value.to_string(),
            });
        }
    }

    config
        .total_points()
        .ok_or_else(|| EstimateError::InvalidConfiguration {
            name: config.name.clone(),
            field: "total_points",
            value: format!(
                "{} x {}^2 x {} (overflows i64)",
                config.horizontal_elements,
                config.quadrature_points_per_element,
                config.vertical_levels
            ),
        })
}

pub(crate) fn validate_bytes_per_point(
    config: &Configuration,
    bytes_per_geometry_point: f64,
) -> Result<(), EstimateError> {
    if !bytes_per_geometry_point.is_finite() || bytes_per_geometry_point <= 0.0 {
        return Err(EstimateError::InvalidConfiguration {
            name: config.name.clone(),
            field: "bytes_per_geometry_point",
            value: bytes_per_geometry_point.to_string(),
        });
    }
    Ok(())
}

/// Every derived quantity for one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub config_name: String,
    pub total_points: i64,
    pub geometry_mb: f64,
    pub state_mb: f64,
    pub aux_mb: f64,
    pub temp_mb: f64,
    pub total_mb: f64,
    pub geometry_share_percent: f64,
    pub bandwidth_multiplier: f64,
    pub bandwidth_impact: BandwidthImpact,
    pub register_overhead: u32,
    pub occupancy_without: u32,
    pub occupancy_with: u32,
}

/// Estimator bound to a fixed, validated set of constants
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    constants: EstimatorConstants,
}

impl Estimator {
    pub fn new(constants: EstimatorConstants) -> Result<Self, EstimateError> {
        constants.validate()?;
        Ok(Self { constants })
    }

    pub fn constants(&self) -> &EstimatorConstants {
        &self.constants
    }

    pub fn estimate_memory(
        &self,
        config: &Configuration,
        bytes_per_geometry_point: f64,
    ) -> Result<MemoryEstimate, EstimateError> {
        estimate_memory(config, bytes_per_geometry_point, &self.constants)
    }

    pub fn estimate_bandwidth(
        &self,
        config: &Configuration,
        bytes_per_geometry_point: f64,
    ) -> Result<BandwidthEstimate, EstimateError> {
        estimate_bandwidth(config, bytes_per_geometry_point, &self.constants)
    }

    pub fn estimate_occupancy(
        &self,
        base_registers: u32,
        overhead_registers: u32,
    ) -> OccupancyEstimate {
        estimate_occupancy(base_registers, overhead_registers, &self.constants)
    }

    /// Run all three estimates for one configuration
    pub fn estimate(&self, config: &Configuration) -> Result<EstimateResult, EstimateError> {
        let bytes_per_point = self.constants.bytes_per_geometry_point;
        let total_points = validate_configuration(config)?;
        let memory = self.estimate_memory(config, bytes_per_point)?;
        let bandwidth = self.estimate_bandwidth(config, bytes_per_point)?;
        let occupancy = self.estimate_occupancy(
            self.constants.base_registers,
            self.constants.overhead_registers,
        );

        tracing::debug!(
            config = %config.name,
            total_mb = memory.total_mb,
            ratio = bandwidth.ratio,
            "estimated configuration"
        );

        Ok(EstimateResult {
            config_name: config.name.clone(),
            total_points,
            geometry_mb: memory.geometry_mb,
            state_mb: memory.state_mb,
            aux_mb: memory.aux_mb,
            temp_mb: memory.temp_mb,
            total_mb: memory.total_mb,
            geometry_share_percent: memory.geometry_share_percent,
            bandwidth_multiplier: bandwidth.ratio,
            bandwidth_impact: bandwidth.impact,
            register_overhead: self.constants.overhead_registers,
            occupancy_without: occupancy.without_percent,
            occupancy_with: occupancy.with_percent,
        })
    }

    /// Estimate every configuration in order, stopping at the first invalid one
    pub fn estimate_all(
        &self,
        configs: &[Configuration],
    ) -> Result<Vec<EstimateResult>, EstimateError> {
        configs.iter().map(|c| self.estimate(c)).collect()
    }
}
