use crate::estimator::EstimateError;
use serde::{Deserialize, Serialize};

/// Fixed coefficients used by the estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConstants {
    // Storage
    /// Bytes of coordinate/Jacobian/metric data stored per grid point
    pub bytes_per_geometry_point: f64,
    /// Bytes per stored scalar (Float64)
    pub bytes_per_value: u64,
    /// Auxiliary fields held per point in the memory estimate
    pub aux_field_count: u64,
    /// Temporary storage as a multiple of the prognostic state
    pub temp_multiplier: f64,

    // Bandwidth
    /// Auxiliary fields read per point by a typical kernel
    pub bandwidth_aux_fields: u64,
    /// Compute intensity above which the impact is "Significant"
    pub significant_ratio: f64,
    /// Compute intensity above which the impact is "Moderate"
    pub moderate_ratio: f64,

    // Registers and occupancy
    pub base_registers: u32,
    pub overhead_registers: u32,
    pub registers_per_sm: u32,
    pub max_threads_per_sm: u32,
    pub warp_size: u32,
    pub min_occupancy_percent: u32,
    pub max_occupancy_percent: u32,
}

impl Default for EstimatorConstants {
    fn default() -> Self {
        Self {
            bytes_per_geometry_point: 296.0,
            bytes_per_value: 8,
            aux_field_count: 8,
            temp_multiplier: 3.0,
            bandwidth_aux_fields: 5,
            significant_ratio: 1.5,
            moderate_ratio: 1.2,
            base_registers: 64,
            overhead_registers: 32,
            registers_per_sm: 65_536,
            max_threads_per_sm: 2048,
            warp_size: 32,
            min_occupancy_percent: 10,
            max_occupancy_percent: 100,
        }
    }
}

fn reject(field: &'static str, reason: &'static str, value: impl ToString) -> EstimateError {
    EstimateError::InvalidConstant {
        field,
        reason,
        value: value.to_string(),
    }
}

impl EstimatorConstants {
    /// Check that the coefficients keep every estimate finite and in range
    pub fn validate(&self) -> Result<(), EstimateError> {
        if !self.bytes_per_geometry_point.is_finite() || self.bytes_per_geometry_point <= 0.0 {
            return Err(reject(
                "bytes_per_geometry_point",
                "must be positive and finite",
                self.bytes_per_geometry_point,
            ));
        }
        if self.bytes_per_value == 0 {
            return Err(reject("bytes_per_value", "must be positive", self.bytes_per_value));
        }
        if !self.temp_multiplier.is_finite() || self.temp_multiplier < 0.0 {
            return Err(reject(
                "temp_multiplier",
                "must be non-negative and finite",
                self.temp_multiplier,
            ));
        }
        for (field, ratio) in [
            ("significant_ratio", self.significant_ratio),
            ("moderate_ratio", self.moderate_ratio),
        ] {
            if !ratio.is_finite() {
                return Err(reject(field, "must be finite", ratio));
            }
        }
        if self.moderate_ratio > self.significant_ratio {
            return Err(reject(
                "moderate_ratio",
                "must not exceed significant_ratio",
                self.moderate_ratio,
            ));
        }
        for (field, value) in [
            ("registers_per_sm", self.registers_per_sm),
            ("max_threads_per_sm", self.max_threads_per_sm),
            ("warp_size", self.warp_size),
        ] {
            if value == 0 {
                return Err(reject(field, "must be positive", value));
            }
        }
        if self.max_occupancy_percent > 100 {
            return Err(reject(
                "max_occupancy_percent",
                "must be at most 100",
                self.max_occupancy_percent,
            ));
        }
        if self.min_occupancy_percent > self.max_occupancy_percent {
            return Err(reject(
                "min_occupancy_percent",
                "must not exceed max_occupancy_percent",
                self.min_occupancy_percent,
            ));
        }
        Ok(())
    }

    /// Bytes of auxiliary data touched per point when streaming a kernel
    pub fn bandwidth_aux_bytes(&self) -> u64 {
        self.bandwidth_aux_fields * self.bytes_per_value
    }
}
