//! Memory footprint of geometry storage relative to the model state

use super::{validate_bytes_per_point, validate_configuration, EstimateError};
use crate::config::{Configuration, EstimatorConstants};
use crate::utils::units::bytes_to_mb;
use serde::{Deserialize, Serialize};

/// Memory footprint of one configuration, in MB
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryEstimate {
    pub geometry_mb: f64,
    pub state_mb: f64,
    pub aux_mb: f64,
    pub temp_mb: f64,
    pub total_mb: f64,
    pub geometry_share_percent: f64,
}

/// Estimate memory usage for geometry, state, auxiliary and temporary storage
///
/// The total is summed from the unrounded components; rounding is left to
/// whoever displays the numbers.
pub fn estimate_memory(
    config: &Configuration,
    bytes_per_geometry_point: f64,
    constants: &EstimatorConstants,
) -> Result<MemoryEstimate, EstimateError> {
    constants.validate()?;
    let total_points = validate_configuration(config)? as f64;
    validate_bytes_per_point(config, bytes_per_geometry_point)?;

    let value_bytes = constants.bytes_per_value as f64;

    let geometry_bytes = total_points * bytes_per_geometry_point;
    let state_bytes = total_points * config.variable_count as f64 * value_bytes;
    let aux_bytes = total_points * constants.aux_field_count as f64 * value_bytes;
    let temp_bytes = state_bytes * constants.temp_multiplier;

    let geometry_mb = bytes_to_mb(geometry_bytes);
    let state_mb = bytes_to_mb(state_bytes);
    let aux_mb = bytes_to_mb(aux_bytes);
    let temp_mb = bytes_to_mb(temp_bytes);
    let total_mb = geometry_mb + state_mb + aux_mb + temp_mb;

    let geometry_share_percent = if total_mb > 0.0 {
        100.0 * geometry_mb / total_mb
    } else {
        0.0
    };

    Ok(MemoryEstimate {
        geometry_mb,
        state_mb,
        aux_mb,
        temp_mb,
        total_mb,
        geometry_share_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn development() -> Configuration {
        Configuration::new("Development", 30, 4, 63, 10, "")
    }

    #[test]
    fn test_development_geometry_mb() {
        let est = estimate_memory(&development(), 296.0, &EstimatorConstants::default()).unwrap();
        assert!(
            (est.geometry_mb - 8.54).abs() < 0.005,
            "Geometry MB should round to 8.54: {}",
            est.geometry_mb
        );
    }

    #[test]
    fn test_component_ratios() {
        let est = estimate_memory(&development(), 296.0, &EstimatorConstants::default()).unwrap();
        // 8 aux fields vs 10 state variables, temp is 3x state
        assert!((est.aux_mb / est.state_mb - 0.8).abs() < 1e-12);
        assert!((est.temp_mb / est.state_mb - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_levels_rejected() {
        let mut config = development();
        config.vertical_levels = 0;
        let err = estimate_memory(&config, 296.0, &EstimatorConstants::default()).unwrap_err();
        assert!(err.to_string().contains("vertical_levels"));
    }

    #[test]
    fn test_non_positive_bytes_rejected() {
        assert!(estimate_memory(&development(), 0.0, &EstimatorConstants::default()).is_err());
        assert!(estimate_memory(&development(), -4.0, &EstimatorConstants::default()).is_err());
        assert!(
            estimate_memory(&development(), f64::INFINITY, &EstimatorConstants::default()).is_err()
        );
    }

    #[test]
    fn test_negative_temp_multiplier_rejected() {
        let constants = EstimatorConstants {
            temp_multiplier: -2.0,
            ..Default::default()
        };
        let err = estimate_memory(&development(), 296.0, &constants).unwrap_err();
        assert!(matches!(
            err,
            EstimateError::InvalidConstant { field: "temp_multiplier", .. }
        ));
    }
}
