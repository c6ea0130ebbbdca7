use geometry_overhead_rs::config::CONFIGURATION_PRESETS;
use geometry_overhead_rs::estimator::{
    estimate_occupancy, occupancy_for_registers, BandwidthImpact, EstimateError,
};
use geometry_overhead_rs::{Configuration, EstimatorConstants, Estimator};

fn sample_configs() -> Vec<Configuration> {
    let mut configs: Vec<Configuration> = CONFIGURATION_PRESETS.clone();
    configs.push(Configuration::new("Tiny", 1, 1, 1, 1, ""));
    configs.push(Configuration::new("Odd", 7, 3, 11, 5, ""));
    configs.push(Configuration::new("Wide", 96, 5, 200, 64, ""));
    configs
}

#[test]
fn test_total_is_sum_of_components() {
    let estimator = Estimator::default();
    for config in sample_configs() {
        for bytes in [8.0, 296.0, 1024.0] {
            let m = estimator.estimate_memory(&config, bytes).unwrap();
            let sum = m.geometry_mb + m.state_mb + m.aux_mb + m.temp_mb;
            assert!(
                (sum - m.total_mb).abs() <= 1e-9 * m.total_mb,
                "{}: {} != {}",
                config.name,
                sum,
                m.total_mb
            );
        }
    }
}

#[test]
fn test_geometry_share_matches_definition() {
    let estimator = Estimator::default();
    for config in sample_configs() {
        let m = estimator.estimate_memory(&config, 296.0).unwrap();
        let expected = 100.0 * m.geometry_mb / m.total_mb;
        assert!((m.geometry_share_percent - expected).abs() < 1e-9);
        assert!((0.0..=100.0).contains(&m.geometry_share_percent));
    }
}

#[test]
fn test_bandwidth_monotonic_in_bytes_per_point() {
    let estimator = Estimator::default();
    for config in sample_configs() {
        let mut previous = 0.0;
        for bytes in [1.0, 8.0, 64.0, 100.0, 296.0, 512.0, 4096.0] {
            let bw = estimator.estimate_bandwidth(&config, bytes).unwrap();
            assert!(bw.ratio >= previous, "{}: ratio decreased at {}", config.name, bytes);
            previous = bw.ratio;
        }
    }
}

#[test]
fn test_occupancy_always_clamped() {
    let constants = EstimatorConstants::default();
    for registers in [0, 1, 16, 32, 64, 128, 255, 1000, 10_000, u32::MAX] {
        let pct = occupancy_for_registers(registers, &constants);
        assert!((10..=100).contains(&pct), "{} registers gave {}%", registers, pct);
    }
    let occ = estimate_occupancy(0, 10_000, &constants);
    assert_eq!(occ.without_percent, 100);
    assert_eq!(occ.with_percent, 10);
}

#[test]
fn test_development_scenario() {
    let config = Configuration::new("Development", 30, 4, 63, 10, "");
    assert_eq!(config.total_points(), Some(30_240));

    let m = Estimator::default().estimate_memory(&config, 296.0).unwrap();
    assert_eq!(format!("{:.2}", m.geometry_mb), "8.54");
}

#[test]
fn test_bandwidth_scenario() {
    let config = Configuration::new("Development", 30, 4, 63, 10, "");
    let bw = Estimator::default().estimate_bandwidth(&config, 296.0).unwrap();
    assert!((bw.ratio - 5.2).abs() < 1e-12);
    assert_eq!(bw.impact, BandwidthImpact::Significant);
}

#[test]
fn test_moderate_and_reasonable_classes() {
    let estimator = Estimator::default();
    // 100 vars: (800 + 200 + 40) / 800 = 1.3
    let config = Configuration::new("Many", 1, 1, 1, 100, "");
    let bw = estimator.estimate_bandwidth(&config, 200.0).unwrap();
    assert_eq!(bw.impact, BandwidthImpact::Moderate);

    // (800 + 40 + 40) / 800 = 1.1
    let bw = estimator.estimate_bandwidth(&config, 40.0).unwrap();
    assert_eq!(bw.impact, BandwidthImpact::Reasonable);
}

#[test]
fn test_every_non_positive_field_rejected() {
    let estimator = Estimator::default();
    let base = Configuration::new("Base", 30, 4, 63, 10, "");
    let breakers: [fn(&mut Configuration); 4] = [
        |c| c.horizontal_elements = 0,
        |c| c.quadrature_points_per_element = -2,
        |c| c.vertical_levels = 0,
        |c| c.variable_count = -1,
    ];

    for mutate in breakers {
        let mut config = base.clone();
        mutate(&mut config);
        let err = estimator.estimate(&config).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidConfiguration { .. }));
        assert!(estimator.estimate_bandwidth(&config, 296.0).is_err());
    }
}

#[test]
fn test_custom_constants_flow_through() {
    let constants = EstimatorConstants {
        bytes_per_geometry_point: 148.0,
        temp_multiplier: 0.0,
        ..Default::default()
    };
    let result = Estimator::new(constants)
        .unwrap()
        .estimate(&Configuration::new("Dev", 30, 4, 63, 10, ""))
        .unwrap();
    assert_eq!(result.temp_mb, 0.0);
    assert_eq!(format!("{:.2}", result.geometry_mb), "4.27");
}
