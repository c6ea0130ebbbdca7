use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One model resolution to estimate
///
/// Counts are signed so that malformed input (zero or negative values from a
/// config file or the command line) reaches the estimator and is rejected
/// there rather than being silently wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub name: String,
    pub horizontal_elements: i64,
    pub quadrature_points_per_element: i64,
    pub vertical_levels: i64,
    pub variable_count: i64,
    #[serde(default)]
    pub description: String,
}

impl Configuration {
    pub fn new(
        name: &str,
        horizontal_elements: i64,
        quadrature_points_per_element: i64,
        vertical_levels: i64,
        variable_count: i64,
        description: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            horizontal_elements,
            quadrature_points_per_element,
            vertical_levels,
            variable_count,
            description: description.to_string(),
        }
    }

    /// Quadrature points on a single horizontal level, `None` on overflow
    pub fn points_per_level(&self) -> Option<i64> {
        self.horizontal_elements
            .checked_mul(self.quadrature_points_per_element)?
            .checked_mul(self.quadrature_points_per_element)
    }

    /// Quadrature points across the full column, `None` on overflow
    pub fn total_points(&self) -> Option<i64> {
        self.points_per_level()?.checked_mul(self.vertical_levels)
    }
}

/// Built-in configurations, in report order
pub static CONFIGURATION_PRESETS: Lazy<Vec<Configuration>> = Lazy::new(|| {
    vec![
        Configuration::new(
            "Development",
            30,
            4,
            63,
            10,
            "Small test configuration for local development",
        ),
        Configuration::new(
            "Production",
            5400,
            4,
            63,
            20,
            "Cubed sphere with 30x30 elements per panel, typical climate run",
        ),
        Configuration::new(
            "High Resolution",
            21_600,
            4,
            127,
            25,
            "Cubed sphere with 60x60 elements per panel and a deep atmosphere",
        ),
    ]
});

/// Look up a built-in configuration by name (case-insensitive)
pub fn get_configuration(name: &str) -> anyhow::Result<&'static Configuration> {
    CONFIGURATION_PRESETS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown configuration: {}. Available: {:?}",
                name,
                CONFIGURATION_PRESETS
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
            )
        })
}
