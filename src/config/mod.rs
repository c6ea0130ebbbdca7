pub mod constants;
pub mod grid;
pub mod paths;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub use constants::EstimatorConstants;
pub use grid::{get_configuration, Configuration, CONFIGURATION_PRESETS};
pub use paths::PathConfig;

/// Main configuration for a report run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub constants: EstimatorConstants,
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default = "default_configurations")]
    pub configurations: Vec<Configuration>,
    /// Timing sample used as the 0% reference in overhead tables
    #[serde(default)]
    pub baseline_operation: Option<String>,
}

fn default_configurations() -> Vec<Configuration> {
    CONFIGURATION_PRESETS.clone()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            constants: EstimatorConstants::default(),
            paths: PathConfig::default(),
            configurations: default_configurations(),
            baseline_operation: None,
        }
    }
}

impl Config {
    /// Config restricted to a single built-in preset
    pub fn for_preset(preset: &str) -> anyhow::Result<Self> {
        let configuration = get_configuration(preset)?.clone();
        Ok(Self {
            configurations: vec![configuration],
            ..Default::default()
        })
    }

    /// Load from a JSON file; missing sections fall back to defaults
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .constants
            .validate()
            .with_context(|| format!("Invalid constants in config file {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            configurations = config.configurations.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Save as pretty-printed JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn to_dict(&self) -> anyhow::Result<HashMap<String, serde_json::Value>> {
        Ok(serde_json::from_value(serde_json::to_value(self)?)?)
    }

    pub fn from_dict(data: HashMap<String, serde_json::Value>) -> anyhow::Result<Self> {
        let json = serde_json::to_string(&data)?;
        Ok(serde_json::from_str(&json)?)
    }
}
