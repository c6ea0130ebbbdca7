use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output locations for generated reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    pub output_dir: String,
    pub report_file: String,
    pub json_file: Option<String>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            output_dir: "results".to_string(),
            report_file: "geometry_overhead_analysis.md".to_string(),
            json_file: None,
        }
    }
}

impl PathConfig {
    pub fn report_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join(&self.report_file)
    }

    pub fn json_path(&self) -> Option<PathBuf> {
        self.json_file
            .as_ref()
            .map(|f| PathBuf::from(&self.output_dir).join(f))
    }
}
