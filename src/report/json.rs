//! JSON output for scripted consumers

use crate::analysis::Analysis;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn generate_json(analysis: &Analysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Save the analysis as pretty JSON, creating parent directories
pub fn save_json<P: AsRef<Path>>(analysis: &Analysis, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, generate_json(analysis)?)
        .with_context(|| format!("Failed to write JSON results to {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote JSON results");
    Ok(())
}
