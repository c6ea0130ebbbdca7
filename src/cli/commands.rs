//! CLI command implementations

use anyhow::{Context, Result};
use geometry_overhead_rs::benchmarks::TimingSet;
use geometry_overhead_rs::config::{get_configuration, CONFIGURATION_PRESETS};
use geometry_overhead_rs::report::{console, generate_markdown, generate_timing_markdown, json};
use geometry_overhead_rs::utils::format_number;
use geometry_overhead_rs::{Analysis, Config, Configuration, EstimatorConstants, Estimator, TimingReport};
use std::path::PathBuf;

pub struct AnalyzeOptions {
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub timings: Option<PathBuf>,
    pub baseline: Option<String>,
    pub bytes_per_point: Option<f64>,
    pub quiet: bool,
}

pub fn analyze(opts: AnalyzeOptions) -> Result<()> {
    let mut config = match opts.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(bytes) = opts.bytes_per_point {
        config.constants.bytes_per_geometry_point = bytes;
    }

    let mut analysis = Analysis::run(&config).context("Failed to estimate configurations")?;

    if let Some(ref path) = opts.timings {
        let set = TimingSet::load(path)?;
        let baseline = opts
            .baseline
            .as_deref()
            .or(config.baseline_operation.as_deref());
        analysis = analysis.with_timings(TimingReport::from_set(&set, baseline)?);
    }

    if !opts.quiet {
        console::print_summary(&analysis);
        println!();
    }

    let report_path = opts.output.unwrap_or_else(|| config.paths.report_path());
    let mut doc = generate_markdown(&analysis)?;
    doc.write_document(&report_path)?;
    println!("Report written to {}", report_path.display());

    if let Some(json_path) = opts.json.or_else(|| config.paths.json_path()) {
        json::save_json(&analysis, &json_path)?;
        println!("JSON results written to {}", json_path.display());
    }

    Ok(())
}

pub fn estimate(
    preset: Option<String>,
    elements: Option<i64>,
    quad: Option<i64>,
    levels: Option<i64>,
    vars: Option<i64>,
    bytes_per_point: Option<f64>,
) -> Result<()> {
    let configuration = match preset {
        Some(name) => get_configuration(&name)?.clone(),
        None => {
            let require = |value: Option<i64>, flag: &str| {
                value.ok_or_else(|| anyhow::anyhow!("--{} is required without --preset", flag))
            };
            Configuration::new(
                "Custom",
                require(elements, "elements")?,
                require(quad, "quad")?,
                require(levels, "levels")?,
                require(vars, "vars")?,
                "Configuration given on the command line",
            )
        }
    };

    let mut constants = EstimatorConstants::default();
    if let Some(bytes) = bytes_per_point {
        constants.bytes_per_geometry_point = bytes;
    }

    let result = Estimator::new(constants)?.estimate(&configuration)?;
    console::print_result(&result);
    Ok(())
}

pub fn overhead(timings: PathBuf, baseline: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let set = TimingSet::load(&timings)?;
    if set.is_empty() {
        anyhow::bail!("No timing samples in {}", timings.display());
    }
    let report = TimingReport::from_set(&set, baseline.as_deref())?;
    console::print_timings(&report);

    if let Some(path) = output {
        let mut doc = generate_timing_markdown(&report)?;
        doc.write_document(&path)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

pub fn presets() -> Result<()> {
    println!("Built-in configurations:");
    for preset in CONFIGURATION_PRESETS.iter() {
        println!(
            "  {:16} {:>7} elements  {}x{} quad  {:>4} levels  {:>3} vars  ({} points)",
            preset.name,
            preset.horizontal_elements,
            preset.quadrature_points_per_element,
            preset.quadrature_points_per_element,
            preset.vertical_levels,
            preset.variable_count,
            preset.total_points().map_or_else(|| "overflow".to_string(), format_number)
        );
        if !preset.description.is_empty() {
            println!("  {:16} {}", "", preset.description);
        }
    }
    Ok(())
}

pub fn init_config(output: PathBuf) -> Result<()> {
    Config::default().save(&output)?;
    println!("Default config written to {}", output.display());
    Ok(())
}
