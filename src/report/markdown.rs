//! Markdown rendering of an [`Analysis`]

use super::document::{ReportDocument, ReportError};
use crate::analysis::{Analysis, TimingReport};
use crate::estimator::BandwidthImpact;
use crate::utils::format_number;

pub const REPORT_TITLE: &str = "Geometry Overhead Analysis";

/// Fixed optimization advice appended to every report
pub const RECOMMENDATIONS: &[&str] = &[
    "Cache geometry-derived factors (Jacobian determinant, metric terms) in registers or shared memory inside a kernel instead of reloading them per access",
    "Store geometry in Float32 where accuracy allows, halving its footprint and traffic",
    "Recompute cheap geometric factors on the fly in bandwidth-bound kernels rather than streaming them from memory",
    "Split the geometry structure so each kernel loads only the fields it reads",
    "Check per-kernel register counts and cap registers where the occupancy loss outweighs the saved loads",
];

/// Render the full analysis report into a fresh document
pub fn generate_markdown(analysis: &Analysis) -> Result<ReportDocument, ReportError> {
    let mut doc = ReportDocument::new();

    doc.append_section(REPORT_TITLE, 1)?;
    doc.append_paragraph(&format!(
        "**Generated:** {}",
        analysis.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ))?;

    write_configurations(&mut doc, analysis)?;
    write_memory_table(&mut doc, analysis)?;
    write_bandwidth_table(&mut doc, analysis)?;
    write_occupancy_table(&mut doc, analysis)?;

    doc.append_section("Optimization Recommendations", 2)?;
    doc.append_numbered_list(RECOMMENDATIONS)?;

    if let Some(ref timings) = analysis.timings {
        write_timing_table(&mut doc, timings)?;
    }

    write_summary(&mut doc, analysis)?;

    Ok(doc)
}

/// Render only a timing overhead table, for harness output without estimates
pub fn generate_timing_markdown(timings: &TimingReport) -> Result<ReportDocument, ReportError> {
    let mut doc = ReportDocument::new();
    doc.append_section("Geometry Access Timing Overhead", 1)?;
    write_timing_table(&mut doc, timings)?;
    Ok(doc)
}

fn write_configurations(doc: &mut ReportDocument, analysis: &Analysis) -> Result<(), ReportError> {
    doc.append_section("Configurations", 2)?;

    for config in &analysis.configurations {
        doc.append_section(&config.name, 3)?;
        if !config.description.is_empty() {
            doc.append_paragraph(&config.description)?;
        }
        doc.append_bullet_list(&[
            format!("Horizontal elements: {}", format_number(config.horizontal_elements)),
            format!(
                "Quadrature points per element: {}x{}",
                config.quadrature_points_per_element, config.quadrature_points_per_element
            ),
            format!("Points per level: {}", format_count(config.points_per_level())),
            format!("Vertical levels: {}", config.vertical_levels),
            format!("Total points: {}", format_count(config.total_points())),
            format!("State variables: {}", config.variable_count),
        ])?;
    }

    Ok(())
}

fn format_count(count: Option<i64>) -> String {
    count.map_or_else(|| "overflow".to_string(), format_number)
}

fn write_memory_table(doc: &mut ReportDocument, analysis: &Analysis) -> Result<(), ReportError> {
    doc.append_section("Memory Footprint Analysis", 2)?;
    doc.append_paragraph(&format!(
        "Geometry storage at {} bytes per point compared with the prognostic state, {} auxiliary fields and {:.1}x temporary storage.",
        analysis.constants.bytes_per_geometry_point,
        analysis.constants.aux_field_count,
        analysis.constants.temp_multiplier
    ))?;

    let rows: Vec<Vec<String>> = analysis
        .results
        .iter()
        .map(|r| {
            vec![
                r.config_name.clone(),
                format!("{:.2}", r.geometry_mb),
                format!("{:.2}", r.state_mb),
                format!("{:.2}", r.aux_mb),
                format!("{:.2}", r.temp_mb),
                format!("{:.2}", r.total_mb),
                format!("{:.1}%", r.geometry_share_percent),
            ]
        })
        .collect();

    doc.append_table(
        &[
            "Config",
            "Geometry MB",
            "State MB",
            "Aux MB",
            "Temp MB",
            "Total MB",
            "Geometry Share",
        ],
        &rows,
    )
}

fn write_bandwidth_table(doc: &mut ReportDocument, analysis: &Analysis) -> Result<(), ReportError> {
    doc.append_section("Bandwidth and Computational Impact", 2)?;

    let rows: Vec<Vec<String>> = analysis
        .results
        .iter()
        .map(|r| {
            vec![
                r.config_name.clone(),
                format!("{:.2}x", r.bandwidth_multiplier),
                r.bandwidth_impact.to_string(),
            ]
        })
        .collect();

    doc.append_table(&["Config", "Compute Intensity", "Bandwidth Impact"], &rows)
}

fn write_occupancy_table(doc: &mut ReportDocument, analysis: &Analysis) -> Result<(), ReportError> {
    let c = &analysis.constants;
    let occ = &analysis.occupancy;

    doc.append_section("Register Pressure and Occupancy", 2)?;
    doc.append_table(
        &["Metric", "Value"],
        &[
            vec!["Base registers per thread".to_string(), c.base_registers.to_string()],
            vec![
                "Geometry overhead registers".to_string(),
                c.overhead_registers.to_string(),
            ],
            vec![
                "Registers with geometry".to_string(),
                c.base_registers.saturating_add(c.overhead_registers).to_string(),
            ],
            vec![
                "Occupancy without geometry".to_string(),
                format!("{}%", occ.without_percent),
            ],
            vec![
                "Occupancy with geometry".to_string(),
                format!("{}%", occ.with_percent),
            ],
        ],
    )
}

fn write_timing_table(doc: &mut ReportDocument, timings: &TimingReport) -> Result<(), ReportError> {
    doc.append_section("Timing Benchmarks", 2)?;
    doc.append_paragraph(&format!("Overhead relative to `{}`.", timings.baseline))?;

    let rows: Vec<Vec<String>> = timings
        .rows
        .iter()
        .map(|r| {
            vec![
                r.operation.clone(),
                format!("{:.2}", r.elapsed_us),
                if r.is_baseline {
                    "baseline".to_string()
                } else {
                    format!("{:+.1}%", r.overhead_percent)
                },
            ]
        })
        .collect();

    doc.append_table(&["Operation", "Time (us)", "Overhead"], &rows)
}

fn write_summary(doc: &mut ReportDocument, analysis: &Analysis) -> Result<(), ReportError> {
    doc.append_section("Summary", 2)?;

    doc.append_section("Memory", 3)?;
    let mut memory: Vec<String> = analysis
        .results
        .iter()
        .map(|r| {
            format!(
                "{}: {:.2} MB of geometry in {:.2} MB total ({:.1}%)",
                r.config_name, r.geometry_mb, r.total_mb, r.geometry_share_percent
            )
        })
        .collect();
    if let Some(largest) = analysis.largest_geometry_share() {
        memory.push(format!(
            "Largest geometry share: {} ({:.1}%)",
            largest.config_name, largest.geometry_share_percent
        ));
    }
    doc.append_bullet_list(&memory)?;

    doc.append_section("Bandwidth", 3)?;
    let bandwidth: Vec<String> = [
        BandwidthImpact::Significant,
        BandwidthImpact::Moderate,
        BandwidthImpact::Reasonable,
    ]
    .iter()
    .filter_map(|impact| {
        let names: Vec<&str> = analysis
            .results
            .iter()
            .filter(|r| r.bandwidth_impact == *impact)
            .map(|r| r.config_name.as_str())
            .collect();
        (!names.is_empty()).then(|| format!("{}: {}", impact, names.join(", ")))
    })
    .collect();
    doc.append_bullet_list(&bandwidth)?;

    doc.append_section("Occupancy", 3)?;
    let mut occupancy = vec![format!(
        "Occupancy drops from {}% to {}% ({} points) with {} extra registers per thread",
        analysis.occupancy.without_percent,
        analysis.occupancy.with_percent,
        analysis.occupancy.drop_percent(),
        analysis.constants.overhead_registers
    )];
    if let Some(worst) = analysis.timings.as_ref().and_then(|t| t.worst()) {
        occupancy.push(format!(
            "Largest measured overhead: {} ({:+.1}%)",
            worst.operation, worst.overhead_percent
        ));
    }
    doc.append_bullet_list(&occupancy)?;

    Ok(())
}
