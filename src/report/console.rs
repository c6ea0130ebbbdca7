//! Terminal rendering of an [`Analysis`]

use crate::analysis::{Analysis, TimingReport};
use crate::estimator::EstimateResult;
use crate::utils::format_number;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

fn banner(title: &str) {
    println!("{}", RULE);
    println!("{}", title);
    println!("{}", RULE);
}

/// Print one configuration's estimates
pub fn print_result(result: &EstimateResult) {
    println!("{}", result.config_name);
    println!("  Total points:      {}", format_number(result.total_points));
    println!("  Geometry:          {:.2} MB", result.geometry_mb);
    println!("  State:             {:.2} MB", result.state_mb);
    println!("  Auxiliary:         {:.2} MB", result.aux_mb);
    println!("  Temporary:         {:.2} MB", result.temp_mb);
    println!("  Total:             {:.2} MB", result.total_mb);
    println!("  Geometry share:    {:.1}%", result.geometry_share_percent);
    println!(
        "  Compute intensity: {:.2}x ({})",
        result.bandwidth_multiplier, result.bandwidth_impact
    );
    println!(
        "  Occupancy:         {}% → {}% (+{} registers)",
        result.occupancy_without, result.occupancy_with, result.register_overhead
    );
}

pub fn print_timings(timings: &TimingReport) {
    banner("Timing Overhead");
    println!("  Baseline: {}", timings.baseline);
    for row in &timings.rows {
        if row.is_baseline {
            println!("  {:30} {:>12.2} us  (baseline)", row.operation, row.elapsed_us);
        } else {
            println!(
                "  {:30} {:>12.2} us  {:+.1}%",
                row.operation, row.elapsed_us, row.overhead_percent
            );
        }
    }
    println!("{}", RULE);
}

/// Print the whole analysis, in the same order as the Markdown report
pub fn print_summary(analysis: &Analysis) {
    banner("Geometry Overhead Analysis");
    println!(
        "  Geometry bytes/point: {}",
        analysis.constants.bytes_per_geometry_point
    );
    println!("  Configurations:       {}", analysis.results.len());
    println!("{}", RULE);
    println!();

    for result in &analysis.results {
        print_result(result);
        println!();
    }

    if let Some(ref timings) = analysis.timings {
        print_timings(timings);
        println!();
    }

    banner("Summary");
    if let Some(largest) = analysis.largest_geometry_share() {
        println!(
            "  Largest geometry share: {} ({:.1}%)",
            largest.config_name, largest.geometry_share_percent
        );
    }
    if let Some(smallest) = analysis.smallest_geometry_share() {
        println!(
            "  Smallest geometry share: {} ({:.1}%)",
            smallest.config_name, smallest.geometry_share_percent
        );
    }
    println!(
        "  Occupancy drop:         {} points ({}% → {}%)",
        analysis.occupancy.drop_percent(),
        analysis.occupancy.without_percent,
        analysis.occupancy.with_percent
    );
    println!("{}", RULE);
}
