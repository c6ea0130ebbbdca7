pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geometry_overhead")]
#[command(about = "Memory, bandwidth and occupancy cost of per-point geometry storage", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate every configuration and write the Markdown report
    Analyze {
        /// JSON config file (defaults to the built-in configurations)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Markdown output path (overrides the config's paths)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also save the results as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Timing samples from the benchmark harness (JSON)
        #[arg(long)]
        timings: Option<PathBuf>,
        /// Operation used as the 0% reference for timing overhead
        #[arg(long)]
        baseline: Option<String>,
        /// Override geometry bytes per grid point
        #[arg(long)]
        bytes_per_point: Option<f64>,
        /// Skip the console summary
        #[arg(long)]
        quiet: bool,
    },
    /// Estimate a single configuration and print it
    Estimate {
        /// Built-in configuration name
        #[arg(long, conflicts_with_all = ["elements", "quad", "levels", "vars"])]
        preset: Option<String>,
        /// Horizontal element count
        #[arg(long, allow_negative_numbers = true)]
        elements: Option<i64>,
        /// Quadrature points per element edge
        #[arg(long, allow_negative_numbers = true)]
        quad: Option<i64>,
        /// Vertical levels
        #[arg(long, allow_negative_numbers = true)]
        levels: Option<i64>,
        /// Prognostic variables
        #[arg(long, allow_negative_numbers = true)]
        vars: Option<i64>,
        /// Override geometry bytes per grid point
        #[arg(long)]
        bytes_per_point: Option<f64>,
    },
    /// Render timing overhead relative to a baseline operation
    Overhead {
        /// Timing samples from the benchmark harness (JSON)
        #[arg(long)]
        timings: PathBuf,
        /// Baseline operation (defaults to the one recorded in the file)
        #[arg(long)]
        baseline: Option<String>,
        /// Write the table as Markdown
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List built-in configurations
    Presets,
    /// Write the default config as JSON for editing
    InitConfig {
        #[arg(long, default_value = "geometry_overhead.json")]
        output: PathBuf,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            config,
            output,
            json,
            timings,
            baseline,
            bytes_per_point,
            quiet,
        } => commands::analyze(commands::AnalyzeOptions {
            config,
            output,
            json,
            timings,
            baseline,
            bytes_per_point,
            quiet,
        }),
        Commands::Estimate {
            preset,
            elements,
            quad,
            levels,
            vars,
            bytes_per_point,
        } => commands::estimate(preset, elements, quad, levels, vars, bytes_per_point),
        Commands::Overhead {
            timings,
            baseline,
            output,
        } => commands::overhead(timings, baseline, output),
        Commands::Presets => commands::presets(),
        Commands::InitConfig { output } => commands::init_config(output),
    }
}
