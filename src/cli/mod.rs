//! Command-line parsing for the straight-line fitter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! parsing/fitting code.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "linfit",
    version,
    about = "Weighted least-squares straight-line fit with error bars"
)]
pub struct Cli {
    /// Input file(s): data section, empty line, x and y axis label lines.
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// SVG output path for the chart.
    ///
    /// With several inputs each chart is prefixed with its input's file stem.
    #[arg(long, env = "LINFIT_PLOT", default_value = crate::plot::DEFAULT_PLOT_FILE)]
    pub plot: PathBuf,

    /// Do not render a chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (pixels).
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Export the fit result and axis labels to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Export per-point fitted values and residuals to CSV.
    #[arg(long = "export-residuals", value_name = "CSV")]
    pub export_residuals: Option<PathBuf>,

    /// Print a residual table after the fit summary.
    #[arg(long)]
    pub residuals: bool,
}
