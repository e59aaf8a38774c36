//! Chart output.
//!
//! The pipeline never draws directly: it hands a `PlotRequest` to a
//! `PlotSink`. The binary uses `SvgPlotSink`; tests can record requests
//! instead of touching the filesystem.

use std::path::Path;

use crate::domain::{AxisLabels, DataTable, FitResult};
use crate::error::FitError;

pub mod svg;

pub use svg::*;

/// File name used when no plot path is configured.
pub const DEFAULT_PLOT_FILE: &str = "linear_fit.svg";

/// Everything a sink needs to draw the error-bar scatter plus fitted line.
#[derive(Debug, Clone, Copy)]
pub struct PlotRequest<'a> {
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub xerr: &'a [f64],
    pub yerr: &'a [f64],
    /// `(slope, intercept)` of the fitted line.
    pub line: (f64, f64),
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub output_path: &'a Path,
}

impl<'a> PlotRequest<'a> {
    pub fn new(table: &'a DataTable, fit: &FitResult, labels: &'a AxisLabels, output_path: &'a Path) -> Self {
        Self {
            x: &table.x,
            y: &table.y,
            xerr: &table.dx,
            yerr: &table.dy,
            line: (fit.a, fit.b),
            x_label: &labels.x,
            y_label: &labels.y,
            output_path,
        }
    }
}

/// Destination for rendered fits.
pub trait PlotSink {
    fn render(&mut self, request: &PlotRequest<'_>) -> Result<(), FitError>;
}
