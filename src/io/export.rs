//! Export fit results.
//!
//! - JSON: coefficients, uncertainties, chi2 and axis labels for scripts
//! - CSV: per-point fitted values and residuals for spreadsheets

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::domain::{AxisLabels, FitResult, PointResidual};
use crate::error::FitError;

/// JSON document written by `--export-json`.
#[derive(Debug, Clone, Serialize)]
pub struct FitExport<'a> {
    pub tool: &'static str,
    pub input: String,
    pub labels: &'a AxisLabels,
    pub fit: &'a FitResult,
}

/// Write the fit result as pretty-printed JSON.
pub fn write_fit_json(path: &Path, input: &Path, fit: &FitResult, labels: &AxisLabels) -> Result<(), FitError> {
    let file = File::create(path).map_err(|e| FitError::io(path, e))?;

    let doc = FitExport {
        tool: "linfit",
        input: input.display().to_string(),
        labels,
        fit,
    };

    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &doc).map_err(|e| FitError::io(path, e.into()))?;
    out.flush().map_err(|e| FitError::io(path, e))?;

    info!("wrote fit JSON to '{}'", path.display());
    Ok(())
}

/// Write per-point residuals to a CSV file.
pub fn write_residuals_csv(path: &Path, residuals: &[PointResidual]) -> Result<(), FitError> {
    let file = File::create(path).map_err(|e| FitError::io(path, e))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "x,y,dx,dy,y_fit,residual,pull").map_err(|e| FitError::io(path, e))?;
    for r in residuals {
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            r.x, r.y, r.dx, r.dy, r.y_fit, r.residual, r.pull
        )
        .map_err(|e| FitError::io(path, e))?;
    }
    out.flush().map_err(|e| FitError::io(path, e))?;

    info!("wrote residuals CSV to '{}'", path.display());
    Ok(())
}
