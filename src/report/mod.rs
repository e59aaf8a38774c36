//! Reporting utilities: residuals and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

use crate::domain::{DataTable, FitResult, PointResidual};

pub mod format;

pub use format::*;

/// Compute fitted values and residuals for each point.
pub fn compute_residuals(table: &DataTable, fit: &FitResult) -> Vec<PointResidual> {
    (0..table.len())
        .map(|i| {
            let (x, y, dy) = (table.x[i], table.y[i], table.dy[i]);
            let y_fit = fit.predict(x);
            let residual = y - y_fit;
            PointResidual {
                x,
                y,
                dx: table.dx[i],
                dy,
                y_fit,
                residual,
                pull: residual / dy,
            }
        })
        .collect()
}
