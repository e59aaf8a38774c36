//! Closed-form weighted least squares for `y = a·x + b`.
//!
//! Only the y uncertainties enter the weights (`w_i = 1/dy_i²`); the x
//! uncertainties are carried along for plotting but do not affect the fit.
//!
//! Formulae follow Bevington & Robinson, ch. 6:
//!
//! ```text
//! a  = (S·Sxy − Sx·Sy) / Δ        da = sqrt(S / Δ)
//! b  = (Sxx·Sy − Sx·Sxy) / Δ      db = sqrt(Sxx / Δ)
//! chi2 = Σ ((y_i − b − a·x_i) / dy_i)²,   chi2_reduced = chi2 / (N − 2)
//! ```
//!
//! Results are rounded: `a`, `b`, `chi2` and `chi2_reduced` to 15 decimal
//! places, `da` and `db` to 17. `chi2` is computed from the rounded `a`/`b`.
//!
//! Δ and the numerators are evaluated from sums centered on the weighted mean
//! of x (see `math::sums`), so x values on a large offset fit as well as
//! values near zero.

use log::debug;

use crate::domain::{DataTable, FitResult};
use crate::error::FitError;
use crate::math::{WeightedSums, round_to};

/// Minimum number of points; a two-parameter fit needs `N − 2 > 0`.
pub const MIN_POINTS: usize = 3;

const COEF_DIGITS: usize = 15;
const ERR_DIGITS: usize = 17;

/// Fit a straight line to a validated table.
pub fn fit_linear(table: &DataTable) -> Result<FitResult, FitError> {
    let n = table.len();
    if n < MIN_POINTS {
        return Err(FitError::InsufficientData { n });
    }

    let sums = WeightedSums::accumulate(&table.x, &table.y, &table.dy);
    let delta = sums.delta();
    debug!("weighted sums: {sums:?}, delta={delta:e}");
    if sums.is_degenerate() {
        return Err(FitError::DegenerateFit { delta });
    }

    // (S·Sxy − Sx·Sy)/Δ and (Sxx·Sy − Sx·Sxy)/Δ, rearranged over centered sums.
    let slope = sums.scy / sums.sc;
    let a = round_to(slope, COEF_DIGITS);
    let b = round_to((sums.sy - slope * sums.sx) / sums.s, COEF_DIGITS);
    let da = round_to((sums.s / delta).sqrt(), ERR_DIGITS);
    let db = round_to((sums.sxx / delta).sqrt(), ERR_DIGITS);

    let chi2 = round_to(chi_squared(table, a, b), COEF_DIGITS);
    let chi2_reduced = round_to(chi2 / (n - 2) as f64, COEF_DIGITS);

    Ok(FitResult {
        a,
        da,
        b,
        db,
        chi2,
        chi2_reduced,
        n,
    })
}

/// Sum of squared standardized residuals of `y = a·x + b`.
pub fn chi_squared(table: &DataTable, a: f64, b: f64) -> f64 {
    table
        .x
        .iter()
        .zip(&table.y)
        .zip(&table.dy)
        .map(|((&x, &y), &dy)| ((y - b - a * x) / dy).powi(2))
        .sum()
}
