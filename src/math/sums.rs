//! Weighted sums for a straight-line least squares fit.
//!
//! With weights `w_i = 1 / σ_i²` (σ = y uncertainty) the normal equations of
//! `y = a·x + b` only need five sums:
//!
//! ```text
//! S   = Σ 1/σ²      Sx  = Σ x/σ²      Sy = Σ y/σ²
//! Sxx = Σ x²/σ²     Sxy = Σ x·y/σ²
//! ```
//!
//! and the determinant `Δ = S·Sxx − Sx²`, which is never negative.
//!
//! `S·Sxx − Sx²` cancels badly when x sits on a large offset (e.g. Julian
//! dates), so Δ and the slope numerator are taken from sums centered on the
//! weighted mean `x̄ = Sx/S`:
//!
//! ```text
//! Sc  = Σ (x − x̄)²/σ²      Δ = S·Sc
//! Scy = Σ (x − x̄)·y/σ²     S·Sxy − Sx·Sy = S·Scy
//! ```

/// Spread below this many ulps of `max|x|` counts as "all x equal".
const SPREAD_ULPS: f64 = 16.0;

/// Accumulated weighted sums over a set of points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedSums {
    pub s: f64,
    pub sx: f64,
    pub sy: f64,
    pub sxx: f64,
    pub sxy: f64,
    /// `Σ (x − x̄)²/σ²`
    pub sc: f64,
    /// `Σ (x − x̄)·y/σ²`
    pub scy: f64,
    /// Largest `|x|`, the scale rounding noise in `Sc` is measured against.
    pub x_scale: f64,
}

impl WeightedSums {
    /// Accumulate the sums over parallel `x`, `y`, `sigma` slices.
    ///
    /// Slices are zipped, so the shortest one bounds the loop; callers pass
    /// equal-length columns.
    pub fn accumulate(x: &[f64], y: &[f64], sigma: &[f64]) -> Self {
        let mut sums = WeightedSums::default();
        for ((&xi, &yi), &si) in x.iter().zip(y).zip(sigma) {
            let var = si * si;
            sums.s += (1.0 / si).powi(2);
            sums.sx += xi / var;
            sums.sy += yi / var;
            sums.sxx += (xi / si).powi(2);
            sums.sxy += xi * yi / var;
            sums.x_scale = sums.x_scale.max(xi.abs());
        }

        let mean = sums.sx / sums.s;
        for ((&xi, &yi), &si) in x.iter().zip(y).zip(sigma) {
            let dev = xi - mean;
            let var = si * si;
            sums.sc += dev * dev / var;
            sums.scy += dev * yi / var;
        }
        sums
    }

    /// `Δ = S·Sxx − Sx²`, evaluated as `S·Sc`.
    pub fn delta(&self) -> f64 {
        self.s * self.sc
    }

    /// True when the weighted spread of x is indistinguishable from rounding
    /// noise at the scale of x (every x equal, up to representation).
    pub fn is_degenerate(&self) -> bool {
        let noise = SPREAD_ULPS * f64::EPSILON * self.x_scale;
        let delta = self.delta();
        !delta.is_finite() || delta <= 0.0 || self.sc <= noise * noise * self.s
    }
}
