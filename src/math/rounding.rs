//! Decimal rounding of binary floats.
//!
//! `round_to(v, k)` returns the double closest to `v` rounded to `k` decimal
//! places. Rounding goes through the exact decimal expansion that `format!`
//! produces for a fixed precision, so halfway cases are decided on the true
//! binary value rather than on a scaled (and already rounded) product like
//! `(v * 10^k).round() / 10^k` would.

/// Round `value` to `digits` decimal places.
///
/// Non-finite values are returned unchanged.
pub fn round_to(value: f64, digits: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.digits$}").parse().unwrap_or(value)
}
