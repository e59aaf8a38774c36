//! Text report formatting.
//!
//! The fit summary is a fixed four-entry template:
//!
//! ```text
//! a = 1.04 +- 0.0447
//!
//! b = -0.05 +- 0.122
//!
//! chi2 = 4.2
//!
//! chi2_reduced  = 2.1
//! ```
//!
//! Numbers use the shortest representation that round-trips, always with a
//! decimal point or exponent (`2.0`, not `2`).

use crate::domain::{AxisLabels, FitResult, PointResidual};

/// Format the fit summary.
pub fn format_fit(fit: &FitResult) -> String {
    format!(
        "a = {} +- {}\n\nb = {} +- {}\n\nchi2 = {}\n\nchi2_reduced  = {}",
        fmt_num(fit.a),
        fmt_num(fit.da),
        fmt_num(fit.b),
        fmt_num(fit.db),
        fmt_num(fit.chi2),
        fmt_num(fit.chi2_reduced),
    )
}

/// Format a per-point residual table.
pub fn format_residuals(residuals: &[PointResidual], labels: &AxisLabels) -> String {
    let mut out = String::new();
    out.push_str(&format!("Residuals ({} vs {}):\n", labels.y, labels.x));

    out.push_str(
        format!(
            "{:>12} {:>12} {:>12} {:>12} {:>12} {:>8}",
            "x", "y", "dy", "y_fit", "residual", "pull"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!(
        "{:-<12} {:-<12} {:-<12} {:-<12} {:-<12} {:-<8}\n",
        "", "", "", "", "", ""
    ));

    for r in residuals {
        out.push_str(&format!(
            "{:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>8.3}\n",
            r.x, r.y, r.dy, r.y_fit, r.residual, r.pull
        ));
    }

    out
}

fn fmt_num(v: f64) -> String {
    format!("{v:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fit() -> FitResult {
        FitResult {
            a: 1.04,
            da: 0.044721359549996,
            b: -0.05,
            db: 0.122474487139159,
            chi2: 4.2,
            chi2_reduced: 2.1,
            n: 4,
        }
    }

    #[test]
    fn fit_summary_matches_template() {
        let text = format_fit(&sample_fit());
        assert_eq!(
            text,
            "a = 1.04 +- 0.044721359549996\n\n\
             b = -0.05 +- 0.122474487139159\n\n\
             chi2 = 4.2\n\n\
             chi2_reduced  = 2.1"
        );
    }

    #[test]
    fn integral_values_keep_a_decimal_point() {
        let fit = FitResult {
            a: 2.0,
            b: 0.0,
            ..sample_fit()
        };
        let text = format_fit(&fit);
        assert!(text.starts_with("a = 2.0 +- "));
        assert!(text.contains("b = 0.0 +- "));
    }

    #[test]
    fn residual_table_has_one_row_per_point() {
        let residuals = vec![
            PointResidual {
                x: 1.0,
                y: 2.0,
                dx: 0.1,
                dy: 0.5,
                y_fit: 1.5,
                residual: 0.5,
                pull: 1.0,
            };
            3
        ];
        let labels = AxisLabels {
            x: "t[s]".to_string(),
            y: "d[m]".to_string(),
        };
        let text = format_residuals(&residuals, &labels);
        assert!(text.starts_with("Residuals (d[m] vs t[s]):\n"));
        assert_eq!(text.lines().count(), 2 + 1 + 3);
    }
}
