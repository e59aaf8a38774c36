//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - handed to a plot sink without further conversion

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// Which measured quantity a series holds.
///
/// The variant order is the order the series are laid out in after
/// normalization (`dx`, `dy`, `x`, `y`), i.e. the lexicographic order of the
/// tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRole {
    Dx,
    Dy,
    X,
    Y,
}

impl FieldRole {
    pub const ALL: [FieldRole; 4] = [FieldRole::Dx, FieldRole::Dy, FieldRole::X, FieldRole::Y];

    /// Parse a (lower-cased) tag token.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "dx" => Some(FieldRole::Dx),
            "dy" => Some(FieldRole::Dy),
            "x" => Some(FieldRole::X),
            "y" => Some(FieldRole::Y),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            FieldRole::Dx => "dx",
            FieldRole::Dy => "dy",
            FieldRole::X => "x",
            FieldRole::Y => "y",
        }
    }

    /// Uncertainty series must be strictly positive.
    pub fn is_uncertainty(self) -> bool {
        matches!(self, FieldRole::Dx | FieldRole::Dy)
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// How the data section of an input file is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Each line is one series: `x 1 2 3 ...`.
    RowMajor,
    /// Each line is one data point, after a `x y dx dy` header line.
    ColumnMajor,
}

/// One parsed series, tagged with its role.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub role: FieldRole,
    pub values: Vec<f64>,
}

/// Four parallel series of equal length `N`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub dx: Vec<f64>,
    pub dy: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl DataTable {
    /// Build a table from in-memory columns, applying the same shape and
    /// positivity rules as the file parser.
    pub fn new(x: Vec<f64>, y: Vec<f64>, dx: Vec<f64>, dy: Vec<f64>) -> Result<Self, FitError> {
        let n = x.len();
        if y.len() != n || dx.len() != n || dy.len() != n {
            return Err(FitError::ShapeMismatch);
        }
        check_uncertainties(FieldRole::Dx, &dx)?;
        check_uncertainties(FieldRole::Dy, &dy)?;
        Ok(Self { dx, dy, x, y })
    }

    /// Assemble a table from exactly one series per role.
    ///
    /// Series are sorted by role first, so input order does not matter.
    pub fn from_series(mut series: Vec<Series>) -> Result<Self, FitError> {
        series.sort_by_key(|s| s.role);

        let roles: Vec<FieldRole> = series.iter().map(|s| s.role).collect();
        if roles != FieldRole::ALL {
            let listed: Vec<&str> = roles.iter().map(|r| r.tag()).collect();
            return Err(FitError::Tag(format!(
                "expected exactly one each of dx, dy, x, y; found [{}]",
                listed.join(", ")
            )));
        }

        let mut it = series.into_iter().map(|s| s.values);
        let (Some(dx), Some(dy), Some(x), Some(y)) = (it.next(), it.next(), it.next(), it.next()) else {
            return Err(FitError::Tag("expected four series".to_string()));
        };
        Self::new(x, y, dx, dy)
    }

    /// Number of data points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Reject the first non-positive value of an uncertainty series.
pub fn check_uncertainties(role: FieldRole, values: &[f64]) -> Result<(), FitError> {
    if !role.is_uncertainty() {
        return Ok(());
    }
    match values.iter().find(|v| v.is_nan() || **v <= 0.0) {
        Some(&value) => Err(FitError::NonPositiveUncertainty { role, value }),
        None => Ok(()),
    }
}

/// Fitted coefficients of `y = a·x + b` with uncertainties and goodness of fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub a: f64,
    pub da: f64,
    pub b: f64,
    pub db: f64,
    pub chi2: f64,
    pub chi2_reduced: f64,
    /// Number of data points the fit used.
    pub n: usize,
}

impl FitResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.a * x + self.b
    }

    /// Degrees of freedom of a two-parameter fit.
    pub fn dof(&self) -> usize {
        self.n.saturating_sub(2)
    }
}

/// Axis descriptions taken from the label lines of the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
}

/// A per-point fitted value (used for residual reports and exports).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointResidual {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub y_fit: f64,
    pub residual: f64,
    /// `residual / dy`; the squares of these sum to chi2.
    pub pull: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub inputs: Vec<PathBuf>,
    /// Where the SVG chart goes; `None` disables plotting.
    pub plot_path: Option<PathBuf>,
    pub plot_width: u32,
    pub plot_height: u32,
    pub export_json: Option<PathBuf>,
    pub export_residuals: Option<PathBuf>,
    /// Append a per-point residual table to the text report.
    pub show_residuals: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            plot_path: Some(PathBuf::from(crate::plot::DEFAULT_PLOT_FILE)),
            plot_width: 640,
            plot_height: 480,
            export_json: None,
            export_residuals: None,
            show_residuals: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(role: FieldRole, values: &[f64]) -> Series {
        Series {
            role,
            values: values.to_vec(),
        }
    }

    #[test]
    fn roles_sort_like_their_tags() {
        let mut tags: Vec<&str> = FieldRole::ALL.iter().map(|r| r.tag()).collect();
        tags.sort();
        let mut roles = vec![FieldRole::Y, FieldRole::X, FieldRole::Dy, FieldRole::Dx];
        roles.sort();
        let role_tags: Vec<&str> = roles.iter().map(|r| r.tag()).collect();
        assert_eq!(tags, role_tags);
    }

    #[test]
    fn from_series_is_order_independent() {
        let table = DataTable::from_series(vec![
            series(FieldRole::Y, &[2.0, 4.0]),
            series(FieldRole::X, &[1.0, 2.0]),
            series(FieldRole::Dy, &[0.1, 0.2]),
            series(FieldRole::Dx, &[0.3, 0.4]),
        ])
        .unwrap();
        assert_eq!(table.x, vec![1.0, 2.0]);
        assert_eq!(table.y, vec![2.0, 4.0]);
        assert_eq!(table.dx, vec![0.3, 0.4]);
        assert_eq!(table.dy, vec![0.1, 0.2]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn from_series_rejects_duplicate_roles() {
        let err = DataTable::from_series(vec![
            series(FieldRole::X, &[1.0]),
            series(FieldRole::X, &[1.0]),
            series(FieldRole::Dy, &[0.1]),
            series(FieldRole::Dx, &[0.1]),
        ])
        .unwrap_err();
        assert!(matches!(err, FitError::Tag(_)));
    }

    #[test]
    fn new_rejects_ragged_and_non_positive_columns() {
        let err = DataTable::new(vec![1.0, 2.0], vec![1.0], vec![0.1, 0.1], vec![0.1, 0.1]).unwrap_err();
        assert!(matches!(err, FitError::ShapeMismatch));

        let err = DataTable::new(vec![1.0], vec![1.0], vec![0.1], vec![0.0]).unwrap_err();
        assert!(matches!(
            err,
            FitError::NonPositiveUncertainty { role: FieldRole::Dy, .. }
        ));
    }
}
