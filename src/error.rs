//! Error types.
//!
//! - `FitError` is the typed failure of a single fit run (parse, validate,
//!   estimate, plot, export).
//! - `AppError` is the process-level error: a message plus the exit code the
//!   binary returns.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::FieldRole;

/// Everything that can go wrong while turning an input file into a fit.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("Input file error: Data lists are not the same length.")]
    ShapeMismatch,

    #[error("Input file error: '{token}' is not a valid number.")]
    NumericParse { token: String },

    #[error("Input file error: Not all uncertainties are positive ({role} = {value}).")]
    NonPositiveUncertainty { role: FieldRole, value: f64 },

    #[error("Input file error: {0}")]
    Tag(String),

    #[error("Input file error: {0}")]
    Layout(String),

    #[error("Fit error: at least 3 data points are required, got {n}.")]
    InsufficientData { n: usize },

    #[error("Fit error: weighted determinant is zero (delta = {delta:e}); x values are degenerate.")]
    DegenerateFit { delta: f64 },

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FitError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FitError::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit code used when this error ends the process.
    pub fn exit_code(&self) -> u8 {
        match self {
            FitError::ShapeMismatch
            | FitError::NumericParse { .. }
            | FitError::NonPositiveUncertainty { .. }
            | FitError::Tag(_)
            | FitError::Layout(_)
            | FitError::Io { .. } => 2,
            FitError::InsufficientData { .. } => 3,
            FitError::DegenerateFit { .. } | FitError::Plot(_) => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
