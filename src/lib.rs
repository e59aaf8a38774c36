//! `linfit` library crate.
//!
//! The binary (`linfit`) is a thin wrapper around this library so that:
//!
//! - parsing and fitting are testable without spawning processes
//! - the plot output is an injected `PlotSink`, not a global side effect
//! - modules are reusable from other tools

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;

pub use app::pipeline::{FitOutcome, fit_file, fit_report};
pub use domain::{AxisLabels, DataTable, FieldRole, FitResult};
pub use error::{AppError, FitError};
