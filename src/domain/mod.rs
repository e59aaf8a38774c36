//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - series roles and input orientation (`FieldRole`, `Orientation`)
//! - the validated numeric table (`DataTable`)
//! - fit outputs (`FitResult`, `AxisLabels`, `PointResidual`)
//! - the run configuration (`FitConfig`)

pub mod types;

pub use types::*;
