//! Line fitting.
//!
//! - `linear`: closed-form weighted least squares for `y = a·x + b`

pub mod linear;

pub use linear::*;
