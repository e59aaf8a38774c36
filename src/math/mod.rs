//! Mathematical utilities: weighted sums and decimal rounding.

pub mod rounding;
pub mod sums;

pub use rounding::*;
pub use sums::*;
