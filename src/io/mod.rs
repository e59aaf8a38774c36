//! Input/output helpers.
//!
//! - data-section parsing + validation (`table`)
//! - input file reading + axis labels (`ingest`)
//! - result exports (JSON/CSV) (`export`)

pub mod export;
pub mod ingest;
pub mod table;

pub use export::*;
pub use ingest::*;
pub use table::*;
