//! Input/output helpers.
//!
//! - material catalog JSON read/write (`catalog`)
//!
//! Report exports live in `crate::exporters`.

pub mod catalog;

pub use catalog::*;
