//! Terminal output for calculations and catalogs.

pub mod format;

pub use format::*;
