//! Data model: finishing materials and calculation results.

pub mod material;
pub mod result;

pub use material::*;
pub use result::*;
