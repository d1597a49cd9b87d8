//! Domain types used throughout the calculators.
//!
//! This module defines:
//!
//! - the surface being finished (`Surface`)
//! - rectangular room geometry (`RoomDimensions`)

pub mod types;

pub use types::*;
