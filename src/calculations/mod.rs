//! Material quantity and cost calculations.
//!
//! - `MaterialCalculator`: units and cost for a material over an area, with a
//!   reserve percentage and a history of performed calculations
//! - `RoomCalculator`: floor/wall areas of a rectangular room fed into a
//!   `MaterialCalculator`
//! - `validate_positive_number`: parsing helper shared with the CLI

pub mod material;
pub mod room;
pub mod validate;

pub use material::*;
pub use room::*;
pub use validate::*;
