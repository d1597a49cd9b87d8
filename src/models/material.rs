//! Finishing materials and their unit coverage.
//!
//! Every material is sold in discrete units (a roll, a box, a pack). The only
//! numbers the calculator needs are the price of one unit and the area one unit
//! covers; the per-kind dimensions are kept for display and export.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard wallpaper roll width (m).
pub const DEFAULT_ROLL_WIDTH: f64 = 0.53;
/// Standard wallpaper roll length (m).
pub const DEFAULT_ROLL_LENGTH: f64 = 10.05;
/// Default tile side (m).
pub const DEFAULT_TILE_SIDE: f64 = 0.3;
/// Default laminate plank width (m).
pub const DEFAULT_PLANK_WIDTH: f64 = 0.193;
/// Default laminate plank length (m).
pub const DEFAULT_PLANK_LENGTH: f64 = 1.380;

/// Kind-specific dimensions of a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MaterialKind {
    /// Coverage per unit is given directly.
    Generic,
    Wallpaper {
        roll_width: f64,
        roll_length: f64,
    },
    Tile {
        tiles_per_box: u32,
        tile_width: f64,
        tile_height: f64,
    },
    Laminate {
        planks_per_pack: u32,
        plank_width: f64,
        plank_length: f64,
    },
}

impl MaterialKind {
    /// Word used for one purchase unit.
    pub fn unit_label(&self) -> &'static str {
        match self {
            MaterialKind::Generic => "unit",
            MaterialKind::Wallpaper { .. } => "roll",
            MaterialKind::Tile { .. } => "box",
            MaterialKind::Laminate { .. } => "pack",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialKind::Generic => "Material",
            MaterialKind::Wallpaper { .. } => "Wallpaper",
            MaterialKind::Tile { .. } => "Tile",
            MaterialKind::Laminate { .. } => "Laminate",
        }
    }
}

/// A finishing material: price per unit and area covered by one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub price_per_unit: f64,
    /// Derived from the kind's dimensions except for `Generic` materials.
    #[serde(default)]
    pub unit_coverage: f64,
    #[serde(flatten)]
    pub kind: MaterialKind,
}

impl Material {
    /// A material with directly specified coverage (m² per unit).
    pub fn new(name: impl Into<String>, price_per_unit: f64, unit_coverage: f64) -> Result<Self, AppError> {
        let name = name.into();
        validate_name(&name)?;
        validate_price(price_per_unit)?;
        positive("Unit coverage", unit_coverage)?;
        Ok(Self {
            name,
            price_per_unit,
            unit_coverage,
            kind: MaterialKind::Generic,
        })
    }

    /// Wallpaper sold by the roll; one roll covers `roll_width × roll_length`.
    pub fn wallpaper(
        name: impl Into<String>,
        price_per_roll: f64,
        roll_width: f64,
        roll_length: f64,
    ) -> Result<Self, AppError> {
        let name = name.into();
        validate_name(&name)?;
        validate_price(price_per_roll)?;
        positive("Roll width", roll_width)?;
        positive("Roll length", roll_length)?;
        Ok(Self {
            name,
            price_per_unit: price_per_roll,
            unit_coverage: roll_width * roll_length,
            kind: MaterialKind::Wallpaper { roll_width, roll_length },
        })
    }

    /// Wallpaper with the standard 0.53 × 10.05 m roll.
    pub fn wallpaper_standard(name: impl Into<String>, price_per_roll: f64) -> Result<Self, AppError> {
        Self::wallpaper(name, price_per_roll, DEFAULT_ROLL_WIDTH, DEFAULT_ROLL_LENGTH)
    }

    /// Tile sold by the box.
    pub fn tile(
        name: impl Into<String>,
        price_per_box: f64,
        tiles_per_box: u32,
        tile_width: f64,
        tile_height: f64,
    ) -> Result<Self, AppError> {
        let name = name.into();
        validate_name(&name)?;
        validate_price(price_per_box)?;
        validate_count("Tiles per box", tiles_per_box)?;
        positive("Tile width", tile_width)?;
        positive("Tile height", tile_height)?;
        Ok(Self {
            name,
            price_per_unit: price_per_box,
            unit_coverage: tile_width * tile_height * f64::from(tiles_per_box),
            kind: MaterialKind::Tile {
                tiles_per_box,
                tile_width,
                tile_height,
            },
        })
    }

    /// Tile with 0.3 × 0.3 m pieces.
    pub fn tile_standard(name: impl Into<String>, price_per_box: f64, tiles_per_box: u32) -> Result<Self, AppError> {
        Self::tile(name, price_per_box, tiles_per_box, DEFAULT_TILE_SIDE, DEFAULT_TILE_SIDE)
    }

    /// Laminate sold by the pack.
    pub fn laminate(
        name: impl Into<String>,
        price_per_pack: f64,
        planks_per_pack: u32,
        plank_width: f64,
        plank_length: f64,
    ) -> Result<Self, AppError> {
        let name = name.into();
        validate_name(&name)?;
        validate_price(price_per_pack)?;
        validate_count("Planks per pack", planks_per_pack)?;
        positive("Plank width", plank_width)?;
        positive("Plank length", plank_length)?;
        Ok(Self {
            name,
            price_per_unit: price_per_pack,
            unit_coverage: plank_width * plank_length * f64::from(planks_per_pack),
            kind: MaterialKind::Laminate {
                planks_per_pack,
                plank_width,
                plank_length,
            },
        })
    }

    /// Laminate with 0.193 × 1.380 m planks.
    pub fn laminate_standard(name: impl Into<String>, price_per_pack: f64, planks_per_pack: u32) -> Result<Self, AppError> {
        Self::laminate(
            name,
            price_per_pack,
            planks_per_pack,
            DEFAULT_PLANK_WIDTH,
            DEFAULT_PLANK_LENGTH,
        )
    }

    /// Re-check invariants after deserialization and recompute the coverage
    /// from the kind's dimensions, so a catalog cannot carry a stale value.
    pub fn validated(self) -> Result<Self, AppError> {
        match self.kind {
            MaterialKind::Generic => Self::new(self.name, self.price_per_unit, self.unit_coverage),
            MaterialKind::Wallpaper { roll_width, roll_length } => {
                Self::wallpaper(self.name, self.price_per_unit, roll_width, roll_length)
            }
            MaterialKind::Tile {
                tiles_per_box,
                tile_width,
                tile_height,
            } => Self::tile(self.name, self.price_per_unit, tiles_per_box, tile_width, tile_height),
            MaterialKind::Laminate {
                planks_per_pack,
                plank_width,
                plank_length,
            } => Self::laminate(self.name, self.price_per_unit, planks_per_pack, plank_width, plank_length),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MaterialKind::Generic => write!(
                f,
                "{} - {} per unit (coverage: {}m²)",
                self.name, self.price_per_unit, self.unit_coverage
            ),
            MaterialKind::Wallpaper { roll_width, roll_length } => write!(
                f,
                "Wallpaper '{}' - {}/roll ({roll_width}×{roll_length}m)",
                self.name, self.price_per_unit
            ),
            MaterialKind::Tile {
                tiles_per_box,
                tile_width,
                tile_height,
            } => write!(
                f,
                "Tile '{}' - {}/box ({tiles_per_box}pcs, {tile_width}×{tile_height}m)",
                self.name, self.price_per_unit
            ),
            MaterialKind::Laminate {
                planks_per_pack,
                plank_width,
                plank_length,
            } => write!(
                f,
                "Laminate '{}' - {}/pack ({planks_per_pack}pcs, {plank_width}×{plank_length}m)",
                self.name, self.price_per_unit
            ),
        }
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::invalid("Material name must not be empty"));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::invalid(format!(
            "Price per unit must be a non-negative number (got {price})"
        )));
    }
    Ok(())
}

fn validate_count(what: &str, count: u32) -> Result<(), AppError> {
    if count == 0 {
        return Err(AppError::invalid(format!("{what} must be at least 1")));
    }
    Ok(())
}

fn positive(what: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::invalid(format!("{what} must be positive (got {value})")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallpaper_coverage_is_roll_area() {
        let m = Material::wallpaper_standard("Vinyl", 1500.0).unwrap();
        assert!((m.unit_coverage - 0.53 * 10.05).abs() < 1e-12);
        assert_eq!(m.kind.unit_label(), "roll");
    }

    #[test]
    fn tile_coverage_scales_with_box_size() {
        let m = Material::tile("Ceramic", 2000.0, 10, 0.5, 0.5).unwrap();
        assert!((m.unit_coverage - 2.5).abs() < 1e-12);
    }

    #[test]
    fn laminate_standard_plank() {
        let m = Material::laminate_standard("Oak", 1200.0, 8).unwrap();
        assert!((m.unit_coverage - 0.193 * 1.380 * 8.0).abs() < 1e-12);
    }

    #[test]
    fn constructors_reject_bad_inputs() {
        assert!(Material::new("", 10.0, 1.0).is_err());
        assert!(Material::new("X", -1.0, 1.0).is_err());
        assert!(Material::new("X", 1.0, 0.0).is_err());
        assert!(Material::tile("X", 1.0, 0, 0.3, 0.3).is_err());
        assert!(Material::wallpaper("X", 1.0, f64::NAN, 10.0).is_err());
    }

    #[test]
    fn display_mentions_unit_and_dimensions() {
        let m = Material::wallpaper_standard("Vinyl", 1500.0).unwrap();
        assert_eq!(m.to_string(), "Wallpaper 'Vinyl' - 1500/roll (0.53×10.05m)");

        let t = Material::tile_standard("Ceramic", 900.0, 12).unwrap();
        assert_eq!(t.to_string(), "Tile 'Ceramic' - 900/box (12pcs, 0.3×0.3m)");
    }

    #[test]
    fn catalog_json_round_trips_through_validation() {
        let json = r#"{"name":"Oak","price_per_unit":1200.0,
            "kind":"laminate","planks_per_pack":8,"plank_width":0.193,"plank_length":1.38}"#;
        let m: Material = serde_json::from_str(json).unwrap();
        let m = m.validated().unwrap();
        assert!((m.unit_coverage - 0.193 * 1.38 * 8.0).abs() < 1e-12);
    }
}
