//! Floor and wall areas of a rectangular room.

use std::fmt;

use crate::calculations::MaterialCalculator;
use crate::domain::{RoomDimensions, Surface};
use crate::error::AppError;
use crate::models::{CalculationResult, Material};

/// Derives the area to cover from room geometry and delegates to a
/// `MaterialCalculator`.
#[derive(Debug, Clone, Default)]
pub struct RoomCalculator {
    calculator: MaterialCalculator,
}

impl RoomCalculator {
    pub fn new(reserve_percent: f64) -> Result<Self, AppError> {
        Ok(Self {
            calculator: MaterialCalculator::new(reserve_percent)?,
        })
    }

    pub fn reserve_percent(&self) -> f64 {
        self.calculator.reserve_percent()
    }

    pub fn set_reserve_percent(&mut self, value: f64) -> Result<(), AppError> {
        self.calculator.set_reserve_percent(value)
    }

    /// The wrapped calculator (and its history).
    pub fn calculator(&self) -> &MaterialCalculator {
        &self.calculator
    }

    pub fn floor_area(&self, length: f64, width: f64) -> Result<f64, AppError> {
        if !(length > 0.0 && width > 0.0) || !length.is_finite() || !width.is_finite() {
            return Err(AppError::invalid("Length and width must be positive"));
        }
        Ok(length * width)
    }

    /// `perimeter × height` minus door and window areas.
    pub fn wall_area(&self, perimeter: f64, height: f64, door_area: f64, window_area: f64) -> Result<f64, AppError> {
        if !(perimeter > 0.0 && height > 0.0) || !perimeter.is_finite() || !height.is_finite() {
            return Err(AppError::invalid("Perimeter and height must be positive"));
        }
        if !(door_area >= 0.0 && window_area >= 0.0) {
            return Err(AppError::invalid("Door and window areas must not be negative"));
        }

        let net = perimeter * height - door_area - window_area;
        if net <= 0.0 {
            return Err(AppError::invalid(
                "Wall area after subtracting doors and windows must be positive",
            ));
        }
        Ok(net)
    }

    /// Area of the requested surface.
    pub fn surface_area(&self, room: &RoomDimensions, surface: Surface) -> Result<f64, AppError> {
        match surface {
            Surface::Floor => self.floor_area(room.length, room.width),
            Surface::Wall => {
                let height = room
                    .height
                    .ok_or_else(|| AppError::invalid("Wall calculations require the ceiling height"))?;
                if !(room.length > 0.0 && room.width > 0.0) {
                    return Err(AppError::invalid("Length and width must be positive"));
                }
                self.wall_area(room.perimeter(), height, room.door_area, room.window_area)
            }
        }
    }

    pub fn materials_for_room(
        &mut self,
        material: &Material,
        room: &RoomDimensions,
        surface: Surface,
    ) -> Result<CalculationResult, AppError> {
        let area = self.surface_area(room, surface)?;
        tracing::debug!(surface = surface.display_name(), area, "room surface area");
        self.calculator.calculate(material, area)
    }
}

impl fmt::Display for RoomCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoomCalculator(reserve: {}%)", self.reserve_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_area_is_length_times_width() {
        let calc = RoomCalculator::default();
        assert_eq!(calc.floor_area(5.0, 4.0).unwrap(), 20.0);
        assert!(calc.floor_area(0.0, 4.0).is_err());
        assert!(calc.floor_area(5.0, -1.0).is_err());
    }

    #[test]
    fn wall_area_subtracts_openings() {
        let calc = RoomCalculator::default();
        assert_eq!(calc.wall_area(18.0, 2.5, 2.0, 3.0).unwrap(), 40.0);
        assert!(calc.wall_area(18.0, 2.5, -1.0, 0.0).is_err());
        assert!(calc.wall_area(0.0, 2.5, 0.0, 0.0).is_err());
        // Openings larger than the walls.
        assert!(calc.wall_area(4.0, 1.0, 3.0, 1.0).is_err());
    }

    #[test]
    fn wall_surface_requires_height() {
        let mut calc = RoomCalculator::default();
        let m = Material::wallpaper_standard("Vinyl", 1500.0).unwrap();
        let err = calc
            .materials_for_room(&m, &RoomDimensions::floor(5.0, 4.0), Surface::Wall)
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn wall_surface_uses_perimeter() {
        let mut calc = RoomCalculator::new(0.0).unwrap();
        let m = Material::new("Paint", 300.0, 10.0).unwrap();
        let room = RoomDimensions::floor(5.0, 4.0)
            .with_height(2.5)
            .with_openings(2.0, 3.0);
        let r = calc.materials_for_room(&m, &room, Surface::Wall).unwrap();
        assert_eq!(r.area, 40.0);
        assert_eq!(r.units_needed, 4);
        assert_eq!(calc.calculator().history().len(), 1);
    }

    #[test]
    fn floor_surface_uses_reserve() {
        let mut calc = RoomCalculator::default();
        calc.set_reserve_percent(5.0).unwrap();
        let m = Material::laminate_standard("Oak", 1200.0, 8).unwrap();
        let r = calc
            .materials_for_room(&m, &RoomDimensions::floor(5.0, 4.0), Surface::Floor)
            .unwrap();
        // 21 m² / 2.13072 m² per pack = 9.86 -> 10 packs
        assert_eq!(r.units_needed, 10);
        assert_eq!(r.total_cost, 12000.0);
        assert_eq!(calc.to_string(), "RoomCalculator(reserve: 5%)");
    }
}
