//! Units-and-cost calculator with a calculation history.

use std::fmt;

use crate::error::AppError;
use crate::models::{CalculationResult, Material};

/// Reserve applied when none is configured.
pub const DEFAULT_RESERVE_PERCENT: f64 = 10.0;

/// Computes how many units of a material cover an area (plus reserve) and what
/// they cost. Every calculation is appended to the history.
#[derive(Debug, Clone)]
pub struct MaterialCalculator {
    reserve_percent: f64,
    history: Vec<CalculationResult>,
}

impl Default for MaterialCalculator {
    fn default() -> Self {
        Self {
            reserve_percent: DEFAULT_RESERVE_PERCENT,
            history: Vec::new(),
        }
    }
}

impl MaterialCalculator {
    pub fn new(reserve_percent: f64) -> Result<Self, AppError> {
        validate_reserve(reserve_percent)?;
        Ok(Self {
            reserve_percent,
            history: Vec::new(),
        })
    }

    pub fn reserve_percent(&self) -> f64 {
        self.reserve_percent
    }

    /// Change the reserve; values outside `[0, 100]` are rejected and the
    /// previous reserve is kept.
    pub fn set_reserve_percent(&mut self, value: f64) -> Result<(), AppError> {
        validate_reserve(value)?;
        self.reserve_percent = value;
        Ok(())
    }

    /// Units and cost of `material` for `area` m².
    pub fn calculate(&mut self, material: &Material, area: f64) -> Result<CalculationResult, AppError> {
        if !area.is_finite() || area <= 0.0 {
            return Err(AppError::invalid(format!("Area must be a positive number (got {area})")));
        }
        if !material.unit_coverage.is_finite() || material.unit_coverage <= 0.0 {
            return Err(AppError::invalid(format!(
                "Material '{}' has no usable coverage per unit",
                material.name
            )));
        }

        let area_with_reserve = area * (1.0 + self.reserve_percent / 100.0);
        let units_needed = (area_with_reserve / material.unit_coverage).ceil() as u64;
        let total_cost = units_needed as f64 * material.price_per_unit;

        tracing::debug!(
            material = %material.name,
            area,
            reserve = self.reserve_percent,
            units_needed,
            total_cost,
            "calculated material"
        );

        let result = CalculationResult {
            material: material.clone(),
            area,
            units_needed,
            total_cost,
            reserve_percent: self.reserve_percent,
        };
        self.history.push(result.clone());
        Ok(result)
    }

    /// Every result produced so far, oldest first.
    pub fn history(&self) -> &[CalculationResult] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Calculate every material for the same area; cheapest first.
    pub fn compare_materials(&mut self, materials: &[Material], area: f64) -> Result<Vec<CalculationResult>, AppError> {
        if materials.is_empty() {
            return Err(AppError::invalid("The list of materials must not be empty"));
        }

        let mut results = materials
            .iter()
            .map(|m| self.calculate(m, area))
            .collect::<Result<Vec<_>, _>>()?;

        results.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));
        Ok(results)
    }
}

impl fmt::Display for MaterialCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MaterialCalculator(reserve: {}%, calculations performed: {})",
            self.reserve_percent,
            self.history.len()
        )
    }
}

pub(crate) fn validate_reserve(value: f64) -> Result<(), AppError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(AppError::invalid(format!(
            "Reserve percent must be between 0 and 100 (got {value})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallpaper() -> Material {
        Material::wallpaper_standard("Vinyl", 1500.0).unwrap()
    }

    #[test]
    fn calculates_units_with_reserve() {
        let mut calc = MaterialCalculator::default();
        let r = calc.calculate(&wallpaper(), 10.0).unwrap();
        // 11 m² / 5.3265 m² per roll = 2.07 -> 3 rolls
        assert_eq!(r.units_needed, 3);
        assert_eq!(r.total_cost, 4500.0);
        assert_eq!(r.area, 10.0);
        assert_eq!(r.reserve_percent, 10.0);
    }

    #[test]
    fn units_are_plain_ceiling_of_reserved_area() {
        let mut calc = MaterialCalculator::default();
        // 9.9 / 0.8999999999999999 is just above 11, so a twelfth box is bought.
        let tile = Material::tile_standard("Ceramic", 800.0, 10).unwrap();
        let r = calc.calculate(&tile, 9.0).unwrap();
        assert_eq!(r.units_needed, 12);
        assert_eq!(r.total_cost, 9600.0);
    }

    #[test]
    fn units_always_cover_reserved_area() {
        let mut calc = MaterialCalculator::new(0.0).unwrap();
        let paint = Material::new("Paint", 100.0, 1.0).unwrap();
        let area = 3.000_000_000_5;
        let r = calc.calculate(&paint, area).unwrap();
        assert_eq!(r.units_needed, 4);
        assert!(r.units_needed as f64 * paint.unit_coverage >= area);
    }

    #[test]
    fn zero_reserve_uses_raw_area() {
        let mut calc = MaterialCalculator::new(0.0).unwrap();
        let m = Material::new("Paint", 100.0, 4.0).unwrap();
        assert_eq!(calc.calculate(&m, 8.0).unwrap().units_needed, 2);
        assert_eq!(calc.calculate(&m, 8.5).unwrap().units_needed, 3);
    }

    #[test]
    fn rejects_non_positive_area() {
        let mut calc = MaterialCalculator::default();
        assert_eq!(calc.calculate(&wallpaper(), 0.0).unwrap_err().exit_code(), 3);
        assert!(calc.calculate(&wallpaper(), -5.0).is_err());
        assert!(calc.calculate(&wallpaper(), f64::NAN).is_err());
        assert!(calc.history().is_empty());
    }

    #[test]
    fn reserve_bounds_are_enforced() {
        assert!(MaterialCalculator::new(101.0).is_err());
        let mut calc = MaterialCalculator::new(15.0).unwrap();
        assert!(calc.set_reserve_percent(-1.0).is_err());
        assert_eq!(calc.reserve_percent(), 15.0);
        calc.set_reserve_percent(100.0).unwrap();
        assert_eq!(calc.reserve_percent(), 100.0);
    }

    #[test]
    fn history_records_and_clears() {
        let mut calc = MaterialCalculator::default();
        calc.calculate(&wallpaper(), 10.0).unwrap();
        calc.calculate(&wallpaper(), 20.0).unwrap();
        assert_eq!(calc.history().len(), 2);
        assert_eq!(calc.history()[1].area, 20.0);
        assert_eq!(
            calc.to_string(),
            "MaterialCalculator(reserve: 10%, calculations performed: 2)"
        );

        calc.clear_history();
        assert!(calc.history().is_empty());
    }

    #[test]
    fn compare_sorts_by_cost() {
        let mut calc = MaterialCalculator::default();
        let materials = vec![
            Material::new("Expensive", 1000.0, 5.0).unwrap(),
            Material::new("Cheap", 100.0, 5.0).unwrap(),
            Material::new("Middle", 500.0, 5.0).unwrap(),
        ];
        let results = calc.compare_materials(&materials, 10.0).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.material.name.as_str()).collect();
        assert_eq!(names, ["Cheap", "Middle", "Expensive"]);
        assert_eq!(calc.history().len(), 3);
    }

    #[test]
    fn compare_keeps_input_order_for_equal_costs() {
        let mut calc = MaterialCalculator::default();
        let materials = vec![
            Material::new("Second", 200.0, 5.0).unwrap(),
            Material::new("Twin B", 100.0, 5.0).unwrap(),
            Material::new("Twin A", 100.0, 5.0).unwrap(),
        ];
        let results = calc.compare_materials(&materials, 10.0).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.material.name.as_str()).collect();
        assert_eq!(names, ["Twin B", "Twin A", "Second"]);

        let history: Vec<&str> = calc.history().iter().map(|r| r.material.name.as_str()).collect();
        assert_eq!(history, ["Second", "Twin B", "Twin A"]);
    }

    #[test]
    fn compare_rejects_empty_list() {
        let mut calc = MaterialCalculator::default();
        assert!(calc.compare_materials(&[], 10.0).is_err());
    }
}
