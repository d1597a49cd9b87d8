//! Outcome of a single material calculation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Material;

/// Units to buy and their cost for one material over one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub material: Material,
    /// Area to cover (m²), without the reserve.
    pub area: f64,
    pub units_needed: u64,
    pub total_cost: f64,
    pub reserve_percent: f64,
}

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Calculation result:")?;
        writeln!(f, "Material: {}", self.material.name)?;
        writeln!(f, "Area: {}m²", self.area)?;
        writeln!(f, "Units needed: {}", self.units_needed)?;
        writeln!(f, "Total cost: {:.2}", self.total_cost)?;
        write!(f, "Reserve: {}%", self.reserve_percent)
    }
}

/// Sum of areas over a set of results.
pub fn total_area(results: &[CalculationResult]) -> f64 {
    results.iter().map(|r| r.area).sum()
}

/// Sum of costs over a set of results.
pub fn total_cost(results: &[CalculationResult]) -> f64 {
    results.iter().map(|r| r.total_cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(area: f64, cost: f64) -> CalculationResult {
        CalculationResult {
            material: Material::new("Paint", 500.0, 10.0).unwrap(),
            area,
            units_needed: 2,
            total_cost: cost,
            reserve_percent: 10.0,
        }
    }

    #[test]
    fn display_is_multiline_summary() {
        let text = result(12.5, 1000.0).to_string();
        assert_eq!(
            text,
            "Calculation result:\nMaterial: Paint\nArea: 12.5m²\nUnits needed: 2\nTotal cost: 1000.00\nReserve: 10%"
        );
    }

    #[test]
    fn totals_sum_over_results() {
        let results = vec![result(10.0, 100.0), result(5.5, 50.25)];
        assert!((total_area(&results) - 15.5).abs() < 1e-12);
        assert!((total_cost(&results) - 150.25).abs() < 1e-12);
    }
}
