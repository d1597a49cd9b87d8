//! Shared calculation workflow used by every calculating subcommand.
//!
//! catalog load -> material lookup -> calculator setup -> calculation
//!
//! The front-end (`app`) then focuses on presentation and export.

use crate::calculations::{MaterialCalculator, RoomCalculator};
use crate::config::Config;
use crate::domain::{RoomDimensions, Surface};
use crate::error::AppError;
use crate::io::load_catalog;
use crate::models::CalculationResult;

/// What to calculate.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// One material over an explicit area.
    Area { material: String, area: f64 },
    /// One material over a room surface.
    Room {
        material: String,
        room: RoomDimensions,
        surface: Surface,
    },
    /// Several materials over one area; all catalog materials when empty.
    Compare { materials: Vec<String>, area: f64 },
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Calculation results; cheapest first for comparisons.
    pub results: Vec<CalculationResult>,
}

/// Execute `request` against the configured catalog and reserve.
pub fn run_request(config: &Config, request: Request) -> Result<RunOutput, AppError> {
    let catalog = load_catalog(config.catalog.as_deref())?;

    let results = match request {
        Request::Area { material, area } => {
            let material = catalog.get(&material)?;
            let mut calculator = MaterialCalculator::new(config.reserve_percent)?;
            vec![calculator.calculate(material, area)?]
        }
        Request::Room {
            material,
            room,
            surface,
        } => {
            let material = catalog.get(&material)?;
            let mut calculator = RoomCalculator::new(config.reserve_percent)?;
            vec![calculator.materials_for_room(material, &room, surface)?]
        }
        Request::Compare { materials, area } => {
            let materials = if materials.is_empty() {
                catalog.materials().to_vec()
            } else {
                catalog.select(&materials)?
            };
            let mut calculator = MaterialCalculator::new(config.reserve_percent)?;
            calculator.compare_materials(&materials, area)?
        }
    };

    tracing::info!(results = results.len(), reserve = config.reserve_percent, "calculation finished");
    Ok(RunOutput { results })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_request_uses_builtin_catalog() {
        let run = run_request(
            &Config::default(),
            Request::Area {
                material: "vinyl classic".to_string(),
                area: 10.0,
            },
        )
        .unwrap();
        assert_eq!(run.results.len(), 1);
        assert_eq!(run.results[0].units_needed, 3);
        assert_eq!(run.results[0].total_cost, 4500.0);
    }

    #[test]
    fn room_request_computes_wall_area() {
        let room = RoomDimensions::floor(5.0, 4.0)
            .with_height(2.5)
            .with_openings(2.0, 3.0);
        let run = run_request(
            &Config::default(),
            Request::Room {
                material: "Vinyl Classic".to_string(),
                room,
                surface: Surface::Wall,
            },
        )
        .unwrap();
        assert_eq!(run.results[0].area, 40.0);
        // 44 m² / 5.3265 m² per roll = 8.26 -> 9 rolls
        assert_eq!(run.results[0].units_needed, 9);
    }

    #[test]
    fn compare_without_names_uses_whole_catalog() {
        let run = run_request(
            &Config::default(),
            Request::Compare {
                materials: Vec::new(),
                area: 20.0,
            },
        )
        .unwrap();
        assert_eq!(run.results.len(), 6);
        assert!(run.results.windows(2).all(|w| w[0].total_cost <= w[1].total_cost));
    }

    #[test]
    fn unknown_material_is_invalid_input() {
        let err = run_request(
            &Config::default(),
            Request::Area {
                material: "Marble".to_string(),
                area: 10.0,
            },
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
