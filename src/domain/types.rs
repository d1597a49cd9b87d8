//! Shared domain types for room-based calculations.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which surface of a room is being finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Floor: `length × width`.
    Floor,
    /// Walls: `2 × (length + width) × height`, minus doors and windows.
    Wall,
}

impl Surface {
    pub fn display_name(self) -> &'static str {
        match self {
            Surface::Floor => "floor",
            Surface::Wall => "wall",
        }
    }
}

/// Dimensions of a rectangular room (metres, m²).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub length: f64,
    pub width: f64,
    /// Ceiling height; required for wall calculations only.
    pub height: Option<f64>,
    pub door_area: f64,
    pub window_area: f64,
}

impl RoomDimensions {
    /// A room with floor dimensions only.
    pub fn floor(length: f64, width: f64) -> Self {
        Self {
            length,
            width,
            ..Self::default()
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_openings(mut self, door_area: f64, window_area: f64) -> Self {
        self.door_area = door_area;
        self.window_area = window_area;
        self
    }

    pub fn perimeter(&self) -> f64 {
        2.0 * (self.length + self.width)
    }
}
