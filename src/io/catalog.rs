//! Material catalogs.
//!
//! A catalog is a JSON array of materials, e.g.
//!
//! ```json
//! [
//!   {"name": "Vinyl", "price_per_unit": 1500, "kind": "wallpaper", "roll_width": 0.53, "roll_length": 10.05},
//!   {"name": "Paint", "price_per_unit": 900, "unit_coverage": 12, "kind": "generic"}
//! ]
//! ```
//!
//! Coverage is recomputed from the dimensions on load. Without a catalog file
//! the built-in sample catalog is used.

use std::fs::File;
use std::path::Path;

use crate::error::AppError;
use crate::models::Material;

/// An ordered set of materials addressable by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    materials: Vec<Material>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names (case-insensitive).
    pub fn new(materials: Vec<Material>) -> Result<Self, AppError> {
        for (i, m) in materials.iter().enumerate() {
            if materials[..i].iter().any(|other| other.name.eq_ignore_ascii_case(&m.name)) {
                return Err(AppError::invalid(format!("Duplicate material '{}' in catalog", m.name)));
            }
        }
        Ok(Self { materials })
    }

    /// Sample wallpaper, tile, and laminate products.
    pub fn builtin() -> Result<Self, AppError> {
        Self::new(vec![
            Material::wallpaper_standard("Vinyl Classic", 1500.0)?,
            Material::wallpaper("Non-woven Wide", 2900.0, 1.06, 10.05)?,
            Material::tile_standard("Ceramic White", 850.0, 11)?,
            Material::tile("Porcelain Grey", 2400.0, 4, 0.6, 0.6)?,
            Material::laminate_standard("Oak Natural", 1350.0, 8)?,
            Material::laminate("Walnut Premium", 2600.0, 6, 0.244, 1.845)?,
        ])
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn get(&self, name: &str) -> Result<&Material, AppError> {
        self.materials
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = self.materials.iter().map(|m| m.name.as_str()).collect();
                AppError::invalid(format!(
                    "Unknown material '{name}'. Known materials: {}",
                    known.join(", ")
                ))
            })
    }

    /// Look up several materials, keeping the requested order.
    pub fn select(&self, names: &[String]) -> Result<Vec<Material>, AppError> {
        names.iter().map(|n| self.get(n).cloned()).collect()
    }
}

/// Load a catalog JSON file.
pub fn read_catalog_json(path: &Path) -> Result<Catalog, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open catalog '{}': {e}", path.display())))?;
    let materials: Vec<Material> = serde_json::from_reader(file)
        .map_err(|e| AppError::io(format!("Failed to parse catalog '{}': {e}", path.display())))?;

    let materials = materials
        .into_iter()
        .map(Material::validated)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(path = %path.display(), materials = materials.len(), "loaded catalog");
    Catalog::new(materials)
}

/// Write a catalog JSON file.
pub fn write_catalog_json(path: &Path, catalog: &Catalog) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create catalog '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, catalog.materials())
        .map_err(|e| AppError::io(format!("Failed to write catalog: {e}")))?;
    Ok(())
}

/// The catalog at `path`, or the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, AppError> {
    match path {
        Some(path) => read_catalog_json(path),
        None => Catalog::builtin(),
    }
}
