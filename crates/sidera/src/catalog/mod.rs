//! Fixed-star and galactic-point catalogs.

pub mod loader;
pub mod types;

pub use loader::{load_points_from_file, load_points_from_json, CatalogError};
pub use types::{CatalogPoint, PointKind};

use std::path::Path;

const FIXED_STARS_JSON: &str = include_str!("../../data/fixed_stars.json");
const GALACTIC_POINTS_JSON: &str = include_str!("../../data/galactic_points.json");

/// The static reference points the engine matches against.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub fixed_stars: Vec<CatalogPoint>,
    pub galactic_points: Vec<CatalogPoint>,
}

impl Catalog {
    pub fn new(fixed_stars: Vec<CatalogPoint>, galactic_points: Vec<CatalogPoint>) -> Self {
        Self {
            fixed_stars,
            galactic_points,
        }
    }

    /// Catalogs bundled with the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self {
            fixed_stars: load_points_from_json(FIXED_STARS_JSON)?,
            galactic_points: load_points_from_json(GALACTIC_POINTS_JSON)?,
        })
    }

    /// Load user catalogs, falling back to the bundled one for any path not given
    pub fn from_files(
        fixed_stars: Option<&Path>,
        galactic_points: Option<&Path>,
    ) -> Result<Self, CatalogError> {
        let fixed_stars = match fixed_stars {
            Some(path) => load_points_from_file(path)?,
            None => load_points_from_json(FIXED_STARS_JSON)?,
        };
        let galactic_points = match galactic_points {
            Some(path) => load_points_from_file(path)?,
            None => load_points_from_json(GALACTIC_POINTS_JSON)?,
        };
        log::debug!(
            "Loaded catalog with {} fixed stars and {} galactic points",
            fixed_stars.len(),
            galactic_points.len()
        );
        Ok(Self {
            fixed_stars,
            galactic_points,
        })
    }

    pub fn star(&self, id: &str) -> Option<&CatalogPoint> {
        self.fixed_stars.iter().find(|s| s.id == id)
    }

    pub fn royal_stars(&self) -> impl Iterator<Item = &CatalogPoint> {
        self.fixed_stars.iter().filter(|s| s.royal)
    }

    pub fn behenian_stars(&self) -> impl Iterator<Item = &CatalogPoint> {
        self.fixed_stars.iter().filter(|s| s.behenian)
    }
}
