//! Celestial alignment engine.
//!
//! Samples moving-body positions, matches them against fixed-star and
//! galactic-point catalogs, correlates mundane parans for an observer and
//! classifies aspects between transiting and natal bodies.

pub mod aspects;
pub mod bodies;
pub mod cache;
pub mod catalog;
pub mod conjunctions;
pub mod coords;
pub mod engine;
pub mod ephemeris;
pub mod natal;
pub mod parans;
pub mod sky;
pub mod transits;
pub mod zodiac;

pub use bodies::{Body, CelestialBody};
pub use catalog::{Catalog, CatalogPoint, PointKind};
pub use engine::{AlignmentEngine, EngineSettings};
pub use ephemeris::{
    AngleTarget, EphemerisError, EphemerisProvider, Equatorial, MeanElementsEphemeris, Observer,
};
pub use natal::NatalPlacement;
pub use sky::SkyPosition;

/// Normalize any longitude to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let lon = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if lon >= 360.0 {
        0.0
    } else {
        lon
    }
}
