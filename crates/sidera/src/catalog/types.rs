use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointKind {
    FixedStar,
    GalacticPoint,
}

/// A fixed reference point on the ecliptic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPoint {
    pub id: String,
    pub name: String,
    pub kind: PointKind,
    /// Tropical ecliptic longitude in degrees
    pub longitude: f64,
    /// Conjunction orb specific to this point
    pub orb: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constellation: Option<String>,
    #[serde(default)]
    pub royal: bool,
    #[serde(default)]
    pub behenian: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub royal_title: Option<String>,
}

impl CatalogPoint {
    pub fn new(id: &str, name: &str, kind: PointKind, longitude: f64, orb: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            longitude,
            orb,
            magnitude: None,
            constellation: None,
            royal: false,
            behenian: false,
            royal_title: None,
        }
    }

    pub fn star(id: &str, name: &str, longitude: f64, orb: f64) -> Self {
        Self::new(id, name, PointKind::FixedStar, longitude, orb)
    }
}
