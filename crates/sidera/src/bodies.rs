//! The ten moving bodies tracked by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// Static description of a moving body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBody {
    pub body: Body,
    pub id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    /// Mean sidereal orbital period in days
    pub orbital_period_days: f64,
    /// Cycle length in days driving the retrograde approximation
    pub retrograde_cycle_days: Option<f64>,
}

pub const BODIES: [CelestialBody; 10] = [
    CelestialBody { body: Body::Sun, id: "sun", name: "Sun", symbol: "☉", orbital_period_days: 365.25, retrograde_cycle_days: None },
    CelestialBody { body: Body::Moon, id: "moon", name: "Moon", symbol: "☽", orbital_period_days: 27.32, retrograde_cycle_days: None },
    CelestialBody { body: Body::Mercury, id: "mercury", name: "Mercury", symbol: "☿", orbital_period_days: 87.97, retrograde_cycle_days: None },
    CelestialBody { body: Body::Venus, id: "venus", name: "Venus", symbol: "♀", orbital_period_days: 224.7, retrograde_cycle_days: Some(584.0) },
    CelestialBody { body: Body::Mars, id: "mars", name: "Mars", symbol: "♂", orbital_period_days: 686.98, retrograde_cycle_days: Some(780.0) },
    CelestialBody { body: Body::Jupiter, id: "jupiter", name: "Jupiter", symbol: "♃", orbital_period_days: 4332.59, retrograde_cycle_days: Some(399.0) },
    CelestialBody { body: Body::Saturn, id: "saturn", name: "Saturn", symbol: "♄", orbital_period_days: 10759.22, retrograde_cycle_days: Some(378.0) },
    CelestialBody { body: Body::Uranus, id: "uranus", name: "Uranus", symbol: "♅", orbital_period_days: 30688.5, retrograde_cycle_days: Some(370.0) },
    CelestialBody { body: Body::Neptune, id: "neptune", name: "Neptune", symbol: "♆", orbital_period_days: 60182.0, retrograde_cycle_days: Some(367.0) },
    CelestialBody { body: Body::Pluto, id: "pluto", name: "Pluto", symbol: "♇", orbital_period_days: 90560.0, retrograde_cycle_days: Some(366.0) },
];

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn info(self) -> &'static CelestialBody {
        &BODIES[self as usize]
    }

    pub fn id(self) -> &'static str {
        self.info().id
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    pub fn is_luminary(self) -> bool {
        matches!(self, Body::Sun | Body::Moon)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.id() == needle)
            .ok_or_else(|| format!("Unknown body: {}", s))
    }
}

/// Display name for any body id, including natal-only points such as the
/// ascendant.
pub fn display_name(id: &str) -> String {
    if let Ok(body) = id.parse::<Body>() {
        return body.name().to_string();
    }
    match id {
        "ascendant" => "Ascendant".to_string(),
        "midheaven" => "Midheaven".to_string(),
        "northnode" | "north_node" | "true-node" => "North Node".to_string(),
        "southnode" | "south_node" => "South Node".to_string(),
        "chiron" => "Chiron".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        }
    }
}

/// Symbol for any body id; `?` when unknown.
pub fn display_symbol(id: &str) -> &'static str {
    if let Ok(body) = id.parse::<Body>() {
        return body.symbol();
    }
    match id {
        "ascendant" => "AC",
        "midheaven" => "MC",
        "northnode" | "north_node" | "true-node" => "☊",
        "southnode" | "south_node" => "☋",
        "chiron" => "⚷",
        _ => "?",
    }
}
