use crate::bodies::Body;
use serde::{Deserialize, Serialize};

/// Geographic observer location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Latitude in degrees, north positive
    pub lat: f64,
    /// Longitude in degrees, east positive
    pub lon: f64,
}

impl Observer {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build an observer from possibly-missing coordinates.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some(Self { lat, lon }),
            _ => None,
        }
    }
}

/// Equatorial coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equatorial {
    /// Right ascension in hours [0, 24)
    pub ra_hours: f64,
    /// Declination in degrees [-90, 90]
    pub dec_degrees: f64,
}

/// The four canonical horizon/meridian events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AngleType {
    Rising,
    Setting,
    Culminating,
    AntiCulminating,
}

impl AngleType {
    pub const ALL: [AngleType; 4] = [
        AngleType::Rising,
        AngleType::Setting,
        AngleType::Culminating,
        AngleType::AntiCulminating,
    ];

    /// Target hour angle in degrees for meridian events
    pub fn hour_angle_degrees(self) -> Option<f64> {
        match self {
            AngleType::Culminating => Some(0.0),
            AngleType::AntiCulminating => Some(180.0),
            AngleType::Rising | AngleType::Setting => None,
        }
    }
}

/// What an angle-event search is performed for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleTarget {
    /// A moving body whose coordinates change during the window
    Body(Body),
    /// A fixed point with constant equatorial coordinates
    Fixed(Equatorial),
}

/// Apparent altitude of the horizon crossing for rising/setting, in degrees.
pub const SUN_HORIZON_DEG: f64 = -0.8333;
pub const MOON_HORIZON_DEG: f64 = 0.125;
pub const STAR_HORIZON_DEG: f64 = -0.5667;

impl AngleTarget {
    pub fn horizon_altitude(&self) -> f64 {
        match self {
            AngleTarget::Body(Body::Sun) => SUN_HORIZON_DEG,
            AngleTarget::Body(Body::Moon) => MOON_HORIZON_DEG,
            _ => STAR_HORIZON_DEG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observer_from_parts() {
        assert_eq!(Observer::from_parts(Some(1.0), Some(2.0)), Some(Observer::new(1.0, 2.0)));
        assert_eq!(Observer::from_parts(None, Some(2.0)), None);
        assert_eq!(Observer::from_parts(Some(1.0), None), None);
        assert_eq!(Observer::from_parts(None, None), None);
        assert_eq!(Observer::from_parts(Some(f64::NAN), Some(2.0)), None);
    }

    #[test]
    fn test_angle_type_serializes_kebab_case() {
        let json = serde_json::to_string(&AngleType::AntiCulminating).unwrap();
        assert_eq!(json, "\"anti-culminating\"");
    }
}
