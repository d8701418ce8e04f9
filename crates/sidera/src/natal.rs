use crate::normalize_degrees;
use crate::zodiac::sign_start;
use serde::{Deserialize, Serialize};

/// A body's recorded position in a birth chart.
///
/// The sign is optional because upstream chart data is not always complete;
/// a placement without a recognizable sign has no longitude and is skipped by
/// every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalPlacement {
    pub planet_id: String,
    #[serde(default)]
    pub sign_id: Option<String>,
    #[serde(default)]
    pub degree: f64,
    #[serde(default)]
    pub minute: f64,
    #[serde(default)]
    pub retrograde: bool,
}

impl NatalPlacement {
    pub fn new(planet_id: &str, sign_id: &str, degree: f64, minute: f64) -> Self {
        Self {
            planet_id: planet_id.to_string(),
            sign_id: Some(sign_id.to_string()),
            degree,
            minute,
            retrograde: false,
        }
    }

    /// `signStart + degree + minute / 60`, normalized
    pub fn absolute_longitude(&self) -> Option<f64> {
        let start = sign_start(self.sign_id.as_deref()?)?;
        let lon = start + self.degree + self.minute / 60.0;
        lon.is_finite().then(|| normalize_degrees(lon))
    }
}

/// Placements that resolve to a longitude, paired with it
pub fn resolved_placements(placements: &[NatalPlacement]) -> impl Iterator<Item = (&NatalPlacement, f64)> {
    placements.iter().filter_map(|p| match p.absolute_longitude() {
        Some(lon) => Some((p, lon)),
        None => {
            log::trace!("skipping natal placement {} without a usable sign", p.planet_id);
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_longitude() {
        let p = NatalPlacement::new("sun", "virgo", 0.0, 0.0);
        assert_eq!(p.absolute_longitude(), Some(150.0));

        let p = NatalPlacement::new("moon", "aries", 12.0, 30.0);
        assert_eq!(p.absolute_longitude(), Some(12.5));
    }

    #[test]
    fn test_missing_or_unknown_sign() {
        let mut p = NatalPlacement::new("mars", "virgo", 1.0, 0.0);
        p.sign_id = None;
        assert_eq!(p.absolute_longitude(), None);

        let p = NatalPlacement::new("mars", "serpentarius", 1.0, 0.0);
        assert_eq!(p.absolute_longitude(), None);
    }

    #[test]
    fn test_deserializes_with_missing_fields() {
        let p: NatalPlacement = serde_json::from_str(r#"{"planetId":"venus"}"#).unwrap();
        assert_eq!(p.sign_id, None);
        assert_eq!(p.absolute_longitude(), None);

        let p: NatalPlacement =
            serde_json::from_str(r#"{"planetId":"venus","signId":"pisces","degree":29,"minute":60}"#).unwrap();
        assert_eq!(p.absolute_longitude(), Some(0.0));
    }

    #[test]
    fn test_resolved_placements_skips_invalid() {
        let mut broken = NatalPlacement::new("moon", "leo", 0.0, 0.0);
        broken.sign_id = None;
        let placements = vec![NatalPlacement::new("sun", "leo", 1.0, 0.0), broken];
        let resolved: Vec<_> = resolved_placements(&placements).collect();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].1, 121.0);
    }
}
