use crate::bodies::Body;
use crate::ephemeris::EphemerisProvider;
use crate::transits::retrograde::is_retrograde;
use crate::zodiac::longitude_to_zodiac;
use crate::normalize_degrees;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A moving body's ecliptic position at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkyPosition {
    pub body: Body,
    pub at: DateTime<Utc>,
    pub longitude: f64,
    pub retrograde: bool,
    pub sign: &'static str,
    pub degree: u32,
    pub minute: u32,
}

impl SkyPosition {
    pub fn new(body: Body, at: DateTime<Utc>, longitude: f64, retrograde: bool) -> Self {
        let longitude = normalize_degrees(longitude);
        let zodiac = longitude_to_zodiac(longitude);
        Self {
            body,
            at,
            longitude,
            retrograde,
            sign: zodiac.sign.id,
            degree: zodiac.degree,
            minute: zodiac.minute,
        }
    }
}

/// Sample every tracked body; bodies the provider cannot place are skipped.
pub fn sample_sky<P: EphemerisProvider>(provider: &P, at: DateTime<Utc>) -> Vec<SkyPosition> {
    Body::ALL
        .iter()
        .filter_map(|&body| match provider.longitude_of(body, at) {
            Ok(lon) => Some(SkyPosition::new(body, at, lon, is_retrograde(body, at))),
            Err(e) => {
                log::warn!("Skipping {}: {}", body, e);
                None
            }
        })
        .collect()
}

/// Look up one body in a sampled sky
pub fn position_of(positions: &[SkyPosition], body: Body) -> Option<&SkyPosition> {
    positions.iter().find(|p| p.body == body)
}
