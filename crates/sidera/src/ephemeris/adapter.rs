use crate::bodies::Body;
use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::time::julian_day;
use crate::ephemeris::types::Equatorial;
use crate::normalize_degrees;
use chrono::{DateTime, Utc};
use std::env;
use std::path::PathBuf;
use swisseph::swe::calc_ut;

// FLG_SWIEPH
const FLAG_SWIEPH: u32 = 2;
// FLG_EQUATORIAL
const FLAG_EQUATORIAL: u32 = 2048;

/// Swiss Ephemeris planet number for a body
fn planet_code(body: Body) -> u32 {
    match body {
        Body::Sun => 0,
        Body::Moon => 1,
        Body::Mercury => 2,
        Body::Venus => 3,
        Body::Mars => 4,
        Body::Jupiter => 5,
        Body::Saturn => 6,
        Body::Uranus => 7,
        Body::Neptune => 8,
        Body::Pluto => 9,
    }
}

/// Swiss Ephemeris backed provider
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        log::debug!("Swiss Ephemeris data at {}", path.display());
        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &PathBuf {
        &self.ephemeris_path
    }

    fn calc(&self, body: Body, at: DateTime<Utc>, flags: u32) -> Result<(f64, f64), EphemerisError> {
        let jd = julian_day(at);
        let result = calc_ut(jd, planet_code(body), flags).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                datetime: at,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;
        let out = result.out;
        Ok((out[0], out[1]))
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn longitude_of(&self, body: Body, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        let (lon, _) = self.calc(body, at, FLAG_SWIEPH)?;
        Ok(normalize_degrees(lon))
    }

    fn equatorial_of(&self, body: Body, at: DateTime<Utc>) -> Result<Equatorial, EphemerisError> {
        let (ra, dec) = self.calc(body, at, FLAG_SWIEPH | FLAG_EQUATORIAL)?;
        Ok(Equatorial {
            ra_hours: normalize_degrees(ra) / 15.0,
            dec_degrees: dec,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_reported() {
        let err = SwissEphemerisAdapter::new(Some(PathBuf::from("/nonexistent/ephe"))).unwrap_err();
        assert!(matches!(err, EphemerisError::FileNotFound { .. }));
    }

    #[test]
    fn test_planet_codes_are_distinct() {
        let mut codes: Vec<u32> = Body::ALL.iter().map(|b| planet_code(*b)).collect();
        codes.dedup();
        assert_eq!(codes.len(), Body::ALL.len());
    }
}
