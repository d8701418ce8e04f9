//! Julian dates and sidereal time.
//!
//! UT1 is approximated by UTC, which is well inside the precision of the
//! one-minute paran resolution.

use chrono::{DateTime, Utc};

pub const J2000_JD: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;
const ARCSEC_TO_DEG: f64 = 1.0 / 3600.0;

/// Convert a UTC instant to a Julian Day
pub fn julian_day(dt: DateTime<Utc>) -> f64 {
    let seconds = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_millis()) / 1000.0;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// Days elapsed since J2000.0 (2000-01-01T12:00Z)
pub fn days_since_j2000(dt: DateTime<Utc>) -> f64 {
    julian_day(dt) - J2000_JD
}

/// Earth Rotation Angle in degrees [0, 360)
pub fn earth_rotation_angle(jd: f64) -> f64 {
    let du = jd - J2000_JD;
    (360.0 * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du)).rem_euclid(360.0)
}

/// Greenwich Mean Sidereal Time in degrees [0, 360)
pub fn gmst_degrees(jd: f64) -> f64 {
    let t = (jd - J2000_JD) / 36525.0;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t2
        - 0.00000044 * t3
        - 0.000029956 * t4
        - 0.0000000368 * t5;

    (earth_rotation_angle(jd) + poly_arcsec * ARCSEC_TO_DEG).rem_euclid(360.0)
}

/// Local sidereal time in degrees for an east-positive longitude
pub fn local_sidereal_degrees(dt: DateTime<Utc>, longitude_east: f64) -> f64 {
    (gmst_degrees(julian_day(dt)) + longitude_east).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_julian_day_at_j2000() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((julian_day(dt) - J2000_JD).abs() < 1e-9);
        assert!(days_since_j2000(dt).abs() < 1e-9);
    }

    #[test]
    fn test_gmst_at_j2000() {
        // GMST at J2000.0 is 18h41m50.5s = 280.46 degrees
        let gmst = gmst_degrees(J2000_JD);
        assert!((gmst - 280.46).abs() < 0.01, "gmst = {}", gmst);
    }
}
