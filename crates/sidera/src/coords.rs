//! Ecliptic to equatorial conversion.
//!
//! Catalog points carry only an ecliptic longitude. They are projected onto
//! the equator as if their ecliptic latitude were zero, so stars far off the
//! ecliptic get systematically shifted rise/set times. This is a known
//! limitation of the catalog format and is kept as-is.

use crate::ephemeris::types::Equatorial;
use crate::normalize_degrees;

/// Mean obliquity of the ecliptic used for catalog points, in degrees
pub const OBLIQUITY_DEG: f64 = 23.4393;

/// Project an ecliptic longitude (latitude 0) to RA/Dec.
pub fn ecliptic_to_equatorial(longitude: f64) -> Equatorial {
    let lambda = normalize_degrees(longitude).to_radians();
    let eps = OBLIQUITY_DEG.to_radians();

    let ra = (lambda.sin() * eps.cos()).atan2(lambda.cos());
    let ra = ra.rem_euclid(std::f64::consts::TAU);
    let dec = (lambda.sin() * eps.sin()).asin();

    Equatorial {
        ra_hours: hours_from_radians(ra),
        dec_degrees: dec.to_degrees(),
    }
}

/// Full rotation including ecliptic latitude, for moving bodies.
pub fn ecliptic_to_equatorial_with_latitude(longitude: f64, latitude: f64, obliquity: f64) -> Equatorial {
    let lambda = normalize_degrees(longitude).to_radians();
    let beta = latitude.to_radians();
    let eps = obliquity.to_radians();

    let ra = (lambda.sin() * eps.cos() - beta.tan() * eps.sin()).atan2(lambda.cos());
    let ra = ra.rem_euclid(std::f64::consts::TAU);
    let sin_dec = beta.sin() * eps.cos() + beta.cos() * eps.sin() * lambda.sin();

    Equatorial {
        ra_hours: hours_from_radians(ra),
        dec_degrees: sin_dec.clamp(-1.0, 1.0).asin().to_degrees(),
    }
}

fn hours_from_radians(ra: f64) -> f64 {
    let hours = ra.to_degrees() / 15.0;
    if hours >= 24.0 {
        0.0
    } else {
        hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cardinal_points() {
        let aries = ecliptic_to_equatorial(0.0);
        assert_abs_diff_eq!(aries.ra_hours, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(aries.dec_degrees, 0.0, epsilon = 1e-9);

        let cancer = ecliptic_to_equatorial(90.0);
        assert_abs_diff_eq!(cancer.ra_hours, 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cancer.dec_degrees, OBLIQUITY_DEG, epsilon = 1e-9);

        let libra = ecliptic_to_equatorial(180.0);
        assert_abs_diff_eq!(libra.ra_hours, 12.0, epsilon = 1e-9);

        let capricorn = ecliptic_to_equatorial(270.0);
        assert_abs_diff_eq!(capricorn.ra_hours, 18.0, epsilon = 1e-9);
        assert_abs_diff_eq!(capricorn.dec_degrees, -OBLIQUITY_DEG, epsilon = 1e-9);
    }

    #[test]
    fn test_out_of_range_longitude_is_normalized() {
        let a = ecliptic_to_equatorial(45.0);
        let b = ecliptic_to_equatorial(405.0);
        let c = ecliptic_to_equatorial(-315.0);
        assert_abs_diff_eq!(a.ra_hours, b.ra_hours, epsilon = 1e-9);
        assert_abs_diff_eq!(a.ra_hours, c.ra_hours, epsilon = 1e-9);
        assert_abs_diff_eq!(a.dec_degrees, c.dec_degrees, epsilon = 1e-9);
    }

    #[test]
    fn test_ra_in_range() {
        for i in 0..720 {
            let eq = ecliptic_to_equatorial(i as f64 * 0.5);
            assert!((0.0..24.0).contains(&eq.ra_hours));
            assert!(eq.dec_degrees.abs() <= OBLIQUITY_DEG + 1e-9);
        }
    }

    #[test]
    fn test_zero_latitude_matches_simple_projection() {
        for lon in [12.5, 101.0, 222.2, 333.3] {
            let simple = ecliptic_to_equatorial(lon);
            let full = ecliptic_to_equatorial_with_latitude(lon, 0.0, OBLIQUITY_DEG);
            assert_abs_diff_eq!(simple.ra_hours, full.ra_hours, epsilon = 1e-9);
            assert_abs_diff_eq!(simple.dec_degrees, full.dec_degrees, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_ecliptic_pole() {
        let pole = ecliptic_to_equatorial_with_latitude(0.0, 90.0, OBLIQUITY_DEG);
        assert_abs_diff_eq!(pole.dec_degrees, 90.0 - OBLIQUITY_DEG, epsilon = 1e-6);
    }
}
