//! Low-precision analytic ephemeris from mean orbital elements.
//!
//! Elements are referred to the ecliptic and equinox of date, so the
//! resulting longitudes are tropical. Accuracy is a few arc-minutes for the
//! planets and around a tenth of a degree for the Moon, which is plenty for
//! degree-level orbs and minute-level paran timing. Light time and
//! aberration are ignored.

use crate::bodies::Body;
use crate::coords::ecliptic_to_equatorial_with_latitude;
use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::time::julian_day;
use crate::ephemeris::types::Equatorial;
use crate::normalize_degrees;
use chrono::{DateTime, Utc};

/// Julian day of 2000 Jan 0.0 UT, the element epoch
const ELEMENT_EPOCH_JD: f64 = 2_451_543.5;

/// Keplerian elements at day number `d`
#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    /// Longitude of the ascending node
    node: f64,
    /// Inclination
    incl: f64,
    /// Argument of perihelion
    peri: f64,
    /// Semi-major axis (AU, Earth radii for the Moon)
    axis: f64,
    /// Eccentricity
    ecc: f64,
    /// Mean anomaly
    mean_anomaly: f64,
}

fn sin_d(deg: f64) -> f64 {
    deg.to_radians().sin()
}

fn cos_d(deg: f64) -> f64 {
    deg.to_radians().cos()
}

fn elements(body: Body, d: f64) -> OrbitalElements {
    match body {
        Body::Sun => OrbitalElements {
            node: 0.0,
            incl: 0.0,
            peri: 282.9404 + 4.70935e-5 * d,
            axis: 1.0,
            ecc: 0.016709 - 1.151e-9 * d,
            mean_anomaly: 356.0470 + 0.985_600_258_5 * d,
        },
        Body::Moon => OrbitalElements {
            node: 125.1228 - 0.052_953_808_3 * d,
            incl: 5.1454,
            peri: 318.0634 + 0.164_357_322_3 * d,
            axis: 60.2666,
            ecc: 0.054900,
            mean_anomaly: 115.3654 + 13.064_992_950_9 * d,
        },
        Body::Mercury => OrbitalElements {
            node: 48.3313 + 3.24587e-5 * d,
            incl: 7.0047 + 5.00e-8 * d,
            peri: 29.1241 + 1.01444e-5 * d,
            axis: 0.387098,
            ecc: 0.205635 + 5.59e-10 * d,
            mean_anomaly: 168.6562 + 4.092_334_436_8 * d,
        },
        Body::Venus => OrbitalElements {
            node: 76.6799 + 2.46590e-5 * d,
            incl: 3.3946 + 2.75e-8 * d,
            peri: 54.8910 + 1.38374e-5 * d,
            axis: 0.723330,
            ecc: 0.006773 - 1.302e-9 * d,
            mean_anomaly: 48.0052 + 1.602_130_224_4 * d,
        },
        Body::Mars => OrbitalElements {
            node: 49.5574 + 2.11081e-5 * d,
            incl: 1.8497 - 1.78e-8 * d,
            peri: 286.5016 + 2.92961e-5 * d,
            axis: 1.523688,
            ecc: 0.093405 + 2.516e-9 * d,
            mean_anomaly: 18.6021 + 0.524_020_776_6 * d,
        },
        Body::Jupiter => OrbitalElements {
            node: 100.4542 + 2.76854e-5 * d,
            incl: 1.3030 - 1.557e-7 * d,
            peri: 273.8777 + 1.64505e-5 * d,
            axis: 5.20256,
            ecc: 0.048498 + 4.469e-9 * d,
            mean_anomaly: 19.8950 + 0.083_085_300_1 * d,
        },
        Body::Saturn => OrbitalElements {
            node: 113.6634 + 2.38980e-5 * d,
            incl: 2.4886 - 1.081e-7 * d,
            peri: 339.3939 + 2.97661e-5 * d,
            axis: 9.55475,
            ecc: 0.055546 - 9.499e-9 * d,
            mean_anomaly: 316.9670 + 0.033_444_228_2 * d,
        },
        Body::Uranus => OrbitalElements {
            node: 74.0005 + 1.3978e-5 * d,
            incl: 0.7733 + 1.9e-8 * d,
            peri: 96.6612 + 3.0565e-5 * d,
            axis: 19.18171 - 1.55e-8 * d,
            ecc: 0.047318 + 7.45e-9 * d,
            mean_anomaly: 142.5905 + 0.011_725_806 * d,
        },
        Body::Neptune => OrbitalElements {
            node: 131.7806 + 3.0173e-5 * d,
            incl: 1.7700 - 2.55e-7 * d,
            peri: 272.8461 - 6.027e-6 * d,
            axis: 30.05826 + 3.313e-8 * d,
            ecc: 0.008606 + 2.15e-9 * d,
            mean_anomaly: 260.2471 + 0.005_995_147 * d,
        },
        // Pluto is handled by a dedicated series; these are never used
        Body::Pluto => OrbitalElements {
            node: 0.0,
            incl: 0.0,
            peri: 0.0,
            axis: 0.0,
            ecc: 0.0,
            mean_anomaly: 0.0,
        },
    }
}

/// Solve Kepler's equation, returning the eccentric anomaly in degrees
fn eccentric_anomaly(mean_anomaly: f64, ecc: f64) -> f64 {
    let m = normalize_degrees(mean_anomaly);
    let mut e = m + ecc.to_degrees() * sin_d(m) * (1.0 + ecc * cos_d(m));
    for _ in 0..8 {
        let delta = (e - ecc.to_degrees() * sin_d(e) - m) / (1.0 - ecc * cos_d(e));
        e -= delta;
        if delta.abs() < 1e-9 {
            break;
        }
    }
    e
}

/// Position in the orbital plane rotated to ecliptic rectangular coordinates
fn orbit_position(el: &OrbitalElements) -> [f64; 3] {
    let e_anom = eccentric_anomaly(el.mean_anomaly, el.ecc);
    let xv = el.axis * (cos_d(e_anom) - el.ecc);
    let yv = el.axis * ((1.0 - el.ecc * el.ecc).sqrt() * sin_d(e_anom));
    let v = yv.atan2(xv).to_degrees();
    let r = (xv * xv + yv * yv).sqrt();

    let vw = v + el.peri;
    [
        r * (cos_d(el.node) * cos_d(vw) - sin_d(el.node) * sin_d(vw) * cos_d(el.incl)),
        r * (sin_d(el.node) * cos_d(vw) + cos_d(el.node) * sin_d(vw) * cos_d(el.incl)),
        r * (sin_d(vw) * sin_d(el.incl)),
    ]
}

fn to_spherical(xyz: [f64; 3]) -> (f64, f64, f64) {
    let [x, y, z] = xyz;
    let lon = normalize_degrees(y.atan2(x).to_degrees());
    let lat = z.atan2((x * x + y * y).sqrt()).to_degrees();
    let r = (x * x + y * y + z * z).sqrt();
    (lon, lat, r)
}

fn from_spherical(lon: f64, lat: f64, r: f64) -> [f64; 3] {
    [
        r * cos_d(lon) * cos_d(lat),
        r * sin_d(lon) * cos_d(lat),
        r * sin_d(lat),
    ]
}

/// Geocentric rectangular ecliptic coordinates of the Sun (AU)
fn sun_geocentric(d: f64) -> [f64; 3] {
    let mut xyz = orbit_position(&elements(Body::Sun, d));
    xyz[2] = 0.0;
    xyz
}

fn moon_ecliptic(d: f64) -> (f64, f64) {
    let moon = elements(Body::Moon, d);
    let sun = elements(Body::Sun, d);
    let (lon, lat, _) = to_spherical(orbit_position(&moon));

    let ms = sun.mean_anomaly;
    let mm = moon.mean_anomaly;
    let ls = sun.mean_anomaly + sun.peri;
    let lm = moon.mean_anomaly + moon.peri + moon.node;
    let dd = lm - ls;
    let f = lm - moon.node;

    let lon_pert = -1.274 * sin_d(mm - 2.0 * dd)
        + 0.658 * sin_d(2.0 * dd)
        - 0.186 * sin_d(ms)
        - 0.059 * sin_d(2.0 * mm - 2.0 * dd)
        - 0.057 * sin_d(mm - 2.0 * dd + ms)
        + 0.053 * sin_d(mm + 2.0 * dd)
        + 0.046 * sin_d(2.0 * dd - ms)
        + 0.041 * sin_d(mm - ms)
        - 0.035 * sin_d(dd)
        - 0.031 * sin_d(mm + ms)
        - 0.015 * sin_d(2.0 * f - 2.0 * dd)
        + 0.011 * sin_d(mm - 4.0 * dd);

    let lat_pert = -0.173 * sin_d(f - 2.0 * dd)
        - 0.055 * sin_d(mm - f - 2.0 * dd)
        - 0.046 * sin_d(mm + f - 2.0 * dd)
        + 0.033 * sin_d(f + 2.0 * dd)
        + 0.017 * sin_d(2.0 * mm + f);

    (normalize_degrees(lon + lon_pert), lat + lat_pert)
}

/// Heliocentric ecliptic longitude, latitude and distance of Pluto
fn pluto_heliocentric(d: f64) -> (f64, f64, f64) {
    let s = 50.03 + 0.033_459_652 * d;
    let p = 238.95 + 0.003_968_789 * d;

    let lon = 238.9508 + 0.00400703 * d
        - 19.799 * sin_d(p) + 19.848 * cos_d(p)
        + 0.897 * sin_d(2.0 * p) - 4.956 * cos_d(2.0 * p)
        + 0.610 * sin_d(3.0 * p) + 1.211 * cos_d(3.0 * p)
        - 0.341 * sin_d(4.0 * p) - 0.190 * cos_d(4.0 * p)
        + 0.128 * sin_d(5.0 * p) - 0.034 * cos_d(5.0 * p)
        - 0.038 * sin_d(6.0 * p) + 0.031 * cos_d(6.0 * p)
        + 0.020 * sin_d(s - p) - 0.010 * cos_d(s - p);

    let lat = -3.9082
        - 5.453 * sin_d(p) - 14.975 * cos_d(p)
        + 3.527 * sin_d(2.0 * p) + 1.673 * cos_d(2.0 * p)
        - 1.051 * sin_d(3.0 * p) + 0.328 * cos_d(3.0 * p)
        + 0.179 * sin_d(4.0 * p) - 0.292 * cos_d(4.0 * p)
        + 0.019 * sin_d(5.0 * p) + 0.100 * cos_d(5.0 * p)
        - 0.031 * sin_d(6.0 * p) - 0.026 * cos_d(6.0 * p)
        + 0.011 * cos_d(s - p);

    let r = 40.72
        + 6.68 * sin_d(p) + 6.90 * cos_d(p)
        - 1.18 * sin_d(2.0 * p) - 0.03 * cos_d(2.0 * p)
        + 0.15 * sin_d(3.0 * p) - 0.14 * cos_d(3.0 * p);

    (lon, lat, r)
}

/// Longitude/latitude corrections for the mutual Jupiter-Saturn-Uranus terms
fn giant_perturbations(body: Body, d: f64) -> (f64, f64) {
    let mj = elements(Body::Jupiter, d).mean_anomaly;
    let ms = elements(Body::Saturn, d).mean_anomaly;
    let mu = elements(Body::Uranus, d).mean_anomaly;
    match body {
        Body::Jupiter => (
            -0.332 * sin_d(2.0 * mj - 5.0 * ms - 67.6)
                - 0.056 * sin_d(2.0 * mj - 2.0 * ms + 21.0)
                + 0.042 * sin_d(3.0 * mj - 5.0 * ms + 21.0)
                - 0.036 * sin_d(mj - 2.0 * ms)
                + 0.022 * cos_d(mj - ms)
                + 0.023 * sin_d(2.0 * mj - 3.0 * ms + 52.0)
                - 0.016 * sin_d(mj - 5.0 * ms - 69.0),
            0.0,
        ),
        Body::Saturn => (
            0.812 * sin_d(2.0 * mj - 5.0 * ms - 67.6)
                - 0.229 * cos_d(2.0 * mj - 4.0 * ms - 2.0)
                + 0.119 * sin_d(mj - 2.0 * ms - 3.0)
                + 0.046 * sin_d(2.0 * mj - 6.0 * ms - 69.0)
                + 0.014 * sin_d(mj - 3.0 * ms + 32.0),
            -0.020 * cos_d(2.0 * mj - 4.0 * ms - 2.0) + 0.018 * sin_d(2.0 * mj - 6.0 * ms - 49.0),
        ),
        Body::Uranus => (
            0.040 * sin_d(ms - 2.0 * mu + 6.0)
                + 0.035 * sin_d(ms - 3.0 * mu + 33.0)
                - 0.015 * sin_d(mj - mu + 20.0),
            0.0,
        ),
        _ => (0.0, 0.0),
    }
}

/// Analytic ephemeris needing no data files.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanElementsEphemeris;

impl MeanElementsEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Mean obliquity of date in degrees
    pub fn obliquity(d: f64) -> f64 {
        23.4393 - 3.563e-7 * d
    }

    fn day_number(at: DateTime<Utc>) -> f64 {
        julian_day(at) - ELEMENT_EPOCH_JD
    }

    /// Geocentric ecliptic longitude and latitude of date, in degrees
    pub fn ecliptic_of(&self, body: Body, at: DateTime<Utc>) -> (f64, f64) {
        let d = Self::day_number(at);
        match body {
            Body::Sun => {
                let (lon, _, _) = to_spherical(sun_geocentric(d));
                (lon, 0.0)
            }
            Body::Moon => moon_ecliptic(d),
            Body::Pluto => {
                let (lon, lat, r) = pluto_heliocentric(d);
                let helio = from_spherical(lon, lat, r);
                geocentric(helio, d)
            }
            planet => {
                let helio = orbit_position(&elements(planet, d));
                let (lon, lat, r) = to_spherical(helio);
                let (dlon, dlat) = giant_perturbations(planet, d);
                geocentric(from_spherical(lon + dlon, lat + dlat, r), d)
            }
        }
    }
}

fn geocentric(helio: [f64; 3], d: f64) -> (f64, f64) {
    let sun = sun_geocentric(d);
    let (lon, lat, _) = to_spherical([helio[0] + sun[0], helio[1] + sun[1], helio[2] + sun[2]]);
    (lon, lat)
}

impl EphemerisProvider for MeanElementsEphemeris {
    fn longitude_of(&self, body: Body, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        Ok(self.ecliptic_of(body, at).0)
    }

    fn equatorial_of(&self, body: Body, at: DateTime<Utc>) -> Result<Equatorial, EphemerisError> {
        let (lon, lat) = self.ecliptic_of(body, at);
        let obliquity = Self::obliquity(Self::day_number(at));
        Ok(ecliptic_to_equatorial_with_latitude(lon, lat, obliquity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn angular_gap(a: f64, b: f64) -> f64 {
        let diff = (a - b).abs();
        diff.min(360.0 - diff)
    }

    #[test]
    fn test_kepler_circular_orbit() {
        assert!((eccentric_anomaly(123.0, 0.0) - 123.0).abs() < 1e-9);
    }

    #[test]
    fn test_sun_at_j2000() {
        let eph = MeanElementsEphemeris::new();
        let at = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let lon = eph.longitude_of(Body::Sun, at).unwrap();
        assert!(angular_gap(lon, 280.38) < 0.2, "sun lon = {}", lon);
    }

    #[test]
    fn test_sun_at_equinox() {
        let eph = MeanElementsEphemeris::new();
        // March equinox 2024-03-20 03:06 UTC
        let at = Utc.with_ymd_and_hms(2024, 3, 20, 3, 6, 0).unwrap();
        let lon = eph.longitude_of(Body::Sun, at).unwrap();
        assert!(angular_gap(lon, 0.0) < 0.1, "sun lon = {}", lon);
    }

    #[test]
    fn test_all_longitudes_normalized() {
        let eph = MeanElementsEphemeris::new();
        let at = Utc.with_ymd_and_hms(1987, 7, 14, 6, 30, 0).unwrap();
        for body in Body::ALL {
            let lon = eph.longitude_of(body, at).unwrap();
            assert!((0.0..360.0).contains(&lon), "{:?} lon = {}", body, lon);
            let eq = eph.equatorial_of(body, at).unwrap();
            assert!((0.0..24.0).contains(&eq.ra_hours));
            assert!(eq.dec_degrees.abs() <= 90.0);
        }
    }

    #[test]
    fn test_inner_planets_stay_near_sun() {
        let eph = MeanElementsEphemeris::new();
        for month in 1..=12 {
            let at = Utc.with_ymd_and_hms(2023, month, 15, 0, 0, 0).unwrap();
            let sun = eph.longitude_of(Body::Sun, at).unwrap();
            let mercury = eph.longitude_of(Body::Mercury, at).unwrap();
            let venus = eph.longitude_of(Body::Venus, at).unwrap();
            assert!(angular_gap(sun, mercury) <= 29.0, "mercury elongation too large");
            assert!(angular_gap(sun, venus) <= 48.0, "venus elongation too large");
        }
    }
}
