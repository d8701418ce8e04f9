//! Horizon and meridian event search.
//!
//! The window is scanned in fixed steps looking for a sign change of the
//! event function, then the crossing is refined by bisection. Rising and
//! setting use `altitude - horizon`; culminations use the hour angle offset
//! from the target wrapped to (-180, 180].

use crate::ephemeris::time::local_sidereal_degrees;
use crate::ephemeris::types::{AngleType, Equatorial, Observer};
use chrono::{DateTime, Duration, Utc};

/// Coarse scan step
const SCAN_STEP_MINUTES: i64 = 10;

/// Bisection stops once the bracket is narrower than this
const REFINE_TOLERANCE_MS: i64 = 500;

/// Wrap an angle to (-180, 180]
fn wrap_signed(deg: f64) -> f64 {
    let w = deg.rem_euclid(360.0);
    if w > 180.0 {
        w - 360.0
    } else {
        w
    }
}

/// Local hour angle in degrees [0, 360)
pub fn hour_angle(coords: &Equatorial, observer: &Observer, at: DateTime<Utc>) -> f64 {
    (local_sidereal_degrees(at, observer.lon) - coords.ra_hours * 15.0).rem_euclid(360.0)
}

/// Geometric altitude in degrees
pub fn altitude(coords: &Equatorial, observer: &Observer, at: DateTime<Utc>) -> f64 {
    let phi = observer.lat.to_radians();
    let dec = coords.dec_degrees.to_radians();
    let ha = hour_angle(coords, observer, at).to_radians();
    let sin_alt = phi.sin() * dec.sin() + phi.cos() * dec.cos() * ha.cos();
    sin_alt.clamp(-1.0, 1.0).asin().to_degrees()
}

fn event_value(
    coords: &Equatorial,
    observer: &Observer,
    angle: AngleType,
    at: DateTime<Utc>,
    horizon_deg: f64,
) -> f64 {
    match angle.hour_angle_degrees() {
        Some(target) => wrap_signed(hour_angle(coords, observer, at) - target),
        None => altitude(coords, observer, at) - horizon_deg,
    }
}

/// Does the interval [f0, f1] contain the crossing we want?
fn brackets(angle: AngleType, f0: f64, f1: f64) -> bool {
    match angle {
        AngleType::Rising => f0 < 0.0 && f1 >= 0.0,
        AngleType::Setting => f0 > 0.0 && f1 <= 0.0,
        // hour angle grows with time; the +180/-180 wrap is a jump, not a root
        AngleType::Culminating | AngleType::AntiCulminating => {
            f0 < 0.0 && f1 >= 0.0 && (f1 - f0) < 90.0
        }
    }
}

/// Find the first `angle` event in `[window_start, window_start + window)`.
///
/// `position` yields the target's equatorial coordinates at an instant; a
/// `None` from it ends the search without a result.
pub fn search_angle_event<F>(
    position: F,
    observer: &Observer,
    angle: AngleType,
    window_start: DateTime<Utc>,
    window: Duration,
    horizon_deg: f64,
) -> Option<DateTime<Utc>>
where
    F: Fn(DateTime<Utc>) -> Option<Equatorial>,
{
    let value_at = |t: DateTime<Utc>| -> Option<f64> {
        let coords = position(t)?;
        Some(event_value(&coords, observer, angle, t, horizon_deg))
    };

    let window_end = window_start + window;
    let step = Duration::minutes(SCAN_STEP_MINUTES);

    let mut t0 = window_start;
    let mut f0 = value_at(t0)?;
    while t0 < window_end {
        let t1 = std::cmp::min(t0 + step, window_end);
        let f1 = value_at(t1)?;

        if brackets(angle, f0, f1) {
            return Some(refine(&value_at, angle, t0, t1, f0));
        }

        t0 = t1;
        f0 = f1;
    }

    None
}

fn refine<G>(value_at: &G, angle: AngleType, mut lo: DateTime<Utc>, mut hi: DateTime<Utc>, mut f_lo: f64) -> DateTime<Utc>
where
    G: Fn(DateTime<Utc>) -> Option<f64>,
{
    while (hi - lo).num_milliseconds() > REFINE_TOLERANCE_MS {
        let mid = lo + Duration::milliseconds((hi - lo).num_milliseconds() / 2);
        let f_mid = match value_at(mid) {
            Some(v) => v,
            None => break,
        };
        if brackets(angle, f_lo, f_mid) {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }
    lo + Duration::milliseconds((hi - lo).num_milliseconds() / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::types::STAR_HORIZON_DEG;
    use chrono::TimeZone;

    fn search(coords: Equatorial, observer: Observer, angle: AngleType) -> Option<DateTime<Utc>> {
        let start = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        search_angle_event(|_| Some(coords), &observer, angle, start, Duration::days(1), STAR_HORIZON_DEG)
    }

    #[test]
    fn test_wrap_signed() {
        assert_eq!(wrap_signed(190.0), -170.0);
        assert_eq!(wrap_signed(-190.0), 170.0);
        assert_eq!(wrap_signed(180.0), 180.0);
    }

    #[test]
    fn test_equatorial_star_has_all_four_events() {
        let coords = Equatorial { ra_hours: 6.0, dec_degrees: 0.0 };
        let observer = Observer::new(0.0, 0.0);
        for angle in AngleType::ALL {
            assert!(search(coords, observer, angle).is_some(), "{:?} missing", angle);
        }
    }

    #[test]
    fn test_culminations_are_half_a_sidereal_day_apart() {
        let coords = Equatorial { ra_hours: 3.0, dec_degrees: 20.0 };
        let observer = Observer::new(45.0, 10.0);
        let upper = search(coords, observer, AngleType::Culminating).unwrap();
        let lower = search(coords, observer, AngleType::AntiCulminating).unwrap();
        let minutes = (upper - lower).num_seconds().abs() as f64 / 60.0;
        // 11h58m02s
        assert!((minutes - 718.03).abs() < 1.0, "separation {} min", minutes);
    }

    #[test]
    fn test_hour_angle_is_zero_at_culmination() {
        let coords = Equatorial { ra_hours: 17.5, dec_degrees: -30.0 };
        let observer = Observer::new(-33.9, 18.4);
        let t = search(coords, observer, AngleType::Culminating).unwrap();
        let ha = wrap_signed(hour_angle(&coords, &observer, t));
        assert!(ha.abs() < 0.05, "ha = {}", ha);
    }

    #[test]
    fn test_circumpolar_star_never_rises_or_sets() {
        let coords = Equatorial { ra_hours: 2.5, dec_degrees: 80.0 };
        let observer = Observer::new(60.0, 0.0);
        assert!(search(coords, observer, AngleType::Rising).is_none());
        assert!(search(coords, observer, AngleType::Setting).is_none());
        assert!(search(coords, observer, AngleType::Culminating).is_some());
        assert!(search(coords, observer, AngleType::AntiCulminating).is_some());
    }

    #[test]
    fn test_rising_altitude_matches_horizon() {
        let coords = Equatorial { ra_hours: 12.0, dec_degrees: 10.0 };
        let observer = Observer::new(40.0, -74.0);
        let t = search(coords, observer, AngleType::Rising).unwrap();
        let alt = altitude(&coords, &observer, t);
        assert!((alt - STAR_HORIZON_DEG).abs() < 0.05, "alt = {}", alt);
    }

    #[test]
    fn test_missing_position_yields_none() {
        let observer = Observer::new(0.0, 0.0);
        let start = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        let found = search_angle_event(|_| None, &observer, AngleType::Rising, start, Duration::days(1), 0.0);
        assert!(found.is_none());
    }
}
