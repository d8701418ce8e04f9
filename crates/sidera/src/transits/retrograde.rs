//! Calendar-based retrograde approximation.
//!
//! These windows only approximate the real stations. Results are not derived
//! from ephemeris speeds and should be read as "probably retrograde".

use crate::bodies::Body;
use crate::ephemeris::time::days_since_j2000;
use chrono::{DateTime, Datelike, Utc};
use std::f64::consts::TAU;

/// Day-of-year windows (inclusive) used for Mercury
const MERCURY_WINDOWS: [(u32, u32); 4] = [(10, 31), (105, 126), (200, 221), (295, 316)];

const VENUS_CYCLE_DAYS: f64 = 584.0;
const MARS_CYCLE_DAYS: f64 = 780.0;
/// Outer bodies count as retrograde while the cycle sine is above this
const OUTER_THRESHOLD: f64 = 0.3;

fn position_in_cycle(days: f64, cycle: f64) -> f64 {
    days.rem_euclid(cycle)
}

pub fn is_retrograde(body: Body, at: DateTime<Utc>) -> bool {
    match body {
        Body::Sun | Body::Moon => false,
        Body::Mercury => {
            let day = at.ordinal();
            MERCURY_WINDOWS
                .iter()
                .any(|&(start, end)| day >= start && day <= end)
        }
        Body::Venus => {
            let pos = position_in_cycle(days_since_j2000(at), VENUS_CYCLE_DAYS);
            pos > 540.0 || pos < 40.0
        }
        Body::Mars => position_in_cycle(days_since_j2000(at), MARS_CYCLE_DAYS) > 700.0,
        outer => match outer.info().retrograde_cycle_days {
            Some(period) => (days_since_j2000(at) / period * TAU).sin() > OUTER_THRESHOLD,
            None => false,
        },
    }
}

/// How many of the tracked bodies are retrograde at `at`
pub fn retrograde_count(at: DateTime<Utc>) -> usize {
    Body::ALL.iter().filter(|&&b| is_retrograde(b, at)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn j2000() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_luminaries_never_retrograde() {
        for day in 0..400 {
            let at = j2000() + Duration::days(day);
            assert!(!is_retrograde(Body::Sun, at));
            assert!(!is_retrograde(Body::Moon, at));
        }
    }

    #[test]
    fn test_mercury_windows_are_inclusive() {
        // 2023-01-10 is day 10, 2023-01-31 is day 31, 2023-02-01 is day 32
        let at = |m, d| Utc.with_ymd_and_hms(2023, m, d, 12, 0, 0).unwrap();
        assert!(!is_retrograde(Body::Mercury, at(1, 9)));
        assert!(is_retrograde(Body::Mercury, at(1, 10)));
        assert!(is_retrograde(Body::Mercury, at(1, 31)));
        assert!(!is_retrograde(Body::Mercury, at(2, 1)));
    }

    #[test]
    fn test_venus_cycle() {
        assert!(is_retrograde(Body::Venus, j2000()));
        assert!(!is_retrograde(Body::Venus, j2000() + Duration::days(40)));
        assert!(is_retrograde(Body::Venus, j2000() + Duration::days(541)));
        // before the epoch the cycle wraps the same way
        assert!(is_retrograde(Body::Venus, j2000() - Duration::days(10)));
    }

    #[test]
    fn test_mars_cycle() {
        assert!(!is_retrograde(Body::Mars, j2000()));
        assert!(is_retrograde(Body::Mars, j2000() + Duration::days(701)));
        assert!(!is_retrograde(Body::Mars, j2000() + Duration::days(781)));
    }

    #[test]
    fn test_outer_bodies_follow_sine() {
        // quarter of the jupiter cycle: sine = 1
        let peak = j2000() + Duration::hours((399.0 / 4.0 * 24.0) as i64);
        assert!(is_retrograde(Body::Jupiter, peak));
        // three quarters: sine = -1
        let trough = j2000() + Duration::hours((399.0 * 0.75 * 24.0) as i64);
        assert!(!is_retrograde(Body::Jupiter, trough));
        assert!(!is_retrograde(Body::Pluto, j2000()));
    }

    #[test]
    fn test_retrograde_count_in_range() {
        let count = retrograde_count(j2000());
        assert!(count <= 8);
    }
}
