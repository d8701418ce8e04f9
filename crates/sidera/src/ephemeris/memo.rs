use crate::bodies::Body;
use crate::cache::SampleCache;
use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{AngleTarget, AngleType, Equatorial, Observer};
use chrono::{DateTime, Utc};

/// Provider wrapper that memoizes longitude samples in a borrowed cache.
///
/// Samples are keyed to the whole second. Equatorial lookups and angle
/// searches go straight to the inner provider.
pub struct MemoizedEphemeris<'c, P> {
    inner: P,
    samples: &'c SampleCache,
}

impl<'c, P: EphemerisProvider> MemoizedEphemeris<'c, P> {
    pub fn new(inner: P, samples: &'c SampleCache) -> Self {
        Self { inner, samples }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<'c, P: EphemerisProvider> EphemerisProvider for MemoizedEphemeris<'c, P> {
    fn longitude_of(&self, body: Body, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        self.samples
            .get_or_try_insert_with((body, at.timestamp()), || self.inner.longitude_of(body, at))
    }

    fn equatorial_of(&self, body: Body, at: DateTime<Utc>) -> Result<Equatorial, EphemerisError> {
        self.inner.equatorial_of(body, at)
    }

    fn star_slot_capacity(&self) -> usize {
        self.inner.star_slot_capacity()
    }

    fn angle_event(
        &self,
        target: &AngleTarget,
        observer: &Observer,
        angle: AngleType,
        window_start: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        self.inner.angle_event(target, observer, angle, window_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::MeanElementsEphemeris;
    use chrono::TimeZone;

    #[test]
    fn test_samples_are_cached() {
        let cache = SampleCache::new();
        let eph = MemoizedEphemeris::new(MeanElementsEphemeris::new(), &cache);
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let first = eph.longitude_of(Body::Mars, at).unwrap();
        assert_eq!(cache.len(), 1);
        let second = eph.longitude_of(Body::Mars, at).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup(&(Body::Mars, at.timestamp())), Some(first));
    }
}
