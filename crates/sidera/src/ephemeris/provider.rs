use crate::bodies::Body;
use crate::ephemeris::horizon;
use crate::ephemeris::types::{AngleTarget, AngleType, Equatorial, Observer};
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// Number of fixed points an angle-event backend can hold at once.
pub const STAR_SLOT_CAPACITY: usize = 8;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Body {body} is not supported by this ephemeris")]
    UnsupportedBody { body: Body },
    #[error("Failed to calculate position for {body} at {datetime}: {message}")]
    CalculationFailed {
        body: Body,
        datetime: DateTime<Utc>,
        message: String,
    },
}

/// Source of body positions and horizon events.
///
/// Only the two coordinate methods are required; the angle-event search has
/// a default built on top of `equatorial_of`.
pub trait EphemerisProvider {
    /// Geocentric ecliptic longitude in degrees [0, 360)
    fn longitude_of(&self, body: Body, at: DateTime<Utc>) -> Result<f64, EphemerisError>;

    /// Geocentric equatorial coordinates of date
    fn equatorial_of(&self, body: Body, at: DateTime<Utc>) -> Result<Equatorial, EphemerisError>;

    /// How many fixed points may be registered for angle searches at once
    fn star_slot_capacity(&self) -> usize {
        STAR_SLOT_CAPACITY
    }

    /// Find the first `angle` event of `target` in the one-day window that
    /// starts at `window_start`. `None` is the normal answer for circumpolar
    /// or never-rising geometry.
    fn angle_event(
        &self,
        target: &AngleTarget,
        observer: &Observer,
        angle: AngleType,
        window_start: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        let altitude = target.horizon_altitude();
        horizon::search_angle_event(
            |t| match target {
                AngleTarget::Fixed(coords) => Some(*coords),
                AngleTarget::Body(body) => self.equatorial_of(*body, t).ok(),
            },
            observer,
            angle,
            window_start,
            Duration::days(1),
            altitude,
        )
    }
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn longitude_of(&self, body: Body, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        (**self).longitude_of(body, at)
    }

    fn equatorial_of(&self, body: Body, at: DateTime<Utc>) -> Result<Equatorial, EphemerisError> {
        (**self).equatorial_of(body, at)
    }

    fn star_slot_capacity(&self) -> usize {
        (**self).star_slot_capacity()
    }

    fn angle_event(
        &self,
        target: &AngleTarget,
        observer: &Observer,
        angle: AngleType,
        window_start: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        (**self).angle_event(target, observer, angle, window_start)
    }
}
