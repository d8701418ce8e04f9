use crate::bodies::Body;
use crate::ephemeris::{AngleTarget, AngleType, EphemerisProvider, Observer};
use crate::parans::types::AngleEvent;
use chrono::{DateTime, Utc};

/// Search all four angles for one target in the day starting at `day_start`.
///
/// Each angle is searched on its own; a missing event is skipped and the
/// rest are still returned, so the result holds 0 to 4 events.
pub fn locate_angle_events<P: EphemerisProvider>(
    provider: &P,
    target: &AngleTarget,
    entity_id: &str,
    observer: &Observer,
    day_start: DateTime<Utc>,
) -> Vec<AngleEvent> {
    AngleType::ALL
        .iter()
        .filter_map(|&angle| match provider.angle_event(target, observer, angle, day_start) {
            Some(at) => Some(AngleEvent {
                entity_id: entity_id.to_string(),
                angle,
                at,
            }),
            None => {
                log::trace!("No {:?} event for {} on {}", angle, entity_id, day_start);
                None
            }
        })
        .collect()
}

/// Angle events of every moving body. Bodies without any event are left out.
pub fn planet_event_index<P: EphemerisProvider>(
    provider: &P,
    observer: &Observer,
    day_start: DateTime<Utc>,
) -> Vec<(Body, Vec<AngleEvent>)> {
    Body::ALL
        .iter()
        .filter_map(|&body| {
            let events = locate_angle_events(provider, &AngleTarget::Body(body), body.id(), observer, day_start);
            (!events.is_empty()).then_some((body, events))
        })
        .collect()
}
