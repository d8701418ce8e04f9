use crate::bodies::Body;
use crate::catalog::CatalogPoint;
use crate::coords::ecliptic_to_equatorial;
use crate::ephemeris::{AngleTarget, EphemerisProvider, Observer};
use crate::parans::locator::{locate_angle_events, planet_event_index};
use crate::parans::slots::{SlotError, StarSlots};
use crate::parans::types::{AngleEvent, Paran, ParanGroup, ParanQuery, ParanSettings};
use chrono::{DateTime, Utc};

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Correlates star and planet angle events into parans.
pub struct ParanCorrelator<'a, P> {
    provider: &'a P,
    settings: ParanSettings,
}

impl<'a, P: EphemerisProvider> ParanCorrelator<'a, P> {
    pub fn new(provider: &'a P, settings: ParanSettings) -> Self {
        Self { provider, settings }
    }

    /// Stars registered per batch: the smaller of the configured and the
    /// provider's slot count
    pub fn batch_size(&self) -> usize {
        self.settings.star_slots.min(self.provider.star_slot_capacity())
    }

    /// All parans between `stars` and the moving bodies for a query, tightest
    /// first. Without a full observer location the result is empty.
    pub fn compute_parans(&self, stars: &[CatalogPoint], query: &ParanQuery) -> Vec<Paran> {
        let Some(observer) = query.observer() else {
            log::debug!("Paran query for {} has no observer location", query.date);
            return Vec::new();
        };
        let day_start = query.day_start();

        let planet_events = planet_event_index(self.provider, &observer, day_start);
        let star_events = match self.star_event_batches(stars, &observer, day_start) {
            Ok(events) => events,
            Err(e) => {
                log::warn!("Cannot register stars for paran search: {}", e);
                return Vec::new();
            }
        };

        let mut parans = Vec::new();
        for (star, events) in star_events {
            for star_event in &events {
                self.match_planet_events(star, star_event, &planet_events, &mut parans);
            }
        }

        parans.sort_by_key(|p| p.orb_minutes);
        log::debug!("Found {} parans for {} stars on {}", parans.len(), stars.len(), query.date);
        parans
    }

    /// Angle events of every star, processed in sequential slot-sized batches.
    ///
    /// Stars with no events are still listed, with an empty vector.
    pub fn star_event_batches<'s>(
        &self,
        stars: &'s [CatalogPoint],
        observer: &Observer,
        day_start: DateTime<Utc>,
    ) -> Result<Vec<(&'s CatalogPoint, Vec<AngleEvent>)>, SlotError> {
        let mut slots = StarSlots::with_capacity(self.batch_size())?;
        let mut results = Vec::with_capacity(stars.len());

        for (batch_no, batch) in stars.chunks(slots.capacity()).enumerate() {
            slots.clear();
            let mut registered = Vec::with_capacity(batch.len());
            for star in batch {
                let index = slots.register(&star.id, ecliptic_to_equatorial(star.longitude))?;
                registered.push((index, star));
            }
            log::trace!("Batch {}: {} stars registered", batch_no, slots.len());

            for (index, star) in registered {
                let Some(slot) = slots.get(index) else {
                    continue;
                };
                let target = AngleTarget::Fixed(slot.coords);
                let events = locate_angle_events(self.provider, &target, &slot.star_id, observer, day_start);
                results.push((star, events));
            }
        }

        Ok(results)
    }

    fn match_planet_events(
        &self,
        star: &CatalogPoint,
        star_event: &AngleEvent,
        planet_events: &[(Body, Vec<AngleEvent>)],
        out: &mut Vec<Paran>,
    ) {
        let window = f64::from(self.settings.window_minutes);
        for (planet, events) in planet_events {
            for planet_event in events {
                let diff = (planet_event.at - star_event.at).num_milliseconds().abs() as f64 / MILLIS_PER_MINUTE;
                if diff <= window {
                    out.push(Paran {
                        star: star.clone(),
                        star_angle: star_event.angle,
                        star_time: star_event.at,
                        planet: *planet,
                        planet_angle: planet_event.angle,
                        planet_time: planet_event.at,
                        orb_minutes: diff.round() as u32,
                    });
                }
            }
        }
    }
}

/// Group parans by star id, groups in order of first appearance
pub fn group_parans_by_star(parans: &[Paran]) -> Vec<ParanGroup> {
    let mut groups: Vec<ParanGroup> = Vec::new();
    for paran in parans {
        match groups.iter_mut().find(|g| g.star.id == paran.star.id) {
            Some(group) => group.parans.push(paran.clone()),
            None => groups.push(ParanGroup {
                star: paran.star.clone(),
                parans: vec![paran.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{AngleType, MeanElementsEphemeris};
    use chrono::{NaiveDate, TimeZone};

    fn paran(star_id: &str, orb_minutes: u32) -> Paran {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Paran {
            star: CatalogPoint::star(star_id, star_id, 0.0, 1.0),
            star_angle: AngleType::Rising,
            star_time: at,
            planet: Body::Sun,
            planet_angle: AngleType::Setting,
            planet_time: at,
            orb_minutes,
        }
    }

    #[test]
    fn test_group_parans_by_star() {
        let parans = vec![paran("sirius", 3), paran("regulus", 5), paran("sirius", 9)];
        let groups = group_parans_by_star(&parans);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].star.id, "sirius");
        assert_eq!(groups[0].parans.len(), 2);
        assert_eq!(groups[1].star.id, "regulus");
        for group in &groups {
            assert!(group.parans.iter().all(|p| p.star.id == group.star.id));
        }
    }

    #[test]
    fn test_missing_observer_yields_empty() {
        let eph = MeanElementsEphemeris::new();
        let correlator = ParanCorrelator::new(&eph, ParanSettings::default());
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let stars = vec![CatalogPoint::star("regulus", "Regulus", 150.0, 2.0)];

        assert!(correlator.compute_parans(&stars, &ParanQuery::new(date, 0, None, None)).is_empty());
        assert!(correlator.compute_parans(&stars, &ParanQuery::new(date, 0, Some(51.5), None)).is_empty());
        assert!(correlator.compute_parans(&stars, &ParanQuery::new(date, 0, None, Some(0.0))).is_empty());
    }

    #[test]
    fn test_batch_size_respects_settings() {
        let eph = MeanElementsEphemeris::new();
        let settings = ParanSettings {
            star_slots: 3,
            ..Default::default()
        };
        assert_eq!(ParanCorrelator::new(&eph, settings).batch_size(), 3);
        let settings = ParanSettings {
            star_slots: 64,
            ..Default::default()
        };
        assert_eq!(ParanCorrelator::new(&eph, settings).batch_size(), 8);
    }

    #[test]
    fn test_zero_slots_gives_empty_result() {
        let eph = MeanElementsEphemeris::new();
        let settings = ParanSettings {
            star_slots: 0,
            ..Default::default()
        };
        let correlator = ParanCorrelator::new(&eph, settings);
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let stars = vec![CatalogPoint::star("regulus", "Regulus", 150.0, 2.0)];
        assert!(correlator
            .compute_parans(&stars, &ParanQuery::new(date, 0, Some(51.5), Some(0.0)))
            .is_empty());
    }
}
