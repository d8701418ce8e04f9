use crate::catalog::CatalogPoint;
use crate::conjunctions::types::{Conjunction, Exactness, ExactnessGroups, Subject, EXACT_ORB};
use crate::natal::{resolved_placements, NatalPlacement};
use crate::normalize_degrees;
use crate::sky::SkyPosition;
use std::collections::HashSet;

/// Shortest angular distance between two longitudes, in [0, 180]
pub fn ecliptic_orb(a: f64, b: f64) -> f64 {
    let diff = (normalize_degrees(a) - normalize_degrees(b)).abs();
    diff.min(360.0 - diff)
}

/// Match every subject against every point.
///
/// A pair is kept when its orb is within the point's own orb, boundary
/// included. `is_personal` decides the personal flag per point. The result
/// is sorted tightest first; equal orbs keep input order.
pub fn match_conjunctions<'a, I, F>(subjects: I, points: &[CatalogPoint], is_personal: F) -> Vec<Conjunction>
where
    I: IntoIterator<Item = Subject<'a>>,
    F: Fn(&CatalogPoint) -> bool,
{
    let mut found = Vec::new();
    for subject in subjects {
        for point in points {
            let orb = ecliptic_orb(subject.longitude, point.longitude);
            if orb <= point.orb {
                found.push(Conjunction {
                    point: point.clone(),
                    body_id: subject.id.to_string(),
                    body_longitude: normalize_degrees(subject.longitude),
                    at: subject.at,
                    orb_degree: orb,
                    exactness: Exactness::from_orb(orb),
                    is_exact: orb <= EXACT_ORB,
                    is_personal: is_personal(point),
                });
            }
        }
    }
    sort_by_orb(&mut found);
    found
}

fn sort_by_orb(conjunctions: &mut [Conjunction]) {
    conjunctions.sort_by(|a, b| a.orb_degree.total_cmp(&b.orb_degree));
}

/// Catalog points touched by natal placements. Placements without a usable
/// sign are skipped.
pub fn natal_conjunctions(placements: &[NatalPlacement], points: &[CatalogPoint]) -> Vec<Conjunction> {
    let subjects = resolved_placements(placements).map(|(p, lon)| Subject {
        id: p.planet_id.as_str(),
        longitude: lon,
        at: None,
    });
    match_conjunctions(subjects, points, |_| true)
}

/// Catalog points touched by the current sky. A result is personal when the
/// same point already appears among `natal`.
pub fn transit_activations(
    positions: &[SkyPosition],
    points: &[CatalogPoint],
    natal: &[Conjunction],
) -> Vec<Conjunction> {
    let natal_ids: HashSet<&str> = natal.iter().map(|c| c.point.id.as_str()).collect();
    let subjects = positions.iter().map(|p| Subject {
        id: p.body.id(),
        longitude: p.longitude,
        at: Some(p.at),
    });
    match_conjunctions(subjects, points, |point| natal_ids.contains(point.id.as_str()))
}

/// Transiting bodies returning to the natal degree of an existing natal
/// conjunction, using that point's orb.
pub fn personal_transit_activations(positions: &[SkyPosition], natal: &[Conjunction]) -> Vec<Conjunction> {
    let mut found = Vec::new();
    for position in positions {
        for natal_conj in natal {
            let orb = ecliptic_orb(position.longitude, natal_conj.body_longitude);
            if orb <= natal_conj.point.orb {
                found.push(Conjunction {
                    point: natal_conj.point.clone(),
                    body_id: position.body.id().to_string(),
                    body_longitude: position.longitude,
                    at: Some(position.at),
                    orb_degree: orb,
                    exactness: Exactness::from_orb(orb),
                    is_exact: orb <= EXACT_ORB,
                    is_personal: true,
                });
            }
        }
    }
    sort_by_orb(&mut found);
    found
}

pub fn group_by_exactness(conjunctions: &[Conjunction]) -> ExactnessGroups {
    let mut groups = ExactnessGroups::default();
    for c in conjunctions {
        match Exactness::from_orb(c.orb_degree) {
            Exactness::Exact => groups.exact.push(c.clone()),
            Exactness::Close => groups.close.push(c.clone()),
            Exactness::Wide => groups.wide.push(c.clone()),
        }
    }
    groups
}

pub fn tightest(conjunctions: &[Conjunction]) -> Option<&Conjunction> {
    conjunctions
        .iter()
        .min_by(|a, b| a.orb_degree.total_cmp(&b.orb_degree))
}

/// Does any natal placement touch any of the points?
pub fn has_conjunctions(placements: &[NatalPlacement], points: &[CatalogPoint]) -> bool {
    resolved_placements(placements)
        .any(|(_, lon)| points.iter().any(|p| ecliptic_orb(lon, p.longitude) <= p.orb))
}
