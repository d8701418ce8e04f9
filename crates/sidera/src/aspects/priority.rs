//! Ranking, grouping and filtering of aspects for presentation.

use crate::aspects::types::{Aspect, AspectKind, AspectNature};
use serde::Serialize;

const LUMINARY_WEIGHT: f64 = 30.0;
const ANGLE_WEIGHT: f64 = 25.0;
const PERSONAL_WEIGHT: f64 = 5.0;
/// Orb score is `MAX_ORB_SCORE - orb`, floored at zero
const MAX_ORB_SCORE: f64 = 10.0;

const LUMINARIES: &[&str] = &["sun", "moon"];
const ANGLES: &[&str] = &["ascendant", "midheaven", "mc", "asc"];
const PERSONAL_PLANETS: &[&str] = &["mercury", "venus", "mars"];

pub const HIGH_PRIORITY: f64 = 50.0;
pub const MEDIUM_PRIORITY: f64 = 25.0;

fn kind_weight(kind: AspectKind) -> f64 {
    match kind {
        AspectKind::Conjunction => 20.0,
        AspectKind::Opposition => 18.0,
        AspectKind::Square => 16.0,
        AspectKind::Trine => 14.0,
        AspectKind::Sextile => 12.0,
        AspectKind::Quincunx => 8.0,
        AspectKind::SemiSquare | AspectKind::SesquiSquare => 6.0,
        AspectKind::SemiSextile | AspectKind::Quintile | AspectKind::Biquintile => 4.0,
    }
}

fn body_weight(id: &str) -> f64 {
    let mut weight = 0.0;
    if LUMINARIES.contains(&id) {
        weight += LUMINARY_WEIGHT;
    }
    if ANGLES.contains(&id) {
        weight += ANGLE_WEIGHT;
    }
    if PERSONAL_PLANETS.contains(&id) {
        weight += PERSONAL_WEIGHT;
    }
    weight
}

/// Score an aspect; higher is more important
pub fn aspect_priority(aspect: &Aspect) -> f64 {
    body_weight(&aspect.body_a)
        + body_weight(&aspect.body_b)
        + kind_weight(aspect.kind)
        + (MAX_ORB_SCORE - aspect.orb).max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

pub fn priority_tier(aspect: &Aspect) -> PriorityTier {
    let score = aspect_priority(aspect);
    if score >= HIGH_PRIORITY {
        PriorityTier::High
    } else if score >= MEDIUM_PRIORITY {
        PriorityTier::Medium
    } else {
        PriorityTier::Low
    }
}

/// Highest priority first; equal scores keep input order
pub fn sort_by_priority(aspects: &[Aspect]) -> Vec<Aspect> {
    let mut sorted = aspects.to_vec();
    sorted.sort_by(|a, b| aspect_priority(b).total_cmp(&aspect_priority(a)));
    sorted
}

pub fn top_aspects(aspects: &[Aspect], count: usize) -> Vec<Aspect> {
    let mut sorted = sort_by_priority(aspects);
    sorted.truncate(count);
    sorted
}

/// Aspects touching any of the given body ids
pub fn filter_by_bodies(aspects: &[Aspect], ids: &[&str]) -> Vec<Aspect> {
    aspects
        .iter()
        .filter(|a| ids.iter().any(|id| a.involves(id)))
        .cloned()
        .collect()
}

pub fn luminary_aspects(aspects: &[Aspect]) -> Vec<Aspect> {
    filter_by_bodies(aspects, LUMINARIES)
}

pub fn angle_aspects(aspects: &[Aspect]) -> Vec<Aspect> {
    filter_by_bodies(aspects, ANGLES)
}

pub fn filter_by_kind(aspects: &[Aspect], kinds: &[AspectKind]) -> Vec<Aspect> {
    aspects
        .iter()
        .filter(|a| kinds.contains(&a.kind))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NatureGroups {
    pub challenging: Vec<Aspect>,
    pub harmonious: Vec<Aspect>,
    pub neutral: Vec<Aspect>,
}

pub fn group_by_nature(aspects: &[Aspect]) -> NatureGroups {
    let mut groups = NatureGroups::default();
    for aspect in aspects {
        match aspect.kind.nature() {
            AspectNature::Challenging => groups.challenging.push(aspect.clone()),
            AspectNature::Harmonious => groups.harmonious.push(aspect.clone()),
            AspectNature::Neutral => groups.neutral.push(aspect.clone()),
        }
    }
    groups
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TierGroups {
    pub high: Vec<Aspect>,
    pub medium: Vec<Aspect>,
    pub low: Vec<Aspect>,
}

/// Split by tier, each tier sorted by priority
pub fn group_by_priority_tier(aspects: &[Aspect]) -> TierGroups {
    let sorted = sort_by_priority(aspects);
    let mut groups = TierGroups::default();
    for aspect in sorted {
        match priority_tier(&aspect) {
            PriorityTier::High => groups.high.push(aspect),
            PriorityTier::Medium => groups.medium.push(aspect),
            PriorityTier::Low => groups.low.push(aspect),
        }
    }
    groups
}
