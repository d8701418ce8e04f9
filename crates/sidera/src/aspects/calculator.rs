use crate::aspects::types::{
    Aspect, AspectSettings, AspectTemplate, TransitNatalAspect, DAILY_ASPECTS, MINOR_ASPECTS,
    TRANSIT_ASPECTS,
};
use crate::conjunctions::ecliptic_orb;
use crate::natal::{resolved_placements, NatalPlacement};
use crate::normalize_degrees;
use crate::sky::SkyPosition;
use crate::zodiac::longitude_to_zodiac;

/// Weight of a transiting body when ranking transit-to-natal aspects
const TRANSIT_IMPORTANCE: &[(&str, u32)] = &[
    ("pluto", 10),
    ("neptune", 9),
    ("uranus", 8),
    ("saturn", 7),
    ("jupiter", 6),
    ("mars", 5),
    ("sun", 4),
    ("venus", 3),
    ("mercury", 2),
    ("moon", 1),
];

/// Weight of the natal point being aspected
const NATAL_IMPORTANCE: &[(&str, u32)] = &[
    ("sun", 10),
    ("moon", 9),
    ("ascendant", 8),
    ("midheaven", 7),
    ("mercury", 6),
    ("venus", 5),
    ("mars", 5),
    ("jupiter", 4),
    ("saturn", 4),
    ("uranus", 3),
    ("neptune", 3),
    ("pluto", 3),
    ("northnode", 2),
    ("southnode", 2),
    ("chiron", 2),
];

/// Ids missing from the importance tables
const DEFAULT_IMPORTANCE: u32 = 1;

fn lookup_importance(table: &[(&str, u32)], id: &str) -> u32 {
    table
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, weight)| *weight)
        .unwrap_or(DEFAULT_IMPORTANCE)
}

pub fn transit_importance(id: &str) -> u32 {
    lookup_importance(TRANSIT_IMPORTANCE, id)
}

pub fn natal_importance(id: &str) -> u32 {
    lookup_importance(NATAL_IMPORTANCE, id)
}

/// Result of matching a separation against the template table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectMatch {
    pub template: AspectTemplate,
    pub measured_angle: f64,
    pub orb: f64,
}

/// Whether `moving` is heading into the exact aspect with `reference`.
///
/// This looks only at positions: it is applying when within 1° of either
/// exact target longitude or when the separation is still wider than the
/// aspect angle. It does not use speeds.
pub fn is_aspect_applying(moving: f64, reference: f64, aspect_angle: f64) -> bool {
    let current = ecliptic_orb(moving, reference);
    let target = normalize_degrees(reference + aspect_angle);
    let alt_target = normalize_degrees(reference - aspect_angle);
    let exact_orb = ecliptic_orb(moving, target).min(ecliptic_orb(moving, alt_target));
    exact_orb < 1.0 || current > aspect_angle
}

/// Aspect calculator over an ordered template table
#[derive(Debug, Clone)]
pub struct AspectCalculator {
    templates: Vec<AspectTemplate>,
}

impl AspectCalculator {
    pub fn new(templates: Vec<AspectTemplate>) -> Self {
        Self { templates }
    }

    /// Calculator for two transiting bodies
    pub fn daily(settings: &AspectSettings) -> Self {
        let mut templates = DAILY_ASPECTS.to_vec();
        if settings.include_minor {
            templates.extend_from_slice(&MINOR_ASPECTS);
        }
        Self::new(apply_orb_overrides(templates, settings))
    }

    /// Calculator for a transiting body against a natal placement
    pub fn transit(settings: &AspectSettings) -> Self {
        Self::new(apply_orb_overrides(TRANSIT_ASPECTS.to_vec(), settings))
    }

    pub fn templates(&self) -> &[AspectTemplate] {
        &self.templates
    }

    /// Best template for a pair of longitudes.
    ///
    /// The tightest match wins; equal orbs go to the earlier template.
    pub fn match_aspect(&self, lon_a: f64, lon_b: f64) -> Option<AspectMatch> {
        let measured = ecliptic_orb(lon_a, lon_b);
        let mut best: Option<AspectMatch> = None;
        for template in &self.templates {
            let orb = (measured - template.angle).abs();
            if orb > template.orb {
                continue;
            }
            if best.map_or(true, |b| orb < b.orb) {
                best = Some(AspectMatch {
                    template: *template,
                    measured_angle: measured,
                    orb,
                });
            }
        }
        best
    }

    /// Aspect between two bodies, with `a` treated as the moving one for the
    /// applying estimate
    pub fn calculate_aspect(&self, id_a: &str, lon_a: f64, id_b: &str, lon_b: f64) -> Option<Aspect> {
        let m = self.match_aspect(lon_a, lon_b)?;
        Some(Aspect {
            body_a: id_a.to_string(),
            body_b: id_b.to_string(),
            kind: m.template.kind,
            measured_angle: m.measured_angle,
            orb: m.orb,
            nature: m.template.nature,
            is_applying: is_aspect_applying(lon_a, lon_b, m.template.angle),
        })
    }

    /// Aspects over all unordered pairs, tightest first
    pub fn daily_aspects(&self, positions: &[SkyPosition]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                if let Some(aspect) = self.calculate_aspect(a.body.id(), a.longitude, b.body.id(), b.longitude) {
                    aspects.push(aspect);
                }
            }
        }
        aspects.sort_by(|a, b| a.orb.total_cmp(&b.orb));
        aspects
    }

    /// Every transiting body against every usable natal placement.
    ///
    /// Sorted by combined importance, then by orb.
    pub fn transit_natal_aspects(
        &self,
        positions: &[SkyPosition],
        placements: &[NatalPlacement],
    ) -> Vec<TransitNatalAspect> {
        let natal: Vec<(&NatalPlacement, f64)> = resolved_placements(placements).collect();
        let mut aspects = Vec::new();

        for transit in positions {
            let transit_sign = longitude_to_zodiac(transit.longitude).sign.id;
            for (placement, natal_lon) in &natal {
                let Some(m) = self.match_aspect(transit.longitude, *natal_lon) else {
                    continue;
                };
                aspects.push(TransitNatalAspect {
                    transit_body: transit.body,
                    transit_longitude: transit.longitude,
                    transit_sign,
                    natal_id: placement.planet_id.clone(),
                    natal_longitude: *natal_lon,
                    natal_sign: longitude_to_zodiac(*natal_lon).sign.id,
                    kind: m.template.kind,
                    aspect_angle: m.template.angle,
                    orb: m.orb,
                    nature: m.template.nature,
                    is_applying: is_aspect_applying(transit.longitude, *natal_lon, m.template.angle),
                    importance: transit_importance(transit.body.id()) + natal_importance(&placement.planet_id),
                });
            }
        }

        aspects.sort_by(|a, b| {
            b.importance
                .cmp(&a.importance)
                .then_with(|| a.orb.total_cmp(&b.orb))
        });
        aspects
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::daily(&AspectSettings::default())
    }
}

fn apply_orb_overrides(mut templates: Vec<AspectTemplate>, settings: &AspectSettings) -> Vec<AspectTemplate> {
    for template in &mut templates {
        if let Some(orb) = settings.orb_overrides.get(&template.kind) {
            template.orb = *orb;
        }
    }
    templates
}

/// Aspects tighter than `max_orb`, at most `limit` of them, in input order
pub fn significant_aspects(aspects: &[Aspect], max_orb: f64, limit: usize) -> Vec<Aspect> {
    aspects
        .iter()
        .filter(|a| a.orb < max_orb)
        .take(limit)
        .cloned()
        .collect()
}
