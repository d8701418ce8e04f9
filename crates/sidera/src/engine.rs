//! One-stop facade over the alignment queries.

use crate::aspects::{Aspect, AspectCalculator, AspectSettings, TransitNatalAspect};
use crate::cache::ChartCache;
use crate::catalog::Catalog;
use crate::conjunctions::{
    natal_conjunctions, personal_transit_activations, transit_activations, Conjunction,
};
use crate::ephemeris::EphemerisProvider;
use crate::natal::NatalPlacement;
use crate::parans::{group_parans_by_star, Paran, ParanCorrelator, ParanGroup, ParanQuery, ParanSettings};
use crate::sky::{position_of, sample_sky, SkyPosition};
use crate::transits::weather::{self, AspectDay, CosmicWeather, WeatherSettings};
use crate::transits::MoonPhase;
use crate::bodies::Body;
use chrono::{DateTime, Utc};

/// Tunables for every query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineSettings {
    pub parans: ParanSettings,
    pub aspects: AspectSettings,
    pub weather: WeatherSettings,
}

/// Runs alignment queries against one provider and one catalog.
///
/// Every call recomputes from scratch; wrap the provider in a
/// `MemoizedEphemeris` to share samples between calls.
pub struct AlignmentEngine<P> {
    provider: P,
    catalog: Catalog,
    settings: EngineSettings,
    daily: AspectCalculator,
    transit: AspectCalculator,
}

impl<P: EphemerisProvider> AlignmentEngine<P> {
    pub fn new(provider: P, catalog: Catalog, settings: EngineSettings) -> Self {
        let daily = AspectCalculator::daily(&settings.aspects);
        let transit = AspectCalculator::transit(&settings.aspects);
        Self {
            provider,
            catalog,
            settings,
            daily,
            transit,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn sky_positions(&self, at: DateTime<Utc>) -> Vec<SkyPosition> {
        sample_sky(&self.provider, at)
    }

    pub fn natal_star_conjunctions(&self, placements: &[NatalPlacement]) -> Vec<Conjunction> {
        natal_conjunctions(placements, &self.catalog.fixed_stars)
    }

    pub fn natal_galactic_conjunctions(&self, placements: &[NatalPlacement]) -> Vec<Conjunction> {
        natal_conjunctions(placements, &self.catalog.galactic_points)
    }

    /// Stars touched by the sky at `at`; `natal` marks personal reactivations
    pub fn transit_star_activations(&self, at: DateTime<Utc>, natal: &[Conjunction]) -> Vec<Conjunction> {
        transit_activations(&self.sky_positions(at), &self.catalog.fixed_stars, natal)
    }

    pub fn transit_galactic_activations(&self, at: DateTime<Utc>, natal: &[Conjunction]) -> Vec<Conjunction> {
        transit_activations(&self.sky_positions(at), &self.catalog.galactic_points, natal)
    }

    pub fn personal_transit_activations(&self, at: DateTime<Utc>, natal: &[Conjunction]) -> Vec<Conjunction> {
        personal_transit_activations(&self.sky_positions(at), natal)
    }

    pub fn parans(&self, query: &ParanQuery) -> Vec<Paran> {
        ParanCorrelator::new(&self.provider, self.settings.parans).compute_parans(&self.catalog.fixed_stars, query)
    }

    pub fn paran_groups(&self, query: &ParanQuery) -> Vec<ParanGroup> {
        group_parans_by_star(&self.parans(query))
    }

    pub fn daily_aspects(&self, at: DateTime<Utc>) -> Vec<Aspect> {
        self.daily.daily_aspects(&self.sky_positions(at))
    }

    pub fn transit_natal_aspects(&self, at: DateTime<Utc>, placements: &[NatalPlacement]) -> Vec<TransitNatalAspect> {
        self.transit.transit_natal_aspects(&self.sky_positions(at), placements)
    }

    /// Transit-to-natal aspects for a chart held in a caller-owned cache
    pub fn transit_natal_aspects_for_chart(
        &self,
        at: DateTime<Utc>,
        charts: &ChartCache,
        chart_id: &str,
    ) -> Option<Vec<TransitNatalAspect>> {
        let placements = charts.lookup(&chart_id.to_string())?;
        Some(self.transit_natal_aspects(at, &placements))
    }

    pub fn moon_phase(&self, at: DateTime<Utc>) -> Option<MoonPhase> {
        let sky = self.sky_positions(at);
        let sun = position_of(&sky, Body::Sun)?;
        let moon = position_of(&sky, Body::Moon)?;
        Some(MoonPhase::from_longitudes(sun.longitude, moon.longitude))
    }

    pub fn cosmic_weather(&self, at: DateTime<Utc>) -> CosmicWeather {
        weather::cosmic_weather(&self.provider, &self.daily, &self.settings.weather, at)
    }

    pub fn month_weather(&self, year: i32, month: u32, utc_offset_minutes: i32) -> Vec<(u32, CosmicWeather)> {
        weather::month_weather(&self.provider, &self.daily, &self.settings.weather, year, month, utc_offset_minutes)
    }

    pub fn major_aspect_days(&self, year: i32, month: u32, utc_offset_minutes: i32) -> Vec<AspectDay> {
        weather::major_aspect_days(&self.provider, &self.daily, &self.settings.weather, year, month, utc_offset_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::MeanElementsEphemeris;
    use chrono::TimeZone;

    fn engine() -> AlignmentEngine<MeanElementsEphemeris> {
        AlignmentEngine::new(
            MeanElementsEphemeris::new(),
            Catalog::builtin().unwrap(),
            EngineSettings::default(),
        )
    }

    #[test]
    fn test_natal_conjunction_with_regulus() {
        let placements = vec![NatalPlacement::new("sun", "virgo", 0.0, 0.0)];
        let found = engine().natal_star_conjunctions(&placements);
        let regulus = found.iter().find(|c| c.point.id == "regulus").unwrap();
        assert_eq!(regulus.orb_degree, 0.0);
        assert!(regulus.is_exact);
    }

    #[test]
    fn test_galactic_center_conjunction() {
        let placements = vec![NatalPlacement::new("mars", "sagittarius", 27.0, 0.0)];
        let found = engine().natal_galactic_conjunctions(&placements);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].point.id, "galactic-center");
    }

    #[test]
    fn test_chart_cache_lookup() {
        let engine = engine();
        let charts = ChartCache::new();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert!(engine.transit_natal_aspects_for_chart(at, &charts, "me").is_none());

        charts.insert("me".to_string(), vec![NatalPlacement::new("sun", "pisces", 11.0, 0.0)]);
        let aspects = engine.transit_natal_aspects_for_chart(at, &charts, "me").unwrap();
        // the transiting sun sits on its own natal degree
        assert!(aspects
            .iter()
            .any(|a| a.transit_body == Body::Sun && a.natal_id == "sun" && a.orb < 1.0));
    }

    #[test]
    fn test_moon_phase_full_moon() {
        let at = Utc.with_ymd_and_hms(2024, 4, 23, 23, 49, 0).unwrap();
        let phase = engine().moon_phase(at).unwrap();
        assert!((phase.phase_angle - 180.0).abs() < 3.0, "phase = {}", phase.phase_angle);
        assert_eq!(phase.name, "Full Moon");
        assert_eq!(phase.illumination, 100);
    }
}
