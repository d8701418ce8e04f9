//! Daily sky summaries and the monthly aspect calendar.

use crate::aspects::{significant_aspects, Aspect, AspectCalculator, AspectNature};
use crate::bodies::Body;
use crate::ephemeris::EphemerisProvider;
use crate::sky::{position_of, sample_sky, SkyPosition};
use crate::transits::moon::MoonPhase;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Thresholds for the daily and monthly views
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherSettings {
    /// Aspects tighter than this are significant
    pub significant_orb: f64,
    /// At most this many significant aspects per day
    pub significant_limit: usize,
    /// A calendar day is marked when a significant aspect is tighter than this
    pub calendar_orb: f64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            significant_orb: 3.0,
            significant_limit: 5,
            calendar_orb: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CosmicWeather {
    pub date: DateTime<Utc>,
    /// Absent when the provider could not place the Sun or the Moon
    pub moon_phase: Option<MoonPhase>,
    pub positions: Vec<SkyPosition>,
    pub significant_aspects: Vec<Aspect>,
    pub retrograde_count: usize,
}

pub fn cosmic_weather<P: EphemerisProvider>(
    provider: &P,
    calculator: &AspectCalculator,
    settings: &WeatherSettings,
    at: DateTime<Utc>,
) -> CosmicWeather {
    let positions = sample_sky(provider, at);
    let aspects = calculator.daily_aspects(&positions);
    let moon_phase = match (position_of(&positions, Body::Sun), position_of(&positions, Body::Moon)) {
        (Some(sun), Some(moon)) => Some(MoonPhase::from_longitudes(sun.longitude, moon.longitude)),
        _ => None,
    };
    let retrograde_count = positions.iter().filter(|p| p.retrograde).count();

    CosmicWeather {
        date: at,
        moon_phase,
        significant_aspects: significant_aspects(&aspects, settings.significant_orb, settings.significant_limit),
        positions,
        retrograde_count,
    }
}

/// Overall character of a day's tight aspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayTone {
    Harmonious,
    Challenging,
    Mixed,
    /// Only conjunctions
    Neutral,
}

impl DayTone {
    pub fn from_aspects(aspects: &[Aspect]) -> Self {
        let harmonious = aspects.iter().any(|a| a.nature == AspectNature::Harmonious);
        let challenging = aspects.iter().any(|a| a.nature == AspectNature::Challenging);
        match (harmonious, challenging) {
            (true, true) => DayTone::Mixed,
            (true, false) => DayTone::Harmonious,
            (false, true) => DayTone::Challenging,
            (false, false) => DayTone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectDay {
    pub day: u32,
    pub tone: DayTone,
    pub aspect_count: usize,
}

/// Local noon of each day of a month, in UTC. Empty for an invalid month.
pub fn month_noons(year: i32, month: u32, utc_offset_minutes: i32) -> Vec<(u32, DateTime<Utc>)> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .filter_map(|d| {
            let noon = d.and_hms_opt(12, 0, 0)?;
            Some((d.day(), noon.and_utc() - Duration::minutes(i64::from(utc_offset_minutes))))
        })
        .collect()
}

/// Sky summary for every day of a month at local noon
pub fn month_weather<P: EphemerisProvider>(
    provider: &P,
    calculator: &AspectCalculator,
    settings: &WeatherSettings,
    year: i32,
    month: u32,
    utc_offset_minutes: i32,
) -> Vec<(u32, CosmicWeather)> {
    month_noons(year, month, utc_offset_minutes)
        .into_iter()
        .map(|(day, at)| (day, cosmic_weather(provider, calculator, settings, at)))
        .collect()
}

/// Days of a month whose significant aspects include a tight one
pub fn major_aspect_days<P: EphemerisProvider>(
    provider: &P,
    calculator: &AspectCalculator,
    settings: &WeatherSettings,
    year: i32,
    month: u32,
    utc_offset_minutes: i32,
) -> Vec<AspectDay> {
    month_weather(provider, calculator, settings, year, month, utc_offset_minutes)
        .into_iter()
        .filter_map(|(day, weather)| {
            let tight: Vec<Aspect> = weather
                .significant_aspects
                .into_iter()
                .filter(|a| a.orb < settings.calendar_orb)
                .collect();
            if tight.is_empty() {
                return None;
            }
            Some(AspectDay {
                day,
                tone: DayTone::from_aspects(&tight),
                aspect_count: tight.len(),
            })
        })
        .collect()
}
