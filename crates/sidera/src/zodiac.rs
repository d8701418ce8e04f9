//! Tropical zodiac signs and degree formatting.

use crate::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignMeta {
    pub id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub element: Element,
}

pub const SIGNS: [SignMeta; 12] = [
    SignMeta { id: "aries", name: "Aries", symbol: "♈", element: Element::Fire },
    SignMeta { id: "taurus", name: "Taurus", symbol: "♉", element: Element::Earth },
    SignMeta { id: "gemini", name: "Gemini", symbol: "♊", element: Element::Air },
    SignMeta { id: "cancer", name: "Cancer", symbol: "♋", element: Element::Water },
    SignMeta { id: "leo", name: "Leo", symbol: "♌", element: Element::Fire },
    SignMeta { id: "virgo", name: "Virgo", symbol: "♍", element: Element::Earth },
    SignMeta { id: "libra", name: "Libra", symbol: "♎", element: Element::Air },
    SignMeta { id: "scorpio", name: "Scorpio", symbol: "♏", element: Element::Water },
    SignMeta { id: "sagittarius", name: "Sagittarius", symbol: "♐", element: Element::Fire },
    SignMeta { id: "capricorn", name: "Capricorn", symbol: "♑", element: Element::Earth },
    SignMeta { id: "aquarius", name: "Aquarius", symbol: "♒", element: Element::Air },
    SignMeta { id: "pisces", name: "Pisces", symbol: "♓", element: Element::Water },
];

lazy_static::lazy_static! {
    static ref SIGN_INDEX: HashMap<&'static str, usize> =
        SIGNS.iter().enumerate().map(|(i, sign)| (sign.id, i)).collect();
}

/// Index of a sign id (case-insensitive), 0 for Aries
pub fn sign_index(sign_id: &str) -> Option<usize> {
    SIGN_INDEX.get(sign_id.trim().to_lowercase().as_str()).copied()
}

/// Ecliptic longitude at which a sign starts
pub fn sign_start(sign_id: &str) -> Option<f64> {
    sign_index(sign_id).map(|i| i as f64 * 30.0)
}

/// A longitude broken down into sign, degree and minute
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZodiacPosition {
    pub sign: &'static SignMeta,
    pub degree: u32,
    pub minute: u32,
}

impl ZodiacPosition {
    /// e.g. `12°05'`
    pub fn formatted(&self) -> String {
        format!("{}°{:02}'", self.degree, self.minute)
    }
}

pub fn longitude_to_zodiac(longitude: f64) -> ZodiacPosition {
    let lon = normalize_degrees(longitude);
    // work in whole arc-minutes so 29°59.9' never formats as 29°60'
    let total_minutes = ((lon * 60.0).floor() as u32) % (360 * 60);
    let sign = total_minutes / (30 * 60);
    let within = total_minutes % (30 * 60);
    ZodiacPosition {
        sign: &SIGNS[sign as usize],
        degree: within / 60,
        minute: within % 60,
    }
}

/// Degree within sign formatted as `D°MM'`
pub fn format_degree(longitude: f64) -> String {
    longitude_to_zodiac(longitude).formatted()
}
