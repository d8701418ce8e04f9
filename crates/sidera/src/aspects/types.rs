use crate::bodies::Body;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AspectKind {
    Conjunction,
    SemiSextile,
    SemiSquare,
    Sextile,
    Quintile,
    Square,
    Trine,
    SesquiSquare,
    Biquintile,
    Quincunx,
    Opposition,
}

impl AspectKind {
    pub const MAJOR: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    pub const MINOR: [AspectKind; 6] = [
        AspectKind::Quincunx,
        AspectKind::SemiSextile,
        AspectKind::SemiSquare,
        AspectKind::SesquiSquare,
        AspectKind::Quintile,
        AspectKind::Biquintile,
    ];

    pub fn id(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::SemiSextile => "semi-sextile",
            AspectKind::SemiSquare => "semi-square",
            AspectKind::Sextile => "sextile",
            AspectKind::Quintile => "quintile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::SesquiSquare => "sesqui-square",
            AspectKind::Biquintile => "biquintile",
            AspectKind::Quincunx => "quincunx",
            AspectKind::Opposition => "opposition",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::SemiSextile => "Semi-Sextile",
            AspectKind::SemiSquare => "Semi-Square",
            AspectKind::Sextile => "Sextile",
            AspectKind::Quintile => "Quintile",
            AspectKind::Square => "Square",
            AspectKind::Trine => "Trine",
            AspectKind::SesquiSquare => "Sesqui-Square",
            AspectKind::Biquintile => "Biquintile",
            AspectKind::Quincunx => "Quincunx",
            AspectKind::Opposition => "Opposition",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "☌",
            AspectKind::SemiSextile => "⚺",
            AspectKind::SemiSquare => "∠",
            AspectKind::Sextile => "⚹",
            AspectKind::Quintile => "Q",
            AspectKind::Square => "□",
            AspectKind::Trine => "△",
            AspectKind::SesquiSquare => "⚼",
            AspectKind::Biquintile => "bQ",
            AspectKind::Quincunx => "⚻",
            AspectKind::Opposition => "☍",
        }
    }

    /// Exact angle in degrees
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::SemiSextile => 30.0,
            AspectKind::SemiSquare => 45.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Quintile => 72.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::SesquiSquare => 135.0,
            AspectKind::Biquintile => 144.0,
            AspectKind::Quincunx => 150.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn nature(self) -> AspectNature {
        match self {
            AspectKind::Conjunction => AspectNature::Neutral,
            AspectKind::Sextile
            | AspectKind::Trine
            | AspectKind::SemiSextile
            | AspectKind::Quintile
            | AspectKind::Biquintile => AspectNature::Harmonious,
            AspectKind::Square
            | AspectKind::Opposition
            | AspectKind::Quincunx
            | AspectKind::SemiSquare
            | AspectKind::SesquiSquare => AspectNature::Challenging,
        }
    }

    pub fn is_major(self) -> bool {
        Self::MAJOR.contains(&self)
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('_', "-");
        Self::MAJOR
            .iter()
            .chain(Self::MINOR.iter())
            .copied()
            .find(|k| k.id() == needle)
            .ok_or_else(|| format!("Unknown aspect: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectNature {
    Harmonious,
    Challenging,
    Neutral,
}

/// One entry of an ordered aspect table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectTemplate {
    pub kind: AspectKind,
    pub angle: f64,
    pub orb: f64,
    pub nature: AspectNature,
}

impl AspectTemplate {
    pub const fn new(kind: AspectKind, angle: f64, orb: f64, nature: AspectNature) -> Self {
        Self {
            kind,
            angle,
            orb,
            nature,
        }
    }
}

/// Major aspects between two transiting bodies
pub const DAILY_ASPECTS: [AspectTemplate; 5] = [
    AspectTemplate::new(AspectKind::Conjunction, 0.0, 8.0, AspectNature::Neutral),
    AspectTemplate::new(AspectKind::Sextile, 60.0, 6.0, AspectNature::Harmonious),
    AspectTemplate::new(AspectKind::Square, 90.0, 8.0, AspectNature::Challenging),
    AspectTemplate::new(AspectKind::Trine, 120.0, 8.0, AspectNature::Harmonious),
    AspectTemplate::new(AspectKind::Opposition, 180.0, 8.0, AspectNature::Challenging),
];

/// Transit-to-natal aspects use tighter orbs for the softer aspects
pub const TRANSIT_ASPECTS: [AspectTemplate; 5] = [
    AspectTemplate::new(AspectKind::Conjunction, 0.0, 8.0, AspectNature::Neutral),
    AspectTemplate::new(AspectKind::Sextile, 60.0, 4.0, AspectNature::Harmonious),
    AspectTemplate::new(AspectKind::Square, 90.0, 6.0, AspectNature::Challenging),
    AspectTemplate::new(AspectKind::Trine, 120.0, 6.0, AspectNature::Harmonious),
    AspectTemplate::new(AspectKind::Opposition, 180.0, 8.0, AspectNature::Challenging),
];

/// Minor aspects, only used between transiting bodies
pub const MINOR_ASPECTS: [AspectTemplate; 6] = [
    AspectTemplate::new(AspectKind::SemiSextile, 30.0, 2.0, AspectNature::Harmonious),
    AspectTemplate::new(AspectKind::SemiSquare, 45.0, 2.0, AspectNature::Challenging),
    AspectTemplate::new(AspectKind::Quintile, 72.0, 2.0, AspectNature::Harmonious),
    AspectTemplate::new(AspectKind::SesquiSquare, 135.0, 2.0, AspectNature::Challenging),
    AspectTemplate::new(AspectKind::Biquintile, 144.0, 2.0, AspectNature::Harmonious),
    AspectTemplate::new(AspectKind::Quincunx, 150.0, 3.0, AspectNature::Challenging),
];

/// Settings for aspect calculations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AspectSettings {
    /// Add the minor aspects to the daily table
    pub include_minor: bool,
    /// Orb per aspect kind, replacing the table default
    pub orb_overrides: HashMap<AspectKind, f64>,
}

/// Aspect between two bodies
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspect {
    pub body_a: String,
    pub body_b: String,
    pub kind: AspectKind,
    /// Shortest separation of the two longitudes, [0, 180]
    pub measured_angle: f64,
    pub orb: f64,
    pub nature: AspectNature,
    pub is_applying: bool,
}

impl Aspect {
    pub fn involves(&self, id: &str) -> bool {
        self.body_a == id || self.body_b == id
    }
}

/// Aspect from a transiting body to a natal placement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitNatalAspect {
    pub transit_body: Body,
    pub transit_longitude: f64,
    pub transit_sign: &'static str,
    pub natal_id: String,
    pub natal_longitude: f64,
    pub natal_sign: &'static str,
    pub kind: AspectKind,
    pub aspect_angle: f64,
    pub orb: f64,
    pub nature: AspectNature,
    pub is_applying: bool,
    /// Combined transit and natal weight; higher ranks first
    pub importance: u32,
}
