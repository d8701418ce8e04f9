use crate::catalog::CatalogPoint;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Orb at or below which a conjunction counts as exact
pub const EXACT_ORB: f64 = 0.5;
/// Orb at or below which a conjunction counts as close
pub const CLOSE_ORB: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Exactness {
    Exact,
    Close,
    Wide,
}

impl Exactness {
    pub fn from_orb(orb: f64) -> Self {
        if orb <= EXACT_ORB {
            Exactness::Exact
        } else if orb <= CLOSE_ORB {
            Exactness::Close
        } else {
            Exactness::Wide
        }
    }
}

/// A body's longitude to be matched against a catalog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subject<'a> {
    pub id: &'a str,
    pub longitude: f64,
    pub at: Option<DateTime<Utc>>,
}

/// A body within a catalog point's orb
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conjunction {
    pub point: CatalogPoint,
    pub body_id: String,
    pub body_longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<Utc>>,
    pub orb_degree: f64,
    pub exactness: Exactness,
    pub is_exact: bool,
    pub is_personal: bool,
}

/// Conjunctions split by exactness tier
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExactnessGroups {
    pub exact: Vec<Conjunction>,
    pub close: Vec<Conjunction>,
    pub wide: Vec<Conjunction>,
}
