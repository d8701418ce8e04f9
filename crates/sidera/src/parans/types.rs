use crate::bodies::Body;
use crate::catalog::CatalogPoint;
use crate::ephemeris::{AngleType, Observer};
use crate::ephemeris::provider::STAR_SLOT_CAPACITY;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Brady's method accepts any co-occurrence on the same day
pub const DEFAULT_PARAN_WINDOW_MINUTES: u32 = 1440;

/// One horizon or meridian crossing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleEvent {
    pub entity_id: String,
    pub angle: AngleType,
    pub at: DateTime<Utc>,
}

/// A star and a planet on an angle within the paran window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paran {
    pub star: CatalogPoint,
    pub star_angle: AngleType,
    pub star_time: DateTime<Utc>,
    pub planet: Body,
    pub planet_angle: AngleType,
    pub planet_time: DateTime<Utc>,
    /// Time between the two events, rounded to the minute
    pub orb_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParanGroup {
    pub star: CatalogPoint,
    pub parans: Vec<Paran>,
}

/// Date and place of a paran query.
///
/// Coordinates are optional because chart data may lack a birth place; a
/// query without both yields no parans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParanQuery {
    pub date: NaiveDate,
    /// Offset of local civil time from UTC
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl ParanQuery {
    pub fn new(date: NaiveDate, utc_offset_minutes: i32, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            date,
            utc_offset_minutes,
            latitude,
            longitude,
        }
    }

    pub fn observer(&self) -> Option<Observer> {
        Observer::from_parts(self.latitude, self.longitude)
    }

    /// Local midnight of the query date, as a UTC instant
    pub fn day_start(&self) -> DateTime<Utc> {
        self.date.and_time(chrono::NaiveTime::default()).and_utc() - Duration::minutes(i64::from(self.utc_offset_minutes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParanSettings {
    /// Largest star/planet event separation kept
    pub window_minutes: u32,
    /// Upper bound on stars registered at once; the provider may allow fewer
    pub star_slots: usize,
}

impl Default for ParanSettings {
    fn default() -> Self {
        Self {
            window_minutes: DEFAULT_PARAN_WINDOW_MINUTES,
            star_slots: STAR_SLOT_CAPACITY,
        }
    }
}

/// Display label for an angle
pub fn format_angle(angle: AngleType) -> &'static str {
    match angle {
        AngleType::Rising => "Rising",
        AngleType::Setting => "Setting",
        AngleType::Culminating => "Culminating",
        AngleType::AntiCulminating => "Anti-Culminating",
    }
}
