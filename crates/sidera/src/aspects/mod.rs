//! Aspects between pairs of bodies.

pub mod calculator;
pub mod priority;
pub mod types;

pub use calculator::{
    is_aspect_applying, natal_importance, significant_aspects, transit_importance, AspectCalculator,
    AspectMatch,
};
pub use priority::{aspect_priority, group_by_nature, priority_tier, top_aspects, PriorityTier};
pub use types::{
    Aspect, AspectKind, AspectNature, AspectSettings, AspectTemplate, TransitNatalAspect,
    DAILY_ASPECTS, MINOR_ASPECTS, TRANSIT_ASPECTS,
};
