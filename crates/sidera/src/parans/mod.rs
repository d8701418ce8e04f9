//! Mundane parans: a star and a planet on the horizon or meridian on the
//! same day as seen from one place.

pub mod correlator;
pub mod locator;
pub mod slots;
pub mod types;

pub use correlator::{group_parans_by_star, ParanCorrelator};
pub use locator::{locate_angle_events, planet_event_index};
pub use slots::{SlotError, SlotIndex, StarSlots};
pub use types::{
    format_angle, AngleEvent, Paran, ParanGroup, ParanQuery, ParanSettings,
    DEFAULT_PARAN_WINDOW_MINUTES,
};
