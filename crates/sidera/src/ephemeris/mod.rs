pub mod horizon;
pub mod mean_elements;
pub mod memo;
pub mod provider;
pub mod time;
pub mod types;

#[cfg(feature = "swisseph")]
pub mod adapter;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use mean_elements::MeanElementsEphemeris;
pub use memo::MemoizedEphemeris;
pub use provider::{EphemerisError, EphemerisProvider, STAR_SLOT_CAPACITY};
pub use types::{AngleTarget, AngleType, Equatorial, Observer};
