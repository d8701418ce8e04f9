//! Transit-level quantities: retrograde status, moon phase, daily weather.

pub mod moon;
pub mod retrograde;
pub mod weather;

pub use moon::{moon_phase, MoonPhase, PhaseName};
pub use retrograde::{is_retrograde, retrograde_count};
pub use weather::{
    cosmic_weather, major_aspect_days, month_weather, AspectDay, CosmicWeather, DayTone,
    WeatherSettings,
};
