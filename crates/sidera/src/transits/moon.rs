use crate::bodies::Body;
use crate::ephemeris::{EphemerisError, EphemerisProvider};
use crate::normalize_degrees;
use crate::zodiac::longitude_to_zodiac;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    /// In bin order, starting at 0°
    pub const ALL: [PhaseName; 8] = [
        PhaseName::NewMoon,
        PhaseName::WaxingCrescent,
        PhaseName::FirstQuarter,
        PhaseName::WaxingGibbous,
        PhaseName::FullMoon,
        PhaseName::WaningGibbous,
        PhaseName::LastQuarter,
        PhaseName::WaningCrescent,
    ];

    /// Bin for a phase angle. Each bin spans 45° centred on its nominal
    /// angle, so New Moon covers [337.5, 360) and [0, 22.5).
    pub fn from_angle(phase_angle: f64) -> Self {
        let shifted = normalize_degrees(phase_angle + 22.5);
        let bin = (shifted / 45.0).floor() as usize;
        Self::ALL[bin.min(7)]
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseName::NewMoon => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::FullMoon => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            PhaseName::NewMoon => "🌑",
            PhaseName::WaxingCrescent => "🌒",
            PhaseName::FirstQuarter => "🌓",
            PhaseName::WaxingGibbous => "🌔",
            PhaseName::FullMoon => "🌕",
            PhaseName::WaningGibbous => "🌖",
            PhaseName::LastQuarter => "🌗",
            PhaseName::WaningCrescent => "🌘",
        }
    }
}

/// Moon phase snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPhase {
    pub phase_angle: f64,
    /// Percent of the disc lit, 0 to 100
    pub illumination: u8,
    pub phase: PhaseName,
    pub name: &'static str,
    pub emoji: &'static str,
    pub moon_sign: &'static str,
    pub moon_sign_symbol: &'static str,
    pub moon_degree: String,
}

/// Elongation of the Moon from the Sun, [0, 360)
pub fn phase_angle(sun_longitude: f64, moon_longitude: f64) -> f64 {
    normalize_degrees(moon_longitude - sun_longitude)
}

pub fn illumination(phase_angle: f64) -> u8 {
    let lit = (1.0 - phase_angle.to_radians().cos()) / 2.0 * 100.0;
    lit.round().clamp(0.0, 100.0) as u8
}

impl MoonPhase {
    pub fn from_longitudes(sun_longitude: f64, moon_longitude: f64) -> Self {
        let angle = phase_angle(sun_longitude, moon_longitude);
        let phase = PhaseName::from_angle(angle);
        let zodiac = longitude_to_zodiac(moon_longitude);
        Self {
            phase_angle: angle,
            illumination: illumination(angle),
            phase,
            name: phase.label(),
            emoji: phase.emoji(),
            moon_sign: zodiac.sign.name,
            moon_sign_symbol: zodiac.sign.symbol,
            moon_degree: zodiac.formatted(),
        }
    }
}

pub fn moon_phase<P: EphemerisProvider>(provider: &P, at: DateTime<Utc>) -> Result<MoonPhase, EphemerisError> {
    let sun = provider.longitude_of(Body::Sun, at)?;
    let moon = provider.longitude_of(Body::Moon, at)?;
    Ok(MoonPhase::from_longitudes(sun, moon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illumination_extremes() {
        assert_eq!(illumination(0.0), 0);
        assert_eq!(illumination(180.0), 100);
        assert_eq!(illumination(90.0), 50);
        assert_eq!(illumination(270.0), 50);
    }

    #[test]
    fn test_phase_bins() {
        assert_eq!(PhaseName::from_angle(0.0), PhaseName::NewMoon);
        assert_eq!(PhaseName::from_angle(22.4), PhaseName::NewMoon);
        assert_eq!(PhaseName::from_angle(22.5), PhaseName::WaxingCrescent);
        assert_eq!(PhaseName::from_angle(90.0), PhaseName::FirstQuarter);
        assert_eq!(PhaseName::from_angle(180.0), PhaseName::FullMoon);
        assert_eq!(PhaseName::from_angle(270.0), PhaseName::LastQuarter);
        assert_eq!(PhaseName::from_angle(337.4), PhaseName::WaningCrescent);
        assert_eq!(PhaseName::from_angle(337.5), PhaseName::NewMoon);
        assert_eq!(PhaseName::from_angle(359.9), PhaseName::NewMoon);
    }

    #[test]
    fn test_phase_angle_wraps() {
        assert_eq!(phase_angle(350.0, 10.0), 20.0);
        assert_eq!(phase_angle(10.0, 350.0), 340.0);
    }

    #[test]
    fn test_from_longitudes() {
        let phase = MoonPhase::from_longitudes(0.0, 185.0);
        assert_eq!(phase.phase, PhaseName::FullMoon);
        assert_eq!(phase.name, "Full Moon");
        assert_eq!(phase.emoji, "🌕");
        assert_eq!(phase.moon_sign, "Libra");
        assert_eq!(phase.moon_degree, "5°00'");
        assert_eq!(phase.illumination, 100);
    }
}
