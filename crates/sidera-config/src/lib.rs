use serde::Deserialize;
use sidera::aspects::{AspectKind, AspectSettings};
use sidera::parans::ParanSettings;
use sidera::transits::WeatherSettings;
use sidera::{Catalog, EngineSettings, Observer};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative locations tried when no explicit path is given
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/sidera.toml", "../../configs/sidera.toml"];

#[derive(Debug, Clone, Default)]
pub struct SideraConfig {
    pub settings: EngineSettings,
    /// Default observer for paran queries, when both coordinates are set
    pub observer: Option<Observer>,
    pub utc_offset_minutes: i32,
    pub fixed_stars_path: Option<PathBuf>,
    pub galactic_points_path: Option<PathBuf>,
}

impl SideraConfig {
    /// Catalog named by the config, bundled data for any path left out
    pub fn catalog(&self) -> anyhow::Result<Catalog> {
        Catalog::from_files(self.fixed_stars_path.as_deref(), self.galactic_points_path.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load catalog: {e}"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ObserverToml {
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    utc_offset_minutes: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CatalogToml {
    #[serde(default)]
    fixed_stars: Option<PathBuf>,
    #[serde(default)]
    galactic_points: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct ParansToml {
    #[serde(default = "default_window_minutes")]
    window_minutes: u32,
    #[serde(default = "default_star_slots")]
    star_slots: usize,
}

impl Default for ParansToml {
    fn default() -> Self {
        Self {
            window_minutes: default_window_minutes(),
            star_slots: default_star_slots(),
        }
    }
}

fn default_window_minutes() -> u32 {
    ParanSettings::default().window_minutes
}

fn default_star_slots() -> usize {
    ParanSettings::default().star_slots
}

#[derive(Debug, Clone, Deserialize)]
struct AspectsToml {
    #[serde(default)]
    include_minor: bool,
    #[serde(default = "default_significant_orb")]
    significant_orb: f64,
    #[serde(default = "default_significant_limit")]
    significant_limit: usize,
    #[serde(default = "default_calendar_orb")]
    calendar_orb: f64,
    /// Orb overrides keyed by aspect id, e.g. `square = 6.0`
    #[serde(default)]
    orbs: HashMap<String, f64>,
}

impl Default for AspectsToml {
    fn default() -> Self {
        Self {
            include_minor: false,
            significant_orb: default_significant_orb(),
            significant_limit: default_significant_limit(),
            calendar_orb: default_calendar_orb(),
            orbs: HashMap::new(),
        }
    }
}

fn default_significant_orb() -> f64 {
    WeatherSettings::default().significant_orb
}

fn default_significant_limit() -> usize {
    WeatherSettings::default().significant_limit
}

fn default_calendar_orb() -> f64 {
    WeatherSettings::default().calendar_orb
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    observer: ObserverToml,
    #[serde(default)]
    catalog: CatalogToml,
    #[serde(default)]
    parans: ParansToml,
    #[serde(default)]
    aspects: AspectsToml,
}

/// Try the common relative paths for `configs/sidera.toml`.
pub fn read_config_text() -> anyhow::Result<String> {
    for p in &DEFAULT_CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            log::debug!("Using config {}", p);
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load sidera.toml from {:?}", DEFAULT_CONFIG_PATHS);
}

pub fn parse_config(text: &str) -> anyhow::Result<SideraConfig> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse sidera.toml: {e}"))?;
    let RootConfigToml {
        observer,
        catalog,
        parans,
        aspects,
    } = root;

    if parans.star_slots == 0 {
        anyhow::bail!("parans.star_slots must be at least 1");
    }
    for (name, orb) in [
        ("significant_orb", aspects.significant_orb),
        ("calendar_orb", aspects.calendar_orb),
    ] {
        if !(orb.is_finite() && orb > 0.0) {
            anyhow::bail!("aspects.{name} must be a positive number, got {orb}");
        }
    }

    let mut orb_overrides = HashMap::new();
    for (id, orb) in &aspects.orbs {
        let kind: AspectKind = id
            .parse()
            .map_err(|e: String| anyhow::anyhow!("aspects.orbs: {e}"))?;
        if !(orb.is_finite() && *orb > 0.0) {
            anyhow::bail!("aspects.orbs.{id} must be a positive number, got {orb}");
        }
        orb_overrides.insert(kind, *orb);
    }

    let observer_location = Observer::from_parts(observer.latitude, observer.longitude);
    if observer_location.is_none() && (observer.latitude.is_some() || observer.longitude.is_some()) {
        log::warn!("[observer] needs both latitude and longitude; ignoring the partial location");
    }

    Ok(SideraConfig {
        settings: EngineSettings {
            parans: ParanSettings {
                window_minutes: parans.window_minutes,
                star_slots: parans.star_slots,
            },
            aspects: AspectSettings {
                include_minor: aspects.include_minor,
                orb_overrides,
            },
            weather: WeatherSettings {
                significant_orb: aspects.significant_orb,
                significant_limit: aspects.significant_limit,
                calendar_orb: aspects.calendar_orb,
            },
        },
        observer: observer_location,
        utc_offset_minutes: observer.utc_offset_minutes,
        fixed_stars_path: catalog.fixed_stars,
        galactic_points_path: catalog.galactic_points,
    })
}

/// Load from `path`, or from the default locations when `None`
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SideraConfig> {
    let text = match path {
        Some(p) => fs::read_to_string(p)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {e}", p.display()))?,
        None => read_config_text()?,
    };
    parse_config(&text)
}

/// Like `load_config(None)` but falls back to defaults when no file is found
pub fn load_config_or_default() -> anyhow::Result<SideraConfig> {
    match read_config_text() {
        Ok(text) => parse_config(&text),
        Err(e) => {
            log::info!("{e}; using built-in defaults");
            Ok(SideraConfig::default())
        }
    }
}
