use anyhow::Context;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use sidera::cache::ChartCache;
use sidera::conjunctions::group_by_exactness;
use sidera::parans::ParanQuery;
use sidera::{AlignmentEngine, EphemerisProvider, NatalPlacement};
use sidera_config::SideraConfig;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Positions of the moving bodies
    Positions {
        /// RFC 3339 instant, defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Moon phase, significant aspects and retrograde count
    Weather {
        #[arg(long)]
        at: Option<String>,
    },
    /// Star/planet parans for a date and place
    Parans {
        /// Local calendar date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Minutes east of UTC
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<i32>,
        /// Group the result by star
        #[arg(long)]
        grouped: bool,
    },
    /// Natal and transiting conjunctions with catalog points
    Conjunctions {
        /// JSON file with an array of natal placements
        #[arg(long)]
        natal: PathBuf,
        #[arg(long)]
        at: Option<String>,
    },
    /// Transiting bodies aspecting a natal chart
    Transits {
        #[arg(long)]
        natal: PathBuf,
        #[arg(long)]
        at: Option<String>,
        /// Keep only the first N aspects
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Days of a month with tight aspects
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<i32>,
    },
    /// Dump the loaded catalog
    Catalog {
        #[arg(long, value_enum, default_value_t = CatalogFilter::All)]
        filter: CatalogFilter,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogFilter {
    All,
    Stars,
    Galactic,
    Royal,
    Behenian,
}

pub fn run<P: EphemerisProvider>(
    engine: &AlignmentEngine<P>,
    config: &SideraConfig,
    command: Command,
) -> anyhow::Result<()> {
    let charts = ChartCache::new();

    match command {
        Command::Positions { at } => print_json(&engine.sky_positions(parse_instant(at.as_deref())?)),
        Command::Weather { at } => print_json(&engine.cosmic_weather(parse_instant(at.as_deref())?)),
        Command::Parans {
            date,
            lat,
            lon,
            offset,
            grouped,
        } => {
            let date = match date {
                Some(d) => NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date: {d}"))?,
                None => Utc::now().date_naive(),
            };
            let default_observer = config.observer;
            let query = ParanQuery::new(
                date,
                offset.unwrap_or(config.utc_offset_minutes),
                lat.or(default_observer.map(|o| o.lat)),
                lon.or(default_observer.map(|o| o.lon)),
            );
            if query.observer().is_none() {
                log::warn!("No observer location; pass --lat/--lon or set [observer] in the config");
            }
            if grouped {
                print_json(&engine.paran_groups(&query))
            } else {
                print_json(&engine.parans(&query))
            }
        }
        Command::Conjunctions { natal, at } => {
            let at = parse_instant(at.as_deref())?;
            let placements = load_chart(&charts, &natal)?;
            let natal_stars = engine.natal_star_conjunctions(&placements);
            let natal_galactic = engine.natal_galactic_conjunctions(&placements);
            let transit_stars = engine.transit_star_activations(at, &natal_stars);
            let transit_galactic = engine.transit_galactic_activations(at, &natal_galactic);
            let personal = engine.personal_transit_activations(at, &natal_stars);
            print_json(&json!({
                "natal": {
                    "fixedStars": group_by_exactness(&natal_stars),
                    "galacticPoints": natal_galactic,
                },
                "transits": {
                    "fixedStars": transit_stars,
                    "galacticPoints": transit_galactic,
                    "personal": personal,
                },
            }))
        }
        Command::Transits { natal, at, limit } => {
            let at = parse_instant(at.as_deref())?;
            let chart_id = chart_key(&natal);
            load_chart(&charts, &natal)?;
            let mut aspects = engine
                .transit_natal_aspects_for_chart(at, &charts, &chart_id)
                .unwrap_or_default();
            if let Some(limit) = limit {
                aspects.truncate(limit);
            }
            print_json(&aspects)
        }
        Command::Calendar { year, month, offset } => {
            let today = Utc::now();
            let year = year.unwrap_or(today.year());
            let month = month.unwrap_or(today.month());
            if !(1..=12).contains(&month) {
                anyhow::bail!("--month must be between 1 and 12, got {month}");
            }
            print_json(&engine.major_aspect_days(year, month, offset.unwrap_or(config.utc_offset_minutes)))
        }
        Command::Catalog { filter } => {
            let catalog = engine.catalog();
            match filter {
                CatalogFilter::All => print_json(&json!({
                    "fixedStars": catalog.fixed_stars,
                    "galacticPoints": catalog.galactic_points,
                })),
                CatalogFilter::Stars => print_json(&catalog.fixed_stars),
                CatalogFilter::Galactic => print_json(&catalog.galactic_points),
                CatalogFilter::Royal => print_json(&catalog.royal_stars().collect::<Vec<_>>()),
                CatalogFilter::Behenian => print_json(&catalog.behenian_stars().collect::<Vec<_>>()),
            }
        }
    }
}

fn parse_instant(at: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match at {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid RFC 3339 instant: {s}"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn chart_key(path: &Path) -> String {
    path.display().to_string()
}

/// Read a chart once per run; later lookups hit the cache
fn load_chart(charts: &ChartCache, path: &Path) -> anyhow::Result<Vec<NatalPlacement>> {
    charts.get_or_try_insert_with(chart_key(path), || {
        let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let placements: Vec<NatalPlacement> =
            serde_json::from_str(&text).with_context(|| format!("Invalid natal chart in {}", path.display()))?;
        log::debug!("Loaded {} natal placements from {}", placements.len(), path.display());
        Ok(placements)
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_instant_with_offset() {
        let at = parse_instant(Some("2024-04-23T23:49:00+02:00")).unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 4, 23, 21, 49, 0).unwrap());
        assert!(parse_instant(Some("yesterday")).is_err());
    }

    #[test]
    fn test_sample_chart_loads_once() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_chart.json");
        let charts = ChartCache::new();
        let first = load_chart(&charts, &path).unwrap();
        assert_eq!(first.len(), 7);
        assert_eq!(charts.len(), 1);
        let second = load_chart(&charts, &path).unwrap();
        assert_eq!(first, second);
        assert_eq!(charts.len(), 1);
    }

    #[test]
    fn test_missing_chart_is_an_error() {
        let charts = ChartCache::new();
        assert!(load_chart(&charts, Path::new("/nonexistent/chart.json")).is_err());
        assert!(charts.is_empty());
    }
}
