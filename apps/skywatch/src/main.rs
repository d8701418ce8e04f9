mod commands;

use clap::Parser;
use sidera::cache::SampleCache;
use sidera::ephemeris::MemoizedEphemeris;
use sidera::AlignmentEngine;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Query planetary alignments, parans and aspects")]
struct Args {
    /// Config file; defaults to configs/sidera.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Swiss Ephemeris data directory
    #[cfg(feature = "swisseph")]
    #[arg(long, global = true)]
    ephe_path: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => sidera_config::load_config(Some(path))?,
        None => sidera_config::load_config_or_default()?,
    };
    let catalog = config.catalog()?;
    log::info!(
        "Catalog: {} fixed stars, {} galactic points",
        catalog.fixed_stars.len(),
        catalog.galactic_points.len()
    );

    let samples = SampleCache::new();
    let engine = AlignmentEngine::new(
        MemoizedEphemeris::new(open_provider(&args)?, &samples),
        catalog,
        config.settings.clone(),
    );
    commands::run(&engine, &config, args.command)
}

#[cfg(feature = "swisseph")]
fn open_provider(args: &Args) -> anyhow::Result<sidera::ephemeris::SwissEphemerisAdapter> {
    Ok(sidera::ephemeris::SwissEphemerisAdapter::new(args.ephe_path.clone())?)
}

#[cfg(not(feature = "swisseph"))]
fn open_provider(_args: &Args) -> anyhow::Result<sidera::MeanElementsEphemeris> {
    Ok(sidera::MeanElementsEphemeris::new())
}
