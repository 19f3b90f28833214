//! Native planet generator: builds a config from flags and/or a JSON file,
//! runs the pipeline and prints the summary as JSON.
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use astro_core::{random_seed_text, GenerationProfile, PlanetGenerator, TerrainConfig};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "astrogen", about = "Generate a procedural planet and report its statistics")]
struct Args {
    /// JSON config file; flags given on the command line override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed text.
    #[arg(short, long)]
    seed: Option<String>,

    /// Draw a fresh `CORE-XXXX` seed instead of using `--seed`.
    #[arg(long, conflicts_with = "seed")]
    random_seed: bool,

    #[arg(long)]
    radius: Option<f64>,

    /// Icosphere subdivision level.
    #[arg(short, long)]
    detail: Option<u32>,

    #[arg(long)]
    sea_level: Option<f64>,

    #[arg(long)]
    roughness: Option<f64>,

    #[arg(long)]
    noise_scale: Option<f64>,

    /// River density (trials scale with it).
    #[arg(long)]
    rivers: Option<u32>,

    /// Generation profile: `classic` or `polar`.
    #[arg(short, long, default_value = GenerationProfile::CLASSIC)]
    profile: String,

    /// Write the summary here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a TerrainConfig,
    #[serde(flatten)]
    summary: &'a astro_core::PlanetSummary,
    generation_time_ms: u64,
}

fn resolve_config(args: &Args) -> Result<TerrainConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            TerrainConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => TerrainConfig::default(),
    };

    if args.random_seed {
        config.seed = random_seed_text("CORE");
    } else if let Some(seed) = &args.seed {
        config.seed = seed.clone();
    }
    config.radius = args.radius.unwrap_or(config.radius);
    config.detail = args.detail.unwrap_or(config.detail);
    config.sea_level = args.sea_level.unwrap_or(config.sea_level);
    config.roughness = args.roughness.unwrap_or(config.roughness);
    config.noise_scale = args.noise_scale.unwrap_or(config.noise_scale);
    config.river_density = args.rivers.unwrap_or(config.river_density);

    config.validate().context("invalid terrain config")?;
    Ok(config)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;
    let profile = GenerationProfile::by_name(&args.profile)?;

    info!(
        seed = %config.seed,
        profile = %profile.name,
        detail = config.detail,
        "generating planet"
    );
    let started = Instant::now();
    let planet = PlanetGenerator::with_profile(profile).generate(&config);
    let elapsed = started.elapsed().as_millis() as u64;
    info!(
        vertices = planet.summary.vertex_count,
        rivers = planet.summary.river_count,
        land = format!("{:.0}%", planet.summary.land_fraction * 100.0),
        ms = elapsed,
        "planet ready"
    );

    let report = Report { config: &config, summary: &planet.summary, generation_time_ms: elapsed };
    let json = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
