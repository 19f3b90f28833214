//! Debug visualiser: renders a planet's biome colours as an equirectangular
//! PNG (`AstroGen_<seed>.png`), plus an optional greyscale height map.

use std::path::PathBuf;

use anyhow::{Context, Result};
use astro_core::climate::Biome;
use astro_core::{random_seed_text, GenerationProfile, PlanetGenerator, PlanetResult, TerrainConfig};
use clap::Parser;
use image::{Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "visualize", about = "Render a planet to an equirectangular PNG")]
struct Args {
    #[arg(short, long, default_value = "QUANTUM-7")]
    seed: String,

    #[arg(long)]
    random_seed: bool,

    #[arg(short, long, default_value_t = 64)]
    detail: u32,

    #[arg(long, default_value_t = 0.45)]
    sea_level: f64,

    #[arg(long, default_value_t = 40)]
    rivers: u32,

    #[arg(short, long, default_value = GenerationProfile::CLASSIC)]
    profile: String,

    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Also write `AstroGen_<seed>_height.png`.
    #[arg(long)]
    height_map: bool,

    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

// ── Projection ────────────────────────────────────────────────────────────────

/// Vertex index → pixel, or `None` for an empty cell.
type Raster = Vec<Option<usize>>;

fn project(planet: &PlanetResult, w: u32, h: u32) -> Raster {
    let mut cells = vec![None; (w * h) as usize];
    for (i, p) in planet.base_positions.iter().enumerate() {
        let (lat, lon) = p.to_latlon();
        let x = (((lon + 180.0) / 360.0) * w as f64).floor().clamp(0.0, (w - 1) as f64) as u32;
        let y = (((90.0 - lat) / 180.0) * h as f64).floor().clamp(0.0, (h - 1) as f64) as u32;
        cells[(y * w + x) as usize] = Some(i);
    }
    fill_rows(&mut cells, w as usize);
    cells
}

/// Fill gaps in each row from the nearest set cell to the left, wrapping.
/// Rows with no vertex at all (near the poles) copy the nearest filled row.
fn fill_rows(cells: &mut [Option<usize>], w: usize) {
    let mut filled = Vec::new();
    for (r, row) in cells.chunks_mut(w).enumerate() {
        let Some(start) = row.iter().position(Option::is_some) else { continue };
        let mut last = row[start];
        for k in 1..w {
            let c = (start + k) % w;
            match row[c] {
                Some(_) => last = row[c],
                None => row[c] = last,
            }
        }
        filled.push(r);
    }
    if filled.is_empty() {
        return;
    }

    let rows = cells.len() / w;
    for r in 0..rows {
        let Some(&src) = filled.iter().min_by_key(|&&f| f.abs_diff(r)) else { continue };
        if src != r {
            cells.copy_within(src * w..(src + 1) * w, r * w);
        }
    }
}

/// Seed text made safe for use inside a file name.
fn file_stem(seed: &str) -> String {
    let stem: String = seed
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':' | '\0') { '_' } else { c })
        .collect();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        format!("_{stem}")
    } else {
        stem
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn biome_pixel(biome: Biome) -> Rgb<u8> {
    Rgb(biome.color().to_u8())
}

fn gray(v: f64) -> Rgb<u8> {
    let c = (v.clamp(0.0, 1.0) * 255.0) as u8;
    Rgb([c, c, c])
}

fn render(raster: &Raster, w: u32, h: u32, pixel: impl Fn(usize) -> Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| match raster[(y * w + x) as usize] {
        Some(v) => pixel(v),
        None => Rgb([0, 0, 0]),
    })
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let seed = if args.random_seed { random_seed_text("CORE") } else { args.seed.clone() };
    let config = TerrainConfig {
        seed,
        detail: args.detail,
        sea_level: args.sea_level,
        river_density: args.rivers,
        ..TerrainConfig::default()
    };
    config.validate()?;
    let profile = GenerationProfile::by_name(&args.profile)?;

    info!(seed = %config.seed, detail = config.detail, "generating planet");
    let planet = PlanetGenerator::with_profile(profile).generate(&config);

    let (w, h) = (args.width.max(2), (args.width / 2).max(1));
    let raster = project(&planet, w, h);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("cannot create {}", args.out_dir.display()))?;

    let stem = file_stem(&config.seed);
    let path = args.out_dir.join(format!("AstroGen_{stem}.png"));
    render(&raster, w, h, |v| biome_pixel(planet.mesh.biomes[v]))
        .save(&path)
        .with_context(|| format!("failed to save {}", path.display()))?;
    info!("wrote {}", path.display());

    if args.height_map {
        let path = args.out_dir.join(format!("AstroGen_{stem}_height.png"));
        render(&raster, w, h, |v| gray(planet.field.heights[v]))
            .save(&path)
            .with_context(|| format!("failed to save {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    info!(
        rivers = planet.summary.river_count,
        land = format!("{:.0}%", planet.summary.land_fraction * 100.0),
        designation = %planet.summary.designation,
        "done"
    );
    Ok(())
}
