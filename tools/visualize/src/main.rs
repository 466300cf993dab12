//! Diagnostic renderer: generates a biome map and writes PNG images.
//! Not part of the core pipeline; the core only hands over a grid and a legend.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use biome_core::legend::{biome_color, hex};
use biome_core::{BiomeGrid, BiomeMapGenerator, GeneratorConfig};

#[derive(Parser, Debug)]
#[command(name = "visualize", about = "Render a generated biome map to PNG")]
struct Args {
    /// JSON generator configuration. Defaults to the extended pipeline.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid side length (power of two). Ignored when --config is given.
    #[arg(long, default_value_t = biome_core::config::DEFAULT_SIZE)]
    size: usize,

    /// Use the land/ocean-only schedule. Ignored when --config is given.
    #[arg(long)]
    classic: bool,

    /// Fixed seed; overrides the configuration's seed.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write one image per stage instead of only the final map.
    #[arg(long)]
    every_stage: bool,

    /// Largest image side in pixels; bigger grids are sampled down.
    #[arg(long, default_value_t = 2048)]
    max_pixels: usize,

    /// Also write the legend as `legend.json` next to the images.
    #[arg(long)]
    legend_json: bool,

    /// Output directory.
    #[arg(short, long, default_value = "data/maps")]
    output: PathBuf,
}

// ── Rendering ────────────────────────────────────────────────────────────────

/// Nearest-cell sample of `grid` at no more than `max_pixels` per side.
fn render(grid: &BiomeGrid, max_pixels: usize) -> image::RgbImage {
    let size = grid.size();
    let stride = size.div_ceil(max_pixels.max(1)).max(1);
    let side = size.div_ceil(stride);
    let mut img = image::RgbImage::new(side as u32, side as u32);
    for y in 0..side {
        for x in 0..side {
            let [r, g, b] = biome_color(grid.get(y * stride, x * stride));
            img.put_pixel(x as u32, y as u32, image::Rgb([r, g, b]));
        }
    }
    img
}

/// Lowercase, underscore-separated file stem for a stage label.
fn file_stem(index: usize, label: &str) -> String {
    let slug: String = label
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            ' ' => Some('_'),
            _ => None,
        })
        .collect();
    format!("{index:02}_{slug}")
}

fn save(img: &image::RgbImage, out_dir: &Path, stem: &str) -> Result<()> {
    let path = out_dir.join(format!("{stem}.png"));
    img.save(&path)
        .with_context(|| format!("failed to save {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn load_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            GeneratorConfig::from_json_str(&json)
                .with_context(|| format!("invalid configuration in {}", path.display()))?
        }
        None if args.classic => GeneratorConfig::classic(args.size),
        None => GeneratorConfig::extended(args.size),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = load_config(&args)?;
    let generator = BiomeMapGenerator::new(config)?;

    fs::create_dir_all(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;

    let mut stage_index = 0usize;
    let mut failure = None;
    let map = if args.every_stage {
        generator.generate_with(&mut |label: &str, grid: &BiomeGrid| {
            if failure.is_some() {
                return;
            }
            let stem = file_stem(stage_index, label);
            stage_index += 1;
            if let Err(e) = save(&render(grid, args.max_pixels), &args.output, &stem) {
                failure = Some(e);
            }
        })
    } else {
        generator.generate()
    };
    if let Some(e) = failure {
        return Err(e);
    }

    if !args.every_stage {
        save(&render(&map.grid, args.max_pixels), &args.output, "final")?;
    }

    info!("seed {} ({} ms)", map.seed, map.generation_time_ms);
    let legend = map.legend();
    if args.legend_json {
        let path = args.output.join("legend.json");
        fs::write(&path, serde_json::to_string_pretty(&legend)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("{:<12} {:>8} {:>14}", "Biome", "Color", "Cells");
    println!("{}", "-".repeat(36));
    for entry in legend.entries() {
        println!("{:<12} {:>8} {:>14}", entry.biome.name(), hex(entry.color), entry.cells);
    }

    Ok(())
}
