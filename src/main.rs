use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use terrain_generator::config::GeneratorConfig;
use terrain_generator::rivers::SourcePolicy;
use terrain_generator::{export, logging, Generator};

#[derive(Parser, Debug)]
#[command(name = "terrain_generator")]
#[command(about = "Generate seamless wrapping tile maps with regions and rivers")]
struct Args {
    /// JSON config file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width of the map in tiles
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map in tiles
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of rivers to carve
    #[arg(short, long)]
    rivers: Option<usize>,

    /// Start rivers at the highest tiles instead of random ones
    #[arg(long)]
    highest_sources: bool,

    /// Skip the heat/moisture/biome pass
    #[arg(long)]
    no_climate: bool,

    /// Write the finished map as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn build_config(args: &Args) -> Result<GeneratorConfig, terrain_generator::GenError> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig {
            seed: rand::random(),
            ..Default::default()
        },
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(count) = args.rivers {
        config.rivers.count = count;
    }
    if args.highest_sources {
        config.rivers.source = SourcePolicy::Highest;
    }
    if args.no_climate {
        config.climate = None;
    }
    Ok(config)
}

fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Generating map with seed: {}", config.seed);
    log::info!("Map size: {}x{}", config.width, config.height);

    let world = match Generator::run(config) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Generation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for (band, count) in world.grid.band_counts() {
        log::info!(
            "  {:<14} {:>7} tiles ({:.1}%)",
            band.display_name(),
            count,
            100.0 * count as f64 / world.grid.len() as f64
        );
    }
    if let Some(land) = world.regions.largest_land() {
        log::info!("Largest land mass: {} tiles", land.len());
    }
    if let Some(water) = world.regions.largest_water() {
        log::info!("Largest water body: {} tiles", water.len());
    }

    if let Some(path) = &args.output {
        if let Err(e) = export::write_json(&world, path) {
            log::error!("Failed to write {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        log::info!("Wrote {}", path.display());
    }

    ExitCode::SUCCESS
}
