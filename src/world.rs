//! Generation pipeline and the finished world
//!
//! The passes run strictly in order, each over the whole grid:
//!
//! 1. `sample`        - noise -> `HeightField`
//! 2. `classify`      - consumes the height field, builds the `TileGrid`
//!                      (plus heat/moisture/biomes when configured)
//! 3. `segment`       - flood fill into land/water groups
//! 4. `carve_rivers`  - rivers cut through land after segmentation
//! 5. `annotate`      - bitmasks, last, because rivers change bands
//!
//! `Generator` tracks which pass ran last and refuses to run one out of order.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::bitmask;
use crate::classify;
use crate::climate;
use crate::config::GeneratorConfig;
use crate::error::{ConfigError, GenError, Result};
use crate::grid::TileGrid;
use crate::heightmap::{self, HeightField};
use crate::noise_field::NoiseField;
use crate::regions::{self, Regions, TileGroup};
use crate::rivers::{self, River, RiverReport};
use crate::seeds::WorldSeeds;

/// Pipeline position: the last pass that completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Empty,
    Sampled,
    Classified,
    Segmented,
    RiversCarved,
    Annotated,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Empty => write!(f, "empty"),
            Stage::Sampled => write!(f, "sampling"),
            Stage::Classified => write!(f, "classification"),
            Stage::Segmented => write!(f, "segmentation"),
            Stage::RiversCarved => write!(f, "river carving"),
            Stage::Annotated => write!(f, "bitmask annotation"),
        }
    }
}

/// All generated map data bundled together
pub struct World {
    pub config: GeneratorConfig,
    /// Seeds used for generation (allows recreation)
    pub seeds: WorldSeeds,
    pub grid: TileGrid,
    /// Land/water groups as of segmentation, before rivers were carved
    pub regions: Regions,
    pub rivers: Vec<River>,
    pub river_report: RiverReport,
}

impl World {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn land_groups(&self) -> &[TileGroup] {
        &self.regions.land
    }

    pub fn water_groups(&self) -> &[TileGroup] {
        &self.regions.water
    }
}

/// Staged pipeline state.
pub struct Generator {
    config: GeneratorConfig,
    seeds: WorldSeeds,
    stage: Stage,
    height_field: Option<HeightField>,
    grid: Option<TileGrid>,
    regions: Regions,
    rivers: Vec<River>,
    river_report: RiverReport,
}

impl Generator {
    /// Validate `config` and set up an empty pipeline.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let seeds = WorldSeeds::from_master(config.seed);
        Ok(Self::with_seeds(config, seeds))
    }

    /// Like `new`, with explicit per-system seeds. The config is assumed
    /// valid.
    fn with_seeds(config: GeneratorConfig, seeds: WorldSeeds) -> Self {
        Self {
            config,
            seeds,
            stage: Stage::Empty,
            height_field: None,
            grid: None,
            regions: Regions::default(),
            rivers: Vec::new(),
            river_report: RiverReport::default(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn seeds(&self) -> &WorldSeeds {
        &self.seeds
    }

    pub fn grid(&self) -> Option<&TileGrid> {
        self.grid.as_ref()
    }

    fn require(&self, requested: Stage, required: Stage) -> Result<()> {
        if self.stage != required {
            return Err(GenError::StageOrder {
                requested,
                required,
                current: self.stage,
            });
        }
        Ok(())
    }

    fn grid_mut(&mut self, requested: Stage) -> Result<&mut TileGrid> {
        let current = self.stage;
        self.grid.as_mut().ok_or(GenError::StageOrder {
            requested,
            required: Stage::Classified,
            current,
        })
    }

    /// Pass 1: sample the height noise across the grid.
    pub fn sample(&mut self) -> Result<()> {
        self.require(Stage::Sampled, Stage::Empty)?;

        let noise = NoiseField::new(&self.config.noise, WorldSeeds::noise_seed(self.seeds.heightmap));
        let field = heightmap::sample_height_field(self.config.width, self.config.height, &noise);
        log::info!(
            "Sampled {}x{} height field, range {:.3} to {:.3}",
            field.width(),
            field.height(),
            field.min,
            field.max
        );

        self.height_field = Some(field);
        self.stage = Stage::Sampled;
        Ok(())
    }

    /// Pass 2: normalize and classify. The height field is dropped afterwards.
    pub fn classify(&mut self) -> Result<()> {
        self.require(Stage::Classified, Stage::Sampled)?;
        let Some(field) = self.height_field.take() else {
            return Err(GenError::StageOrder {
                requested: Stage::Classified,
                required: Stage::Sampled,
                current: self.stage,
            });
        };

        if field.is_flat() && self.config.reject_flat_field {
            return Err(ConfigError::FlatHeightField { value: field.min }.into());
        }

        let mut grid = classify::classify_heights(&field, &self.config.bands);
        if let Some(climate_config) = &self.config.climate {
            climate::apply_climate(
                &mut grid,
                climate_config,
                WorldSeeds::noise_seed(self.seeds.heat),
                WorldSeeds::noise_seed(self.seeds.moisture),
            );
        }

        let land = grid.iter().filter(|t| t.collidable).count();
        log::info!(
            "Classified {} tiles ({:.1}% land)",
            grid.len(),
            100.0 * land as f64 / grid.len() as f64
        );

        self.grid = Some(grid);
        self.stage = Stage::Classified;
        Ok(())
    }

    /// Pass 3: flood fill into land and water groups.
    pub fn segment(&mut self) -> Result<()> {
        self.require(Stage::Segmented, Stage::Classified)?;

        let regions = regions::flood_fill(self.grid_mut(Stage::Segmented)?);
        log::info!(
            "Found {} land groups and {} water groups",
            regions.land.len(),
            regions.water.len()
        );

        self.regions = regions;
        self.stage = Stage::Segmented;
        Ok(())
    }

    /// Pass 4: trace and carve rivers.
    pub fn carve_rivers(&mut self) -> Result<()> {
        self.require(Stage::RiversCarved, Stage::Segmented)?;

        let mut rng = ChaCha8Rng::seed_from_u64(self.seeds.rivers);
        let params = self.config.rivers.clone();
        let (rivers, report) =
            rivers::carve_rivers(self.grid_mut(Stage::RiversCarved)?, &params, &mut rng);
        log::info!(
            "Carved {} rivers ({} rejected, {} attempts)",
            report.accepted,
            report.rejected,
            report.attempts
        );

        self.rivers = rivers;
        self.river_report = report;
        self.stage = Stage::RiversCarved;
        Ok(())
    }

    /// Pass 5: adjacency bitmasks on the final bands.
    pub fn annotate(&mut self) -> Result<()> {
        self.require(Stage::Annotated, Stage::RiversCarved)?;
        bitmask::update_bitmasks(self.grid_mut(Stage::Annotated)?);
        self.stage = Stage::Annotated;
        Ok(())
    }

    /// Hand over the finished world.
    pub fn finish(self) -> Result<World> {
        self.require(Stage::Annotated, Stage::Annotated)?;
        let Some(grid) = self.grid else {
            return Err(GenError::StageOrder {
                requested: Stage::Annotated,
                required: Stage::Classified,
                current: self.stage,
            });
        };
        Ok(World {
            config: self.config,
            seeds: self.seeds,
            grid,
            regions: self.regions,
            rivers: self.rivers,
            river_report: self.river_report,
        })
    }

    /// Run every pass in order.
    pub fn run(config: GeneratorConfig) -> Result<World> {
        let mut generator = Generator::new(config)?;
        generator.run_all()?;
        generator.finish()
    }

    /// Run every pass with explicit per-system seeds.
    pub fn run_with_seeds(config: GeneratorConfig, seeds: WorldSeeds) -> Result<World> {
        config.validate()?;
        let mut generator = Generator::with_seeds(config, seeds);
        generator.run_all()?;
        generator.finish()
    }

    fn run_all(&mut self) -> Result<()> {
        self.sample()?;
        self.classify()?;
        self.segment()?;
        self.carve_rivers()?;
        self.annotate()
    }
}
