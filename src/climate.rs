//! Climate system: heat and moisture maps and the biome lookup
//!
//! Heat follows a latitude gradient (cold at the top and bottom rows, hottest
//! in the middle row, so it still wraps vertically) modulated by noise and
//! cooled with elevation. Moisture is plain noise, wetter around water.
//! Both are normalized to 0-1, banded, and combined through a fixed
//! Whittaker-style table. None of this feeds back into segmentation or
//! river routing.

use crate::error::ConfigError;
use crate::grid::TileGrid;
use crate::heightmap::{sample_height_field, HeightField};
use crate::noise_field::{NoiseConfig, NoiseField};
use crate::tile::HeightBand;
use crate::tilemap::Tilemap;

// =============================================================================
// CLIMATE CONFIGURATION
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum HeatBand {
    Coldest,
    Colder,
    Cold,
    Warm,
    Warmer,
    Warmest,
}

impl HeatBand {
    pub const ALL: [HeatBand; 6] = [
        HeatBand::Coldest,
        HeatBand::Colder,
        HeatBand::Cold,
        HeatBand::Warm,
        HeatBand::Warmer,
        HeatBand::Warmest,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MoistureBand {
    Dryest,
    Dryer,
    Dry,
    Wet,
    Wetter,
    Wettest,
}

impl MoistureBand {
    pub const ALL: [MoistureBand; 6] = [
        MoistureBand::Dryest,
        MoistureBand::Dryer,
        MoistureBand::Dry,
        MoistureBand::Wet,
        MoistureBand::Wetter,
        MoistureBand::Wettest,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Biome {
    Ice,
    Tundra,
    Grassland,
    Desert,
    Woodland,
    Savanna,
    BorealForest,
    SeasonalForest,
    TemperateRainforest,
    TropicalRainforest,
}

use Biome::*;

/// Rows are moisture (Dryest..Wettest), columns are heat (Coldest..Warmest).
const BIOME_TABLE: [[Biome; 6]; 6] = [
    [Ice, Tundra, Grassland, Desert, Desert, Desert],
    [Ice, Tundra, Grassland, Desert, Desert, Desert],
    [Ice, Tundra, Woodland, Woodland, Savanna, Savanna],
    [Ice, Tundra, BorealForest, Woodland, Savanna, Savanna],
    [Ice, Tundra, BorealForest, SeasonalForest, TropicalRainforest, TropicalRainforest],
    [Ice, Tundra, BorealForest, TemperateRainforest, TropicalRainforest, TropicalRainforest],
];

impl Biome {
    pub fn lookup(heat: HeatBand, moisture: MoistureBand) -> Biome {
        BIOME_TABLE[moisture as usize][heat as usize]
    }
}

/// Parameters for the heat/moisture pass
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    pub heat_noise: NoiseConfig,
    pub moisture_noise: NoiseConfig,
    /// Upper bounds for Coldest..Warmer; above the last is Warmest
    pub heat_thresholds: [f32; 5],
    /// Upper bounds for Dryest..Wetter; above the last is Wettest
    pub moisture_thresholds: [f32; 5],
}

impl Default for ClimateConfig {
    fn default() -> Self {
        let noise = NoiseConfig {
            octaves: 4,
            frequency: 3.0,
            ..Default::default()
        };
        Self {
            heat_noise: noise.clone(),
            moisture_noise: noise,
            heat_thresholds: [0.05, 0.18, 0.4, 0.6, 0.8],
            moisture_thresholds: [0.27, 0.4, 0.6, 0.8, 0.9],
        }
    }
}

impl ClimateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.heat_noise.validate()?;
        self.moisture_noise.validate()?;
        validate_thresholds(&self.heat_thresholds)?;
        validate_thresholds(&self.moisture_thresholds)
    }
}

fn validate_thresholds(thresholds: &[f32]) -> Result<(), ConfigError> {
    for (index, &value) in thresholds.iter().enumerate() {
        if !(value > 0.0 && value < 1.0) {
            return Err(ConfigError::ThresholdOutOfRange { index, value });
        }
        if index > 0 && !(value > thresholds[index - 1]) {
            return Err(ConfigError::ThresholdsNotIncreasing {
                index,
                prev: thresholds[index - 1],
                next: value,
            });
        }
    }
    Ok(())
}

fn band_index(thresholds: &[f32; 5], value: f32) -> usize {
    thresholds.iter().position(|&t| value < t).unwrap_or(5)
}

pub fn heat_band(thresholds: &[f32; 5], value: f32) -> HeatBand {
    HeatBand::ALL[band_index(thresholds, value)]
}

pub fn moisture_band(thresholds: &[f32; 5], value: f32) -> MoistureBand {
    MoistureBand::ALL[band_index(thresholds, value)]
}

// =============================================================================
// HEAT AND MOISTURE
// =============================================================================

/// Latitude factor: 0 on the top and bottom rows, 1 on the middle row.
fn latitude_warmth(y: usize, height: usize) -> f32 {
    let t = y as f32 / height as f32;
    1.0 - (2.0 * t - 1.0).abs()
}

/// Elevation cooling per height band, as a factor of normalized height.
fn elevation_cooling(band: HeightBand) -> f32 {
    match band {
        HeightBand::Grass => 0.1,
        HeightBand::Forest => 0.2,
        HeightBand::Rock => 0.3,
        HeightBand::Snow => 0.4,
        _ => 0.0,
    }
}

/// Moisture bonus per height band, as a factor of normalized height.
fn water_moisture(band: HeightBand) -> f32 {
    match band {
        HeightBand::DeepWater => 8.0,
        HeightBand::ShallowWater => 3.0,
        HeightBand::Sand => 0.25,
        _ => 0.0,
    }
}

/// Generate the heat map (0-1) for a classified grid.
pub fn generate_heat(grid: &TileGrid, noise: &NoiseField) -> Tilemap<f32> {
    let width = grid.width();
    let height = grid.height();
    let sampled = sample_height_field(width, height, noise);

    let raw = Tilemap::from_fn(width, height, |x, y| {
        let tile = grid.get(x, y);
        let warmth = latitude_warmth(y, height) * sampled.normalize(*sampled.data.get(x, y));
        warmth - elevation_cooling(tile.height_band) * tile.height_value
    });

    normalize_map(raw)
}

/// Generate the moisture map (0-1) for a classified grid.
pub fn generate_moisture(grid: &TileGrid, noise: &NoiseField) -> Tilemap<f32> {
    let width = grid.width();
    let height = grid.height();
    let sampled = sample_height_field(width, height, noise);

    let raw = Tilemap::from_fn(width, height, |x, y| {
        let tile = grid.get(x, y);
        sampled.normalize(*sampled.data.get(x, y))
            + water_moisture(tile.height_band) * tile.height_value
    });

    normalize_map(raw)
}

fn normalize_map(raw: Tilemap<f32>) -> Tilemap<f32> {
    let field = HeightField::from_tilemap(raw);
    let mut out = Tilemap::new_with(field.width(), field.height(), 0.0f32);
    for (x, y, &v) in field.data.iter() {
        out.set(x, y, field.normalize(v));
    }
    out
}

/// Run the climate pass: fill heat/moisture values, bands, and biomes.
/// Water tiles get bands but no biome.
pub fn apply_climate(grid: &mut TileGrid, config: &ClimateConfig, heat_seed: u32, moisture_seed: u32) {
    let heat_noise = NoiseField::new(&config.heat_noise, heat_seed);
    let moisture_noise = NoiseField::new(&config.moisture_noise, moisture_seed);

    let heat = generate_heat(grid, &heat_noise);
    let moisture = generate_moisture(grid, &moisture_noise);

    for tile in grid.iter_mut() {
        let h = *heat.get(tile.x, tile.y);
        let m = *moisture.get(tile.x, tile.y);
        let hb = heat_band(&config.heat_thresholds, h);
        let mb = moisture_band(&config.moisture_thresholds, m);

        tile.heat_value = h;
        tile.moisture_value = m;
        tile.heat_band = Some(hb);
        tile.moisture_band = Some(mb);
        tile.biome = if tile.collidable {
            Some(Biome::lookup(hb, mb))
        } else {
            None
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify_heights, BandTable};
    use crate::noise_field::NoiseConfig;

    #[test]
    fn test_biome_table_corners() {
        assert_eq!(Biome::lookup(HeatBand::Coldest, MoistureBand::Wettest), Biome::Ice);
        assert_eq!(Biome::lookup(HeatBand::Warmest, MoistureBand::Dryest), Biome::Desert);
        assert_eq!(
            Biome::lookup(HeatBand::Warmest, MoistureBand::Wettest),
            Biome::TropicalRainforest
        );
        assert_eq!(
            Biome::lookup(HeatBand::Warm, MoistureBand::Wettest),
            Biome::TemperateRainforest
        );
        assert_eq!(Biome::lookup(HeatBand::Cold, MoistureBand::Wet), Biome::BorealForest);
    }

    #[test]
    fn test_band_lookup() {
        let config = ClimateConfig::default();
        assert_eq!(heat_band(&config.heat_thresholds, 0.0), HeatBand::Coldest);
        assert_eq!(heat_band(&config.heat_thresholds, 0.5), HeatBand::Warm);
        assert_eq!(heat_band(&config.heat_thresholds, 0.8), HeatBand::Warmest);
        assert_eq!(moisture_band(&config.moisture_thresholds, 0.3), MoistureBand::Dryer);
        assert_eq!(moisture_band(&config.moisture_thresholds, 0.95), MoistureBand::Wettest);
    }

    #[test]
    fn test_latitude_wraps() {
        assert_eq!(latitude_warmth(0, 10), 0.0);
        assert_eq!(latitude_warmth(5, 10), 1.0);
        // Last row is as cold as the second row, mirroring around the middle
        assert!((latitude_warmth(9, 10) - latitude_warmth(1, 10)).abs() < 1e-6);
    }

    #[test]
    fn test_apply_climate_fills_land_only() {
        let noise = NoiseField::new(&NoiseConfig::default(), 5);
        let field = sample_height_field(32, 32, &noise);
        let mut grid = classify_heights(&field, &BandTable::default());

        apply_climate(&mut grid, &ClimateConfig::default(), 1, 2);

        for tile in grid.iter() {
            assert!((0.0..=1.0).contains(&tile.heat_value));
            assert!((0.0..=1.0).contains(&tile.moisture_value));
            assert!(tile.heat_band.is_some());
            assert!(tile.moisture_band.is_some());
            assert_eq!(tile.biome.is_some(), tile.collidable);
        }
    }

    #[test]
    fn test_validate_thresholds() {
        let mut config = ClimateConfig::default();
        assert!(config.validate().is_ok());
        config.heat_thresholds = [0.1, 0.3, 0.2, 0.6, 0.8];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdsNotIncreasing { index: 2, .. })
        ));
    }
}
