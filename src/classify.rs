//! Height band classification
//!
//! Turns a sampled `HeightField` into a populated `TileGrid`. Each sample is
//! normalized against the observed range, then the first threshold it is
//! strictly below picks its band; values above every threshold get the last
//! band.

use crate::error::ConfigError;
use crate::grid::TileGrid;
use crate::heightmap::HeightField;
use crate::tile::HeightBand;

/// Ordered cut points and the bands between them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BandTable {
    /// Strictly increasing, each in (0, 1)
    pub thresholds: Vec<f32>,
    /// One more entry than `thresholds`
    pub bands: Vec<HeightBand>,
}

impl Default for BandTable {
    fn default() -> Self {
        Self {
            thresholds: vec![0.1, 0.2, 0.3, 0.5, 0.8, 0.9],
            bands: vec![
                HeightBand::DeepWater,
                HeightBand::ShallowWater,
                HeightBand::Sand,
                HeightBand::Grass,
                HeightBand::Forest,
                HeightBand::Rock,
                HeightBand::Snow,
            ],
        }
    }
}

impl BandTable {
    pub fn new(thresholds: Vec<f32>, bands: Vec<HeightBand>) -> Result<Self, ConfigError> {
        let table = Self { thresholds, bands };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bands.is_empty() {
            return Err(ConfigError::EmptyBandTable);
        }
        if self.bands.len() != self.thresholds.len() + 1 {
            return Err(ConfigError::BandCountMismatch {
                thresholds: self.thresholds.len(),
                bands: self.bands.len(),
            });
        }
        if self.bands.contains(&HeightBand::River) {
            return Err(ConfigError::ReservedBand(HeightBand::River));
        }
        for (index, &value) in self.thresholds.iter().enumerate() {
            if !(value > 0.0 && value < 1.0) {
                return Err(ConfigError::ThresholdOutOfRange { index, value });
            }
            if index > 0 {
                let prev = self.thresholds[index - 1];
                if !(value > prev) {
                    return Err(ConfigError::ThresholdsNotIncreasing {
                        index,
                        prev,
                        next: value,
                    });
                }
            }
        }
        Ok(())
    }

    /// Band for a normalized value.
    pub fn band_for(&self, value: f32) -> HeightBand {
        let index = self
            .thresholds
            .iter()
            .position(|&t| value < t)
            .unwrap_or(self.thresholds.len());
        self.bands
            .get(index)
            .or(self.bands.last())
            .copied()
            .unwrap_or_default()
    }
}

/// Build the tile grid from a height field.
///
/// A flat field (max == min) cannot be normalized; every tile gets the
/// midpoint value 0.5 and therefore the same band.
pub fn classify_heights(field: &HeightField, table: &BandTable) -> TileGrid {
    let mut grid = TileGrid::new(field.width(), field.height());

    if field.is_flat() {
        log::warn!(
            "Height field is flat ({}), classifying every tile as {:?}",
            field.min,
            table.band_for(0.5)
        );
    }

    for tile in grid.iter_mut() {
        let raw = *field.data.get(tile.x, tile.y);
        let value = field.normalize(raw);
        tile.raw_height = raw;
        tile.height_value = value;
        tile.set_band(table.band_for(value));
    }

    grid
}
