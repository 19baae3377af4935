//! Per-tile data and the height band classification

use crate::climate::{Biome, HeatBand, MoistureBand};

/// Discrete height classification.
///
/// `River` is never produced by threshold classification; only the river
/// carver assigns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum HeightBand {
    #[default]
    DeepWater,
    ShallowWater,
    Sand,
    Grass,
    Forest,
    Rock,
    Snow,
    River,
}

impl HeightBand {
    /// Water-like bands are not collidable.
    pub fn is_water(&self) -> bool {
        matches!(
            self,
            HeightBand::DeepWater | HeightBand::ShallowWater | HeightBand::River
        )
    }

    pub fn is_collidable(&self) -> bool {
        !self.is_water()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            HeightBand::DeepWater => "Deep Water",
            HeightBand::ShallowWater => "Shallow Water",
            HeightBand::Sand => "Sand",
            HeightBand::Grass => "Grass",
            HeightBand::Forest => "Forest",
            HeightBand::Rock => "Rock",
            HeightBand::Snow => "Snow",
            HeightBand::River => "River",
        }
    }
}

/// River identifier, assigned in carving order starting at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct RiverId(pub u32);

/// A single map cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    /// Noise sample before normalization
    pub raw_height: f32,
    /// Normalized height (0.0-1.0); zeroed when carved into a river
    pub height_value: f32,
    pub height_band: HeightBand,
    pub heat_value: f32,
    pub heat_band: Option<HeatBand>,
    pub moisture_value: f32,
    pub moisture_band: Option<MoistureBand>,
    /// None for water tiles, or when climate classification is disabled
    pub biome: Option<Biome>,
    /// Same-band neighbors: Top=1, Right=2, Bottom=4, Left=8
    pub bitmask: u8,
    pub collidable: bool,
    pub flood_filled: bool,
    /// Rivers running through this tile (more than one at confluences)
    pub rivers: Vec<RiverId>,
    /// Widest river class stamped onto this tile (0 = none)
    pub river_size: u8,
}

impl Tile {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    /// Assign a height band and keep `collidable` consistent with it.
    pub fn set_band(&mut self, band: HeightBand) {
        self.height_band = band;
        self.collidable = band.is_collidable();
    }

    pub fn is_river(&self) -> bool {
        self.height_band == HeightBand::River
    }

    /// Turn this tile into part of `river`. Membership is additive, so a
    /// tile stamped by several rivers keeps every id.
    pub fn make_river(&mut self, river: RiverId, width: u8) {
        if !self.rivers.contains(&river) {
            self.rivers.push(river);
        }
        self.river_size = self.river_size.max(width);
        self.set_band(HeightBand::River);
        self.height_value = 0.0;
        self.biome = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collidable_follows_band() {
        let mut tile = Tile::new(0, 0);
        tile.set_band(HeightBand::Grass);
        assert!(tile.collidable);
        tile.set_band(HeightBand::ShallowWater);
        assert!(!tile.collidable);
    }

    #[test]
    fn test_make_river_is_additive() {
        let mut tile = Tile::new(3, 4);
        tile.set_band(HeightBand::Forest);
        tile.height_value = 0.7;
        tile.biome = Some(Biome::Woodland);

        tile.make_river(RiverId(2), 1);
        tile.make_river(RiverId(5), 3);
        tile.make_river(RiverId(2), 2);

        assert_eq!(tile.rivers, vec![RiverId(2), RiverId(5)]);
        assert_eq!(tile.river_size, 3);
        assert!(tile.is_river());
        assert!(!tile.collidable);
        assert_eq!(tile.height_value, 0.0);
        assert_eq!(tile.biome, None);
    }
}
