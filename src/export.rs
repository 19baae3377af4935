//! Serializable snapshot of a finished map
//!
//! Carries exactly what a renderer needs per tile: band, normalized height,
//! bitmask, collidable flag, and river membership.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::climate::Biome;
use crate::error::Result;
use crate::rivers::{River, RiverReport};
use crate::tile::{HeightBand, RiverId, Tile};
use crate::world::World;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TileExport {
    pub x: usize,
    pub y: usize,
    pub band: HeightBand,
    pub height: f32,
    pub bitmask: u8,
    pub collidable: bool,
    pub rivers: Vec<RiverId>,
    pub river_size: u8,
    pub biome: Option<Biome>,
}

impl From<&Tile> for TileExport {
    fn from(tile: &Tile) -> Self {
        Self {
            x: tile.x,
            y: tile.y,
            band: tile.height_band,
            height: tile.height_value,
            bitmask: tile.bitmask,
            collidable: tile.collidable,
            rivers: tile.rivers.clone(),
            river_size: tile.river_size,
            biome: tile.biome,
        }
    }
}

/// Whole-map snapshot; tiles are in row-major order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapExport {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub land_groups: usize,
    pub water_groups: usize,
    pub rivers: Vec<River>,
    pub river_report: RiverReport,
    pub tiles: Vec<TileExport>,
}

impl MapExport {
    pub fn from_world(world: &World) -> Self {
        Self {
            width: world.width(),
            height: world.height(),
            seed: world.seeds.master,
            land_groups: world.regions.land.len(),
            water_groups: world.regions.water.len(),
            rivers: world.rivers.clone(),
            river_report: world.river_report,
            tiles: world.grid.iter().map(TileExport::from).collect(),
        }
    }
}

/// Write the world snapshot as JSON.
pub fn write_json(world: &World, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &MapExport::from_world(world))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::rivers::RiverParams;
    use crate::world::Generator;
    use tempfile::tempdir;

    #[test]
    fn test_write_json_matches_grid() {
        let config = GeneratorConfig {
            width: 12,
            height: 10,
            seed: 3,
            rivers: RiverParams {
                count: 2,
                min_length: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        let world = Generator::run(config).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("map.json");
        write_json(&world, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let loaded: MapExport = serde_json::from_str(&text).unwrap();

        assert_eq!(loaded, MapExport::from_world(&world));
        assert_eq!(loaded.tiles.len(), 120);
        assert_eq!(loaded.tiles[13].x, 1);
        assert_eq!(loaded.tiles[13].y, 1);
        let tile = world.grid.get(5, 7);
        let exported = &loaded.tiles[7 * 12 + 5];
        assert_eq!(exported.band, tile.height_band);
        assert_eq!(exported.bitmask, tile.bitmask);
        assert_eq!(exported.collidable, tile.collidable);
    }
}
