//! Per-tile adjacency bitmasks for edge-aware tilesets.
//!
//! Bit layout is fixed: Top=1, Right=2, Bottom=4, Left=8. A bit is set when the
//! neighbor in that direction has exactly the same height band.

use crate::grid::TileGrid;
use crate::tilemap::Direction;

pub const TOP: u8 = 1;
pub const RIGHT: u8 = 2;
pub const BOTTOM: u8 = 4;
pub const LEFT: u8 = 8;

pub fn direction_bit(dir: Direction) -> u8 {
    match dir {
        Direction::Top => TOP,
        Direction::Right => RIGHT,
        Direction::Bottom => BOTTOM,
        Direction::Left => LEFT,
    }
}

/// Bitmask for the tile at `(x, y)` from its current neighbors.
pub fn compute_bitmask(grid: &TileGrid, x: usize, y: usize) -> u8 {
    let band = grid.get(x, y).height_band;
    Direction::ALL
        .iter()
        .filter(|&&dir| grid.neighbor(x, y, dir).height_band == band)
        .fold(0, |mask, &dir| mask | direction_bit(dir))
}

/// Recompute every tile's bitmask. Must run after any pass that changes
/// bands, river carving included.
pub fn update_bitmasks(grid: &mut TileGrid) {
    let view: &TileGrid = grid;
    let masks: Vec<(usize, usize, u8)> = view
        .iter()
        .map(|t| (t.x, t.y, compute_bitmask(view, t.x, t.y)))
        .collect();

    for (x, y, mask) in masks {
        grid.get_mut(x, y).bitmask = mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::HeightBand;
    use crate::tilemap::Tilemap;

    fn grid_from_bands(rows: &[&[HeightBand]]) -> TileGrid {
        let height = rows.len();
        let width = rows[0].len();
        let mut grid = TileGrid::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, band) in row.iter().enumerate() {
                grid.get_mut(x, y).set_band(*band);
            }
        }
        grid
    }

    #[test]
    fn test_surrounded_tile_is_fifteen() {
        let heights = Tilemap::new_with(3, 3, 0.6f32);
        let mut grid = TileGrid::from_heights(&heights, |_| HeightBand::Grass);
        update_bitmasks(&mut grid);
        assert_eq!(grid.get(1, 1).bitmask, 15);
        // On a uniform torus every tile is surrounded
        assert!(grid.iter().all(|t| t.bitmask == 15));
    }

    #[test]
    fn test_isolated_tile_is_zero() {
        use HeightBand::*;
        let mut grid = grid_from_bands(&[
            &[Sand, Sand, Sand],
            &[Sand, Rock, Sand],
            &[Sand, Sand, Sand],
        ]);
        update_bitmasks(&mut grid);
        assert_eq!(grid.get(1, 1).bitmask, 0);
    }

    #[test]
    fn test_bit_weights() {
        use HeightBand::*;
        let mut grid = grid_from_bands(&[
            &[Sand, Rock, Sand],
            &[Sand, Rock, Rock],
            &[Sand, Sand, Sand],
        ]);
        update_bitmasks(&mut grid);
        // Top and Right match
        assert_eq!(grid.get(1, 1).bitmask, TOP | RIGHT);
        assert_eq!(grid.get(1, 1).bitmask, 3);

        // (0, 1): the left neighbor wraps around to the Rock at (2, 1)
        assert_eq!(grid.get(0, 1).bitmask, TOP | BOTTOM);
    }

    #[test]
    fn test_wrap_contributes() {
        use HeightBand::*;
        let mut grid = grid_from_bands(&[
            &[Grass, Sand, Grass],
        ]);
        update_bitmasks(&mut grid);
        // A 1-row torus: top and bottom are the tile itself
        assert_eq!(grid.get(0, 0).bitmask, TOP | BOTTOM | LEFT);
        assert_eq!(grid.get(1, 0).bitmask, TOP | BOTTOM);
    }
}
