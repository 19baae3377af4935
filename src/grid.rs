//! The tile grid: owns every `Tile` and resolves neighbors by wrapped
//! coordinate instead of stored references.

use crate::tile::{HeightBand, Tile};
use crate::tilemap::{Direction, Tilemap};

#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    tiles: Tilemap<Tile>,
}

impl TileGrid {
    /// Allocate a grid of default tiles with their coordinates filled in.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            tiles: Tilemap::from_fn(width, height, Tile::new),
        }
    }

    /// Build a grid directly from normalized heights and bands. Used by tests
    /// and tools that want to skip noise sampling.
    pub fn from_heights(heights: &Tilemap<f32>, band_of: impl Fn(f32) -> HeightBand) -> Self {
        let tiles = Tilemap::from_fn(heights.width, heights.height, |x, y| {
            let h = *heights.get(x, y);
            let mut tile = Tile::new(x, y);
            tile.raw_height = h;
            tile.height_value = h;
            tile.set_band(band_of(h));
            tile
        });
        Self { tiles }
    }

    pub fn width(&self) -> usize {
        self.tiles.width
    }

    pub fn height(&self) -> usize {
        self.tiles.height
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> &Tile {
        self.tiles.get(x, y)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        self.tiles.get_mut(x, y)
    }

    /// Coordinate of the neighbor in `dir`, wrapping at the edges.
    pub fn neighbor_pos(&self, x: usize, y: usize, dir: Direction) -> (usize, usize) {
        self.tiles.neighbor(x, y, dir)
    }

    pub fn neighbor(&self, x: usize, y: usize, dir: Direction) -> &Tile {
        let (nx, ny) = self.neighbor_pos(x, y, dir);
        self.tiles.get(nx, ny)
    }

    /// Neighbor coordinates in `Direction::ALL` order.
    pub fn neighbors(&self, x: usize, y: usize) -> [(usize, usize); 4] {
        self.tiles.neighbors(x, y)
    }

    pub fn wrap_offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> (usize, usize) {
        self.tiles.wrap_offset(x, y, dx, dy)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().map(|(_, _, tile)| tile)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut().map(|(_, _, tile)| tile)
    }

    /// Count tiles per height band.
    pub fn band_counts(&self) -> Vec<(HeightBand, usize)> {
        let mut counts: Vec<(HeightBand, usize)> = Vec::new();
        for tile in self.iter() {
            match counts.iter_mut().find(|(band, _)| *band == tile.height_band) {
                Some((_, n)) => *n += 1,
                None => counts.push((tile.height_band, 1)),
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_know_their_coordinates() {
        let grid = TileGrid::new(6, 4);
        for tile in grid.iter() {
            assert_eq!(grid.get(tile.x, tile.y), tile);
        }
        assert_eq!(grid.get(5, 3).x, 5);
        assert_eq!(grid.get(5, 3).y, 3);
    }

    #[test]
    fn test_toroidal_neighbors() {
        let grid = TileGrid::new(8, 5);
        for y in 0..5 {
            let left = grid.neighbor(0, y, Direction::Left);
            assert_eq!((left.x, left.y), (7, y));
        }
        for x in 0..8 {
            let top = grid.neighbor(x, 0, Direction::Top);
            assert_eq!((top.x, top.y), (x, 4));
        }
        let right = grid.neighbor(7, 2, Direction::Right);
        assert_eq!((right.x, right.y), (0, 2));
        let bottom = grid.neighbor(3, 4, Direction::Bottom);
        assert_eq!((bottom.x, bottom.y), (3, 0));
    }

    #[test]
    fn test_neighbor_relation_is_symmetric() {
        let grid = TileGrid::new(3, 3);
        for tile in grid.iter() {
            for dir in Direction::ALL {
                let (nx, ny) = grid.neighbor_pos(tile.x, tile.y, dir);
                assert_eq!(
                    grid.neighbor_pos(nx, ny, dir.opposite()),
                    (tile.x, tile.y)
                );
            }
        }
    }

    #[test]
    fn test_from_heights_sets_collidable() {
        let heights = Tilemap::from_fn(2, 1, |x, _| x as f32);
        let grid = TileGrid::from_heights(&heights, |h| {
            if h < 0.5 { HeightBand::DeepWater } else { HeightBand::Grass }
        });
        assert!(!grid.get(0, 0).collidable);
        assert!(grid.get(1, 0).collidable);
        assert_eq!(grid.band_counts().len(), 2);
    }
}
