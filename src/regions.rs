//! Land and water region segmentation
//!
//! Partitions the grid into maximal 4-connected groups of tiles that share the
//! same `collidable` value. Uses an explicit work stack so large grids cannot
//! overflow the call stack.

use crate::grid::TileGrid;

/// Type of tile group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GroupKind {
    Land,
    Water,
}

impl GroupKind {
    pub fn from_collidable(collidable: bool) -> Self {
        if collidable {
            GroupKind::Land
        } else {
            GroupKind::Water
        }
    }

    pub fn is_collidable(&self) -> bool {
        *self == GroupKind::Land
    }
}

/// A connected set of tiles, held by coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGroup {
    pub kind: GroupKind,
    pub tiles: Vec<(usize, usize)>,
}

impl TileGroup {
    fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            tiles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Bounding box (min_x, min_y, max_x, max_y) in grid coordinates.
    /// Groups that wrap around an edge span the whole axis.
    pub fn bounds(&self) -> Option<(usize, usize, usize, usize)> {
        let mut iter = self.tiles.iter();
        let &(x0, y0) = iter.next()?;
        Some(iter.fold((x0, y0, x0, y0), |b, &(x, y)| {
            (b.0.min(x), b.1.min(y), b.2.max(x), b.3.max(y))
        }))
    }
}

/// Result of a flood fill pass
#[derive(Clone, Debug, Default)]
pub struct Regions {
    pub land: Vec<TileGroup>,
    pub water: Vec<TileGroup>,
}

impl Regions {
    pub fn total_tiles(&self) -> usize {
        self.land.iter().chain(self.water.iter()).map(TileGroup::len).sum()
    }

    pub fn largest_land(&self) -> Option<&TileGroup> {
        self.land.iter().max_by_key(|g| g.len())
    }

    pub fn largest_water(&self) -> Option<&TileGroup> {
        self.water.iter().max_by_key(|g| g.len())
    }
}

/// Segment every tile into land and water groups.
///
/// Resets `flood_filled` first, so it can be rerun on the same grid.
/// Afterwards every tile is marked filled and belongs to exactly one group.
pub fn flood_fill(grid: &mut TileGrid) -> Regions {
    for tile in grid.iter_mut() {
        tile.flood_filled = false;
    }

    let mut regions = Regions::default();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.get(x, y).flood_filled {
                continue;
            }

            let group = fill_group(grid, x, y, &mut stack);
            if group.is_empty() {
                continue;
            }
            match group.kind {
                GroupKind::Land => regions.land.push(group),
                GroupKind::Water => regions.water.push(group),
            }
        }
    }

    log::debug!(
        "Flood fill: {} land groups, {} water groups",
        regions.land.len(),
        regions.water.len()
    );

    regions
}

/// Grow one group from `(x, y)`.
///
/// A tile can sit on the stack several times before it is popped; the
/// `flood_filled` check at pop time is what keeps it from being counted twice.
fn fill_group(
    grid: &mut TileGrid,
    x: usize,
    y: usize,
    stack: &mut Vec<(usize, usize)>,
) -> TileGroup {
    let kind = GroupKind::from_collidable(grid.get(x, y).collidable);
    let mut group = TileGroup::new(kind);

    stack.clear();
    stack.push((x, y));

    while let Some((cx, cy)) = stack.pop() {
        let tile = grid.get_mut(cx, cy);
        if tile.flood_filled || tile.collidable != kind.is_collidable() {
            continue;
        }
        tile.flood_filled = true;
        let collidable = tile.collidable;
        group.tiles.push((cx, cy));

        for (nx, ny) in grid.neighbors(cx, cy) {
            let neighbor = grid.get(nx, ny);
            if !neighbor.flood_filled && neighbor.collidable == collidable {
                stack.push((nx, ny));
            }
        }
    }

    group
}
