//! River carving by steepest descent.
//!
//! Each river starts on a high land tile and repeatedly steps to its strictly
//! lowest 4-neighbor until it reaches a non-collidable tile (water or an
//! earlier river) or a local minimum. Accepted paths are then stamped into the
//! grid with a fixed, width-dependent neighborhood pattern.
//!
//! Rivers are carved after segmentation, so they can cut through land regions
//! without the region lists reflecting it.

use rand::Rng;

use crate::error::ConfigError;
use crate::grid::TileGrid;
use crate::tile::{HeightBand, RiverId};
use crate::tilemap::Direction;

/// Widest supported river class
pub const MAX_RIVER_WIDTH: u8 = 4;

// Stamp patterns, as (dx, dy) offsets with y growing downwards. Each class
// contains the one below it.
const STAMP_1: &[(isize, isize)] = &[(0, 0), (1, 0), (0, 1), (1, 1)];

const STAMP_2: &[(isize, isize)] = &[
    (0, 0), (1, 0), (0, 1), (1, 1),
    (0, -1), (-1, -1), (1, -1), (-1, 0), (-1, 1),
];

// Width 2 plus two cells down-right
const STAMP_3: &[(isize, isize)] = &[
    (0, 0), (1, 0), (0, 1), (1, 1),
    (0, -1), (-1, -1), (1, -1), (-1, 0), (-1, 1),
    (2, 0), (2, 1), (0, 2), (1, 2), (2, 2),
];

// Width 3 plus a second ring reaching two cells up-left
const STAMP_4: &[(isize, isize)] = &[
    (0, 0), (1, 0), (0, 1), (1, 1),
    (0, -1), (-1, -1), (1, -1), (-1, 0), (-1, 1),
    (2, 0), (2, 1), (0, 2), (1, 2), (2, 2),
    (-2, -1), (-2, 0), (-2, 1), (-1, -2), (0, -2), (1, -2), (-1, 2), (2, -1),
];

/// Offsets converted around every traced tile for a width class.
/// Widths outside 1..=4 are clamped.
pub fn stamp_offsets(width: u8) -> &'static [(isize, isize)] {
    match width.clamp(1, MAX_RIVER_WIDTH) {
        1 => STAMP_1,
        2 => STAMP_2,
        3 => STAMP_3,
        _ => STAMP_4,
    }
}

/// How river sources are picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum SourcePolicy {
    /// Uniformly random tiles, kept if they qualify
    #[default]
    Random,
    /// Qualifying tiles from highest to lowest
    Highest,
}

/// Parameters for river carving
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RiverParams {
    /// Rivers to carve
    pub count: usize,
    /// Smallest width class (1-4)
    pub min_width: u8,
    /// Largest width class (1-4)
    pub max_width: u8,
    /// Hard bound on descent steps per river
    pub max_steps: usize,
    /// Minimum normalized height for a source tile
    pub min_source_height: f32,
    /// Source picks before giving up
    pub max_attempts: usize,
    /// Shortest accepted path, in tiles
    pub min_length: usize,
    /// Most path tiles allowed to border an existing river
    pub max_intersections: usize,
    pub source: SourcePolicy,
}

impl Default for RiverParams {
    fn default() -> Self {
        Self {
            count: 40,
            min_width: 1,
            max_width: 4,
            max_steps: 10_000,
            min_source_height: 0.6,
            max_attempts: 1000,
            min_length: 8,
            max_intersections: 2,
            source: SourcePolicy::Random,
        }
    }
}

impl RiverParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_width < 1 || self.max_width > MAX_RIVER_WIDTH || self.min_width > self.max_width {
            return Err(ConfigError::InvalidRiverWidth {
                min: self.min_width,
                max: self.max_width,
            });
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroStepBound);
        }
        Ok(())
    }
}

/// Why a trace stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Termination {
    /// Last tile is water or an existing river
    ReachedWater,
    /// No neighbor is strictly lower
    LocalMinimum,
    /// Step bound hit
    StepLimit,
}

/// A carved river
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct River {
    pub id: RiverId,
    /// Source first; consecutive entries are 4-neighbors
    pub path: Vec<(usize, usize)>,
    pub width: u8,
    pub termination: Termination,
}

impl River {
    pub fn source(&self) -> Option<(usize, usize)> {
        self.path.first().copied()
    }

    pub fn mouth(&self) -> Option<(usize, usize)> {
        self.path.last().copied()
    }
}

/// Outcome counts for a carving pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RiverReport {
    pub accepted: usize,
    pub rejected: usize,
    pub attempts: usize,
}

/// A traced but not yet carved path
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub path: Vec<(usize, usize)>,
    pub termination: Termination,
}

/// The strictly lowest neighbor of `(x, y)`.
///
/// Ties go to the first neighbor in `Direction::ALL` order
/// (Left, Right, Top, Bottom). Returns `None` at a local minimum.
pub fn lowest_neighbor(grid: &TileGrid, x: usize, y: usize) -> Option<(Direction, (usize, usize))> {
    let mut lowest = grid.get(x, y).height_value;
    let mut best = None;

    for dir in Direction::ALL {
        let pos = grid.neighbor_pos(x, y, dir);
        let h = grid.get(pos.0, pos.1).height_value;
        if h < lowest {
            lowest = h;
            best = Some((dir, pos));
        }
    }

    best
}

/// Follow the steepest descent from `source` without modifying the grid.
pub fn trace_river(grid: &TileGrid, source: (usize, usize), max_steps: usize) -> Trace {
    let mut path = vec![source];
    let (mut x, mut y) = source;

    loop {
        if !grid.get(x, y).collidable {
            return Trace { path, termination: Termination::ReachedWater };
        }
        if path.len() > max_steps {
            return Trace { path, termination: Termination::StepLimit };
        }
        match lowest_neighbor(grid, x, y) {
            Some((_, (nx, ny))) => {
                path.push((nx, ny));
                x = nx;
                y = ny;
            }
            None => {
                return Trace { path, termination: Termination::LocalMinimum };
            }
        }
    }
}

/// Path tiles, the terminus excluded, that border an existing river.
fn count_intersections(grid: &TileGrid, path: &[(usize, usize)]) -> usize {
    let body = &path[..path.len().saturating_sub(1)];
    body.iter()
        .filter(|&&(x, y)| {
            grid.neighbors(x, y)
                .iter()
                .any(|&(nx, ny)| grid.get(nx, ny).is_river())
        })
        .count()
}

/// Stamp `river` into the grid. Open-water tiles keep their band; every
/// other covered tile becomes river.
pub fn carve_river(grid: &mut TileGrid, river: &River) {
    let offsets = stamp_offsets(river.width);
    for &(x, y) in &river.path {
        for &(dx, dy) in offsets {
            let (nx, ny) = grid.wrap_offset(x, y, dx, dy);
            let tile = grid.get_mut(nx, ny);
            if matches!(tile.height_band, HeightBand::DeepWater | HeightBand::ShallowWater) {
                continue;
            }
            tile.make_river(river.id, river.width);
        }
    }
}

fn is_source_candidate(grid: &TileGrid, x: usize, y: usize, params: &RiverParams) -> bool {
    let tile = grid.get(x, y);
    tile.collidable && tile.rivers.is_empty() && tile.height_value >= params.min_source_height
}

/// Carve up to `params.count` rivers.
///
/// Each attempt picks a source, traces it, and either rejects the path (too
/// short, or crossing too many existing rivers) or carves it before the next
/// attempt, so later rivers can flow into earlier ones.
pub fn carve_rivers<R: Rng>(
    grid: &mut TileGrid,
    params: &RiverParams,
    rng: &mut R,
) -> (Vec<River>, RiverReport) {
    let mut rivers = Vec::new();
    let mut report = RiverReport::default();
    if params.count == 0 || grid.is_empty() {
        return (rivers, report);
    }

    // Highest-first candidates, ties broken by row-major position
    let mut ranked: Vec<(usize, usize)> = Vec::new();
    if params.source == SourcePolicy::Highest {
        let view: &TileGrid = grid;
        ranked = view
            .iter()
            .filter(|t| is_source_candidate(view, t.x, t.y, params))
            .map(|t| (t.x, t.y))
            .collect();
        ranked.sort_by(|a, b| {
            let ha = view.get(a.0, a.1).height_value;
            let hb = view.get(b.0, b.1).height_value;
            hb.total_cmp(&ha).then((a.1, a.0).cmp(&(b.1, b.0)))
        });
    }
    let mut ranked = ranked.into_iter();

    while rivers.len() < params.count && report.attempts < params.max_attempts {
        let (x, y) = match params.source {
            SourcePolicy::Random => (
                rng.gen_range(0..grid.width()),
                rng.gen_range(0..grid.height()),
            ),
            SourcePolicy::Highest => match ranked.next() {
                Some(pos) => pos,
                None => break,
            },
        };
        report.attempts += 1;

        if !is_source_candidate(grid, x, y, params) {
            continue;
        }

        let trace = trace_river(grid, (x, y), params.max_steps);
        let intersections = count_intersections(grid, &trace.path);
        if trace.path.len() < params.min_length || intersections > params.max_intersections {
            report.rejected += 1;
            continue;
        }

        let river = River {
            id: RiverId(rivers.len() as u32),
            path: trace.path,
            width: rng.gen_range(params.min_width..=params.max_width),
            termination: trace.termination,
        };
        log::debug!(
            "River {} from {:?} to {:?}: {} tiles, width {}, {:?}",
            river.id.0,
            river.source(),
            river.mouth(),
            river.path.len(),
            river.width,
            river.termination
        );

        carve_river(grid, &river);
        rivers.push(river);
    }

    report.accepted = rivers.len();
    if rivers.len() < params.count {
        log::warn!(
            "Only carved {} of {} rivers after {} attempts",
            rivers.len(),
            params.count,
            report.attempts
        );
    }

    (rivers, report)
}
