use crate::error::{SolveResult, SolverError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TILE_COUNT: usize = 5;
/// Largest grid accepted from callers; bigger grids are all seams and no picture.
pub const MAX_TILE_COUNT: usize = 64;

/// Rejects grid sizes the layout cannot be built for.
pub fn check_tile_count(tile_count: usize) -> SolveResult<()> {
    if tile_count == 0 || tile_count > MAX_TILE_COUNT {
        return Err(SolverError::Config(format!(
            "tile_count must be between 1 and {}, got {}",
            MAX_TILE_COUNT, tile_count
        )));
    }
    Ok(())
}

/// Pixel rectangle of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Tile {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Cumulative pixel boundaries along each axis (N + 1 entries each).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLines {
    pub vertical: Vec<u32>,
    pub horizontal: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayout {
    pub tile_count: usize,
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<Tile>,
    pub grid: GridLines,
}

impl TileLayout {
    /// Total number of cells (N²).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn tile(&self, row: usize, col: usize) -> &Tile {
        &self.tiles[row * self.tile_count + col]
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

/// `round(i * len / n)`, half rounded up, in exact integer arithmetic.
#[inline]
fn boundary(i: usize, len: u32, n: usize) -> u32 {
    if n == 0 {
        return 0;
    }
    let num = 2 * i as u64 * len as u64 + n as u64;
    (num / (2 * n as u64)) as u32
}

fn grid_axis(len: u32, n: usize) -> Vec<u32> {
    (0..=n).map(|i| boundary(i, len, n)).collect()
}

/// Partitions a `width`×`height` image into a `tile_count`×`tile_count` grid.
///
/// Boundaries are rounded rather than floored so the last line always lands
/// on the image edge; neighbouring tiles may differ by one pixel.
/// Tiles come out row-major. A `tile_count` of zero gives an empty layout.
/// Callers taking `tile_count` from input go through [`check_tile_count`] first.
pub fn compute_tile_layout(width: u32, height: u32, tile_count: usize) -> TileLayout {
    let vertical = grid_axis(width, tile_count);
    let horizontal = grid_axis(height, tile_count);

    let mut tiles = Vec::with_capacity(tile_count * tile_count);
    for row in 0..tile_count {
        for col in 0..tile_count {
            let x = vertical[col];
            let y = horizontal[row];
            tiles.push(Tile {
                x,
                y,
                width: vertical[col + 1] - x,
                height: horizontal[row + 1] - y,
            });
        }
    }

    TileLayout {
        tile_count,
        width,
        height,
        tiles,
        grid: GridLines {
            vertical,
            horizontal,
        },
    }
}
