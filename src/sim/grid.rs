//! Bounded 2D cell space

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{CELL_SIZE_PX, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};

/// Grid coordinate. Valid cells satisfy `0 <= x < width` and `0 <= y < height`.
pub type Cell = IVec2;

/// Fixed-size playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT)
    }
}

impl Grid {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Grid that fits a screen of the given pixel size, one cell per `cell_px`
    pub fn from_screen(width_px: f32, height_px: f32, cell_px: f32) -> Self {
        let cell_px = if cell_px > 0.0 { cell_px } else { CELL_SIZE_PX };
        Self {
            width: (width_px / cell_px).floor().max(0.0) as i32,
            height: (height_px / cell_px).floor().max(0.0) as i32,
        }
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    /// Draw a uniformly random cell inside the grid
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.random_range(0..self.width), rng.random_range(0..self.height))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }
}
