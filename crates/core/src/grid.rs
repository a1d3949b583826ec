//! Grid module - the playfield cell matrix
//!
//! The grid is a `width x height` matrix where each cell is 0 (empty) or the
//! nonzero code of the shape kind that was baked there.
//! Uses a flat row-major vector so row shifts are single `copy_within` calls.
//! Coordinates: (x, y) where x grows left to right and y grows downwards;
//! everything outside the matrix reads as empty and ignores writes.

use crate::shape::Shape;
use crate::types::{LEVEL_HEIGHT, LEVEL_WIDTH};

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<u8>,
}

impl Grid {
    /// Create an empty grid. Zero dimensions are bumped to 1.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell value at (x, y); 0 for any out-of-bounds coordinate.
    pub fn get(&self, x: i32, y: i32) -> u8 {
        self.index(x, y).map(|idx| self.cells[idx]).unwrap_or(0)
    }

    /// Overwrite the cell at (x, y). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, value: u8) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = value;
        }
    }

    /// Occupancy predicate used for every collision test.
    ///
    /// Left, right and bottom edges are solid. Rows above the top edge are open
    /// so pieces can spawn and rotate there.
    pub fn collides_at(&self, x: i32, y: i32) -> bool {
        if x < 0 || x as usize >= self.width || (y >= 0 && y as usize >= self.height) {
            return true;
        }
        self.get(x, y) != 0
    }

    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Check if a row is completely filled. Rows outside the grid are never full.
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != 0)
    }

    /// Remove row `y`, shift every row above it down by one and open an empty
    /// row at the top.
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.height {
            return;
        }

        let width = self.width;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(0);
    }

    /// Clear every full row, scanning top to bottom. Returns the indices of
    /// the cleared rows in scan order.
    ///
    /// Clearing row `y` only moves rows above it, so the scan can continue at
    /// `y + 1` without revisiting anything.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let mut cleared = Vec::new();
        for y in 0..self.height {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared.push(y);
            }
        }
        cleared
    }

    /// Bake a shape whose pivot sits at (x, y).
    ///
    /// Blocks write the kind code; a block can only add terrain, never erase it.
    /// Blocks outside the grid (typically above the top edge) are dropped.
    pub fn bake(&mut self, shape: &Shape, x: i32, y: i32) {
        let code = shape.kind().code();
        for ((dx, dy), value) in shape.blocks() {
            let (bx, by) = (x + dx, y + dy);
            let next = if value != 0 { code } else { self.get(bx, by) };
            self.set(bx, by, next);
        }
    }

    /// Flat row-major cells, for rendering.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.width)
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Build a grid from text rows (`.` empty, any other char = 1), for tests.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width);
            for (x, ch) in row.chars().enumerate() {
                if ch != '.' {
                    grid.set(x as i32, y as i32, 1);
                }
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(LEVEL_WIDTH, LEVEL_HEIGHT)
    }
}
