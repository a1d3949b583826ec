//! Shape module - tetromino definitions and the rotation transform
//!
//! Every shape lives in a 4x4 frame stored row-major. A cell holds 0 (empty),
//! 1 (filled) or 2 (filled, and the pivot). The pivot is the anchor a figure is
//! positioned by and the point block offsets are measured from; a frame with no
//! pivot cell anchors at (1, 1).

use crate::rng::SimpleRng;
use crate::types::{ShapeKind, SHAPE_CELLS, SHAPE_DIMENSION};

/// Offset of a single block relative to the shape pivot
pub type BlockOffset = (i32, i32);

/// Pivot used when no cell carries the pivot marker.
pub const DEFAULT_PIVOT: (usize, usize) = (1, 1);

/// Cell value marking the pivot.
const PIVOT_MARK: u8 = 2;

/// An immutable tetromino definition.
///
/// Rotation returns a new value; a shape is never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: ShapeKind,
    cells: [u8; SHAPE_CELLS],
    rotatable: bool,
}

#[rustfmt::skip]
const CATALOG: [Shape; 7] = [
    Shape {
        kind: ShapeKind::T,
        cells: [
            0, 0, 0, 0,
            1, 2, 1, 0,
            0, 1, 0, 0,
            0, 0, 0, 0,
        ],
        rotatable: true,
    },
    Shape {
        kind: ShapeKind::S,
        cells: [
            0, 0, 0, 0,
            0, 2, 1, 0,
            1, 1, 0, 0,
            0, 0, 0, 0,
        ],
        rotatable: true,
    },
    Shape {
        kind: ShapeKind::Z,
        cells: [
            0, 0, 0, 0,
            1, 2, 0, 0,
            0, 1, 1, 0,
            0, 0, 0, 0,
        ],
        rotatable: true,
    },
    Shape {
        kind: ShapeKind::O,
        cells: [
            0, 0, 0, 0,
            0, 2, 1, 0,
            0, 1, 1, 0,
            0, 0, 0, 0,
        ],
        rotatable: false,
    },
    Shape {
        kind: ShapeKind::L,
        cells: [
            0, 1, 0, 0,
            0, 2, 0, 0,
            0, 1, 1, 0,
            0, 0, 0, 0,
        ],
        rotatable: true,
    },
    Shape {
        kind: ShapeKind::J,
        cells: [
            0, 1, 0, 0,
            0, 2, 0, 0,
            1, 1, 0, 0,
            0, 0, 0, 0,
        ],
        rotatable: true,
    },
    Shape {
        kind: ShapeKind::I,
        cells: [
            0, 1, 0, 0,
            0, 2, 0, 0,
            0, 1, 0, 0,
            0, 1, 0, 0,
        ],
        rotatable: true,
    },
];

#[inline(always)]
fn index_to_coords(i: usize) -> (usize, usize) {
    (i % SHAPE_DIMENSION, i / SHAPE_DIMENSION)
}

#[inline(always)]
fn coords_to_index(x: usize, y: usize) -> usize {
    y * SHAPE_DIMENSION + x
}

impl Shape {
    /// Build a shape from a raw frame.
    ///
    /// Returns `None` if more than one cell carries the pivot marker.
    pub fn from_cells(kind: ShapeKind, cells: [u8; SHAPE_CELLS], rotatable: bool) -> Option<Self> {
        let pivots = cells.iter().filter(|&&c| c >= PIVOT_MARK).count();
        if pivots > 1 {
            return None;
        }
        Some(Self {
            kind,
            cells,
            rotatable,
        })
    }

    /// Catalog shape for a kind, in its spawn orientation.
    pub fn of(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::T => CATALOG[0],
            ShapeKind::S => CATALOG[1],
            ShapeKind::Z => CATALOG[2],
            ShapeKind::O => CATALOG[3],
            ShapeKind::L => CATALOG[4],
            ShapeKind::J => CATALOG[5],
            ShapeKind::I => CATALOG[6],
        }
    }

    /// The full catalog, one shape per kind.
    pub fn catalog() -> &'static [Shape; 7] {
        &CATALOG
    }

    /// Pick a catalog shape uniformly at random.
    pub fn pick(rng: &mut SimpleRng) -> Self {
        CATALOG[rng.next_range(CATALOG.len() as u32) as usize]
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn cells(&self) -> &[u8; SHAPE_CELLS] {
        &self.cells
    }

    pub fn is_rotatable(&self) -> bool {
        self.rotatable
    }

    /// Local (x, y) of the pivot cell, or [`DEFAULT_PIVOT`].
    pub fn pivot(&self) -> (usize, usize) {
        self.cells
            .iter()
            .position(|&c| c >= PIVOT_MARK)
            .map(index_to_coords)
            .unwrap_or(DEFAULT_PIVOT)
    }

    /// Rotate by 90°. Non-rotatable shapes come back unchanged.
    ///
    /// The rotated cell at (x, y) is the original cell at (y, N - 1 - x).
    pub fn rotate(&self) -> Self {
        if !self.rotatable {
            return *self;
        }

        let mut cells = [0u8; SHAPE_CELLS];
        for (i, cell) in cells.iter_mut().enumerate() {
            let (x, y) = index_to_coords(i);
            *cell = self.cells[coords_to_index(y, SHAPE_DIMENSION - 1 - x)];
        }

        Self { cells, ..*self }
    }

    /// Visit every filled cell in row-major order with its offset from the
    /// pivot and its raw value.
    pub fn for_each_filled_block(&self, mut f: impl FnMut(BlockOffset, u8)) {
        for (offset, value) in self.blocks() {
            f(offset, value);
        }
    }

    /// Filled cells as (offset from pivot, raw value), row-major.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockOffset, u8)> + '_ {
        let (px, py) = self.pivot();
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0)
            .map(move |(i, &value)| {
                let (x, y) = index_to_coords(i);
                ((x as i32 - px as i32, y as i32 - py as i32), value)
            })
    }
}
