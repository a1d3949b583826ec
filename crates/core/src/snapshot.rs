use arrayvec::ArrayVec;

use crate::game::Game;
use crate::types::{Mode, ShapeKind, SHAPE_CELLS};

/// One block of the falling figure, in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockSnapshot {
    pub x: i32,
    pub y: i32,
}

/// Everything a renderer needs for one frame.
///
/// Reuse one snapshot across frames with [`Game::snapshot_into`]; the grid
/// buffer keeps its allocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major grid cells (0 = empty, otherwise a shape kind code).
    pub grid: Vec<u8>,
    pub figure: ArrayVec<BlockSnapshot, SHAPE_CELLS>,
    pub figure_kind: Option<ShapeKind>,
    pub score: u64,
    pub mode: Mode,
    pub fast_fall: bool,
}

impl GameSnapshot {
    /// Grid value at (x, y); 0 outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.grid[y as usize * self.width + x as usize]
    }

    /// Stable hash of the visible state, for skipping redundant redraws.
    pub fn fingerprint(&self) -> u64 {
        use std::hash::{Hash, Hasher};

        let mut h = std::collections::hash_map::DefaultHasher::new();
        self.grid.hash(&mut h);
        self.figure.as_slice().hash(&mut h);
        self.figure_kind.hash(&mut h);
        self.score.hash(&mut h);
        self.mode.hash(&mut h);
        self.fast_fall.hash(&mut h);
        h.finish()
    }
}

impl Game {
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let grid = self.grid();
        out.width = grid.width();
        out.height = grid.height();
        out.grid.clear();
        out.grid.extend_from_slice(grid.cells());

        out.figure.clear();
        out.figure_kind = None;
        if self.mode() != Mode::Begin {
            let figure = self.figure();
            for (x, y, _) in figure.blocks() {
                out.figure.push(BlockSnapshot { x, y });
            }
            out.figure_kind = Some(figure.shape().kind());
        }

        out.score = self.score();
        out.mode = self.mode();
        out.fast_fall = self.fast_fall();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
