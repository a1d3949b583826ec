//! Figure module - the active falling piece
//!
//! A figure is a shape plus the grid position of its pivot. Every movement is
//! tentative: it is validated against a caller-supplied occupancy predicate and
//! only committed when nothing collides. The figure knows nothing about the
//! grid itself; `Grid::collides_at` is the usual predicate.

use crate::shape::Shape;
use crate::types::SPAWN_Y;

/// Offsets tried, in order, when a rotation collides in place.
pub const KICK_OFFSETS: [(i32, i32); 4] = [(0, 0), (-1, 0), (1, 0), (0, -1)];

/// Result of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallOutcome {
    /// The figure moved down one row.
    Falling,
    /// Something is directly below; the figure did not move.
    Landed,
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Figure {
    pub x: i32,
    pub y: i32,
    shape: Shape,
}

impl Figure {
    /// Pivot position new figures appear at on a grid `width` cells wide.
    pub fn spawn_position(width: usize) -> (i32, i32) {
        ((width / 2) as i32, SPAWN_Y)
    }

    /// Create a figure at the spawn position of a grid `width` cells wide.
    pub fn spawn(shape: Shape, width: usize) -> Self {
        let (x, y) = Self::spawn_position(width);
        Self::at(shape, x, y)
    }

    pub fn at(shape: Shape, x: i32, y: i32) -> Self {
        Self { x, y, shape }
    }

    /// Replace the shape and move the pivot to `spawn`.
    pub fn reset(&mut self, shape: Shape, (x, y): (i32, i32)) {
        *self = Self::at(shape, x, y);
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// True iff any filled block of `shape` with its pivot at (x, y) satisfies
    /// `collides_at`.
    pub fn collides(
        shape: &Shape,
        x: i32,
        y: i32,
        collides_at: impl Fn(i32, i32) -> bool,
    ) -> bool {
        shape
            .blocks()
            .any(|((dx, dy), value)| value != 0 && collides_at(x + dx, y + dy))
    }

    /// Check the figure where it currently stands.
    pub fn is_colliding(&self, collides_at: impl Fn(i32, i32) -> bool) -> bool {
        Self::collides(&self.shape, self.x, self.y, collides_at)
    }

    /// Shift by (dx, dy) unless the shifted figure collides. Returns whether
    /// the move was committed.
    pub fn attempt_move(
        &mut self,
        dx: i32,
        dy: i32,
        collides_at: impl Fn(i32, i32) -> bool,
    ) -> bool {
        let (x, y) = (self.x + dx, self.y + dy);
        if Self::collides(&self.shape, x, y, collides_at) {
            return false;
        }
        self.x = x;
        self.y = y;
        true
    }

    /// Rotate with the simplified wall kick: in place, then one cell left,
    /// one right, one up. The first clear configuration wins.
    pub fn attempt_rotate(&mut self, collides_at: impl Fn(i32, i32) -> bool) -> bool {
        let rotated = self.shape.rotate();

        for &(dx, dy) in KICK_OFFSETS.iter() {
            let (x, y) = (self.x + dx, self.y + dy);
            if !Self::collides(&rotated, x, y, &collides_at) {
                self.shape = rotated;
                self.x = x;
                self.y = y;
                return true;
            }
        }

        false
    }

    /// Move down one row, or report that the figure has landed.
    pub fn attempt_fall(&mut self, collides_at: impl Fn(i32, i32) -> bool) -> FallOutcome {
        if self.attempt_move(0, 1, collides_at) {
            FallOutcome::Falling
        } else {
            FallOutcome::Landed
        }
    }

    /// Absolute (x, y, raw value) of every filled block.
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        self.shape
            .blocks()
            .map(move |((dx, dy), value)| (self.x + dx, self.y + dy, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::types::ShapeKind;

    #[test]
    fn test_figure_spawns_above_field_center() {
        let figure = Figure::spawn(Shape::of(ShapeKind::T), 8);
        assert_eq!((figure.x, figure.y), (4, SPAWN_Y));
        assert_eq!(Figure::spawn_position(11), (5, SPAWN_Y));
    }

    #[test]
    fn test_reset_replaces_shape_and_position() {
        let mut figure = Figure::at(Shape::of(ShapeKind::O), 1, 9);
        figure.reset(Shape::of(ShapeKind::S), Figure::spawn_position(8));
        assert_eq!(figure, Figure::spawn(Shape::of(ShapeKind::S), 8));
    }

    #[test]
    fn test_attempt_move_commits_when_clear() {
        let grid = Grid::new(8, 18);
        let mut figure = Figure::at(Shape::of(ShapeKind::O), 3, 5);

        assert!(figure.attempt_move(1, 0, |x, y| grid.collides_at(x, y)));
        assert_eq!((figure.x, figure.y), (4, 5));
        assert!(figure.attempt_move(0, 1, |x, y| grid.collides_at(x, y)));
        assert_eq!((figure.x, figure.y), (4, 6));
    }

    #[test]
    fn test_attempt_move_rejected_by_terrain() {
        let mut grid = Grid::new(8, 18);
        grid.set(5, 5, 1);
        let mut figure = Figure::at(Shape::of(ShapeKind::O), 3, 5);

        // O covers (x..=x+1, y..=y+1); moving right would cover (5, 5).
        assert!(!figure.attempt_move(1, 0, |x, y| grid.collides_at(x, y)));
        assert_eq!((figure.x, figure.y), (3, 5));
    }

    #[test]
    fn test_attempt_rotate_kicks_off_the_left_wall() {
        let grid = Grid::new(8, 18);
        // Vertical I in column 1: lying flat it spans pivot-2..=pivot+1, so it
        // fits neither in place nor one cell left.
        let mut figure = Figure::at(Shape::of(ShapeKind::I), 1, 5);

        assert!(figure.attempt_rotate(|x, y| grid.collides_at(x, y)));
        assert_eq!((figure.x, figure.y), (2, 5));
        assert!(!figure.is_colliding(|x, y| grid.collides_at(x, y)));
        let columns: Vec<_> = figure.blocks().map(|(x, _, _)| x).collect();
        assert_eq!(columns, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_attempt_rotate_kicks_off_the_right_wall() {
        let grid = Grid::new(8, 18);
        // Lying flat at x=7 the bar reaches column 8; one cell left fits.
        let mut figure = Figure::at(Shape::of(ShapeKind::I), 7, 5);

        assert!(figure.attempt_rotate(|x, y| grid.collides_at(x, y)));
        assert_eq!((figure.x, figure.y), (6, 5));
        let columns: Vec<_> = figure.blocks().map(|(x, _, _)| x).collect();
        assert_eq!(columns, vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_attempt_rotate_falls_back_to_kicking_up() {
        let mut figure = Figure::at(Shape::of(ShapeKind::T), 4, 5);
        let rotated = figure.shape().rotate();

        // Only the rotated shape one row up is open.
        let open: Vec<(i32, i32)> = Figure::at(rotated, 4, 4)
            .blocks()
            .map(|(x, y, _)| (x, y))
            .collect();
        let solid = |x: i32, y: i32| !open.contains(&(x, y));

        assert!(figure.attempt_rotate(solid));
        assert_eq!((figure.x, figure.y), (4, 4));
        assert_eq!(*figure.shape(), rotated);
    }

    #[test]
    fn test_attempt_rotate_tries_left_before_right() {
        let mut figure = Figure::at(Shape::of(ShapeKind::T), 4, 5);
        let rotated = figure.shape().rotate();

        // Both side kicks fit; in place and up do not.
        let mut open: Vec<(i32, i32)> = Vec::new();
        for x in [3, 5] {
            open.extend(Figure::at(rotated, x, 5).blocks().map(|(bx, by, _)| (bx, by)));
        }
        let solid = |x: i32, y: i32| !open.contains(&(x, y));
        assert!(Figure::collides(&rotated, 4, 5, solid));

        assert!(figure.attempt_rotate(solid));
        assert_eq!((figure.x, figure.y), (3, 5));
    }

    #[test]
    fn test_attempt_rotate_prefers_in_place() {
        let grid = Grid::new(8, 18);
        let mut figure = Figure::at(Shape::of(ShapeKind::T), 4, 5);

        assert!(figure.attempt_rotate(|x, y| grid.collides_at(x, y)));
        assert_eq!((figure.x, figure.y), (4, 5));
        assert_eq!(*figure.shape(), Shape::of(ShapeKind::T).rotate());
    }

    #[test]
    fn test_attempt_rotate_rejected_when_every_kick_collides() {
        let figure_shape = Shape::of(ShapeKind::T);
        let mut figure = Figure::at(figure_shape, 4, 5);

        // Everything except the figure's current cells is solid.
        let current: Vec<(i32, i32)> = figure.blocks().map(|(x, y, _)| (x, y)).collect();
        let solid = |x: i32, y: i32| !current.contains(&(x, y));

        assert!(!figure.attempt_rotate(solid));
        assert_eq!((figure.x, figure.y), (4, 5));
        assert_eq!(*figure.shape(), figure_shape);
    }

    #[test]
    fn test_attempt_fall_lands_on_floor() {
        let grid = Grid::new(8, 18);
        // O blocks occupy rows y and y+1; y=16 rests on the floor.
        let mut figure = Figure::at(Shape::of(ShapeKind::O), 2, 15);

        let collides_at = |x, y| grid.collides_at(x, y);
        assert_eq!(figure.attempt_fall(collides_at), FallOutcome::Falling);
        assert_eq!(figure.y, 16);
        assert_eq!(figure.attempt_fall(collides_at), FallOutcome::Landed);
        assert_eq!(figure.y, 16);
    }

    #[test]
    fn test_blocks_are_absolute() {
        let figure = Figure::at(Shape::of(ShapeKind::O), 2, 3);
        let blocks: Vec<_> = figure.blocks().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(blocks, vec![(2, 3), (3, 3), (2, 4), (3, 4)]);
    }
}
