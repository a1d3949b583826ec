//! Shape catalog and rotation tests.

use blockdrop::core::{Shape, SimpleRng};
use blockdrop::types::{ShapeKind, SHAPE_CELLS};

#[test]
fn test_catalog_has_one_shape_per_kind() {
    let kinds: Vec<_> = Shape::catalog().iter().map(|s| s.kind()).collect();
    for kind in ShapeKind::ALL {
        assert_eq!(kinds.iter().filter(|&&k| k == kind).count(), 1);
    }
}

#[test]
fn test_every_shape_has_four_blocks() {
    for shape in Shape::catalog() {
        assert_eq!(shape.blocks().count(), 4, "{:?}", shape.kind());
    }
}

#[test]
fn test_four_rotations_are_identity() {
    for shape in Shape::catalog().iter().filter(|s| s.is_rotatable()) {
        let turned = shape.rotate().rotate().rotate().rotate();
        assert_eq!(turned, *shape, "{:?}", shape.kind());
    }
}

#[test]
fn test_single_rotation_changes_rotatable_shapes() {
    for shape in Shape::catalog().iter().filter(|s| s.is_rotatable()) {
        assert_ne!(shape.rotate(), *shape, "{:?}", shape.kind());
    }
}

#[test]
fn test_square_does_not_rotate() {
    let square = Shape::of(ShapeKind::O);
    assert!(!square.is_rotatable());
    assert_eq!(square.rotate(), square);
}

#[test]
fn test_rotation_keeps_block_count_and_pivot_mark() {
    for shape in Shape::catalog() {
        let rotated = shape.rotate();
        assert_eq!(rotated.blocks().count(), 4);
        let marks = |s: &Shape| s.cells().iter().filter(|&&c| c == 2).count();
        assert_eq!(marks(&rotated), marks(shape));
    }
}

#[test]
fn test_from_cells_rejects_two_pivots() {
    let mut cells = [0u8; SHAPE_CELLS];
    cells[1] = 2;
    cells[5] = 2;
    assert!(Shape::from_cells(ShapeKind::T, cells, true).is_none());

    cells[5] = 1;
    let shape = Shape::from_cells(ShapeKind::T, cells, true).unwrap();
    assert_eq!(shape.pivot(), (1, 0));
}

#[test]
fn test_shape_without_pivot_anchors_at_default() {
    let mut cells = [0u8; SHAPE_CELLS];
    cells[0] = 1;
    let shape = Shape::from_cells(ShapeKind::O, cells, false).unwrap();
    assert_eq!(shape.pivot(), (1, 1));
    assert_eq!(shape.blocks().next(), Some(((-1, -1), 1)));
}

#[test]
fn test_pick_covers_every_kind() {
    let mut rng = SimpleRng::new(2024);
    let mut seen = [false; 8];
    for _ in 0..200 {
        seen[Shape::pick(&mut rng).kind().code() as usize] = true;
    }
    assert!(ShapeKind::ALL.iter().all(|k| seen[k.code() as usize]));
}
