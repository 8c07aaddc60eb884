//! Row compaction tests on a standard 10 x 20 bucket

use bucket_grid::core::types::{CellCategory, CellId, Point3};
use bucket_grid::core::{BucketShape, Grid, TallyScorer};

const BOTTOM: i32 = 19;

fn bucket() -> Grid {
    Grid::new(BucketShape::Classic {
        width: 10,
        height: 20,
    })
    .unwrap()
}

fn retired_rows_above(grid: &Grid, row: i32) -> usize {
    (0..row)
        .flat_map(|y| (1..=10).map(move |x| Point3::flat(x, y)))
        .filter(|&p| grid.category_at(p) == Some(CellCategory::RetiredPiece))
        .count()
}

#[test]
fn test_row_missing_one_column_does_not_compress() {
    let mut grid = bucket();
    let r = grid.registry_mut().mint(CellCategory::RetiredPiece);
    for x in 1..=9 {
        grid.set(x, BOTTOM, r);
    }

    assert!(!grid.can_compress());

    let mut scorer = TallyScorer::default();
    assert!(!grid.drop_bottommost_full_row(&mut scorer));
    assert_eq!(scorer.clear_events, 0);
    assert!((1..=9).all(|x| grid.get(x, BOTTOM) == Some(r)));
}

#[test]
fn test_filling_last_column_clears_homogeneous_row() {
    let mut grid = bucket();
    let r = grid.registry_mut().mint(CellCategory::RetiredPiece);
    for x in 1..=10 {
        grid.set(x, BOTTOM, r);
    }

    assert!(grid.can_compress());
    let mut scorer = TallyScorer::default();
    assert!(grid.drop_bottommost_full_row(&mut scorer));
    assert_eq!(scorer.last_cleared, vec![19]);
    assert_eq!(scorer.rows_cleared, 1);
    assert_eq!(scorer.homogeneous_rows, 1);
    assert!((1..=10).all(|x| grid.is_empty_at(Point3::flat(x, BOTTOM))));
    assert!(!grid.can_compress());
}

#[test]
fn test_mixed_ids_are_not_homogeneous() {
    let mut grid = bucket();
    let a = grid.registry_mut().mint(CellCategory::RetiredPiece);
    let b = grid.registry_mut().mint(CellCategory::RetiredPiece);
    for x in 1..=9 {
        grid.set(x, BOTTOM, a);
    }
    grid.set(10, BOTTOM, b);

    let mut scorer = TallyScorer::default();
    assert!(grid.drop_bottommost_full_row(&mut scorer));
    assert_eq!(scorer.rows_cleared, 1);
    assert_eq!(scorer.homogeneous_rows, 0);
}

#[test]
fn test_material_above_settles_without_leaving_residue() {
    let mut grid = bucket();
    let r = grid.registry_mut().mint(CellCategory::RetiredPiece);
    let top = grid.registry_mut().mint(CellCategory::RetiredPiece);
    for x in 1..=10 {
        grid.set(x, BOTTOM, r);
    }
    // A small tower resting on the full row.
    grid.set(3, 18, top);
    grid.set(3, 17, top);
    grid.set(7, 18, top);

    let mut scorer = TallyScorer::default();
    assert!(grid.drop_bottommost_full_row(&mut scorer));

    assert_eq!(grid.get(3, 19), Some(top));
    assert_eq!(grid.get(3, 18), Some(top));
    assert_eq!(grid.get(7, 19), Some(top));
    assert_eq!(grid.get(3, 17), Some(CellId::EMPTY));
    assert_eq!(retired_rows_above(&grid, 18), 0);
    assert_eq!(grid.stack_height(), 2);
}

#[test]
fn test_block_layer_moves_with_content() {
    let mut grid = bucket();
    let r = grid.registry_mut().mint(CellCategory::RetiredPiece);
    let block = grid.registry_mut().mint_block();
    for x in 1..=10 {
        grid.set(x, BOTTOM, r);
    }
    grid.set(5, 18, r);
    grid.set_block_at(Point3::flat(5, 18), block);

    let mut scorer = TallyScorer::default();
    grid.drop_bottommost_full_row(&mut scorer);

    assert_eq!(grid.block_at(Point3::flat(5, 19)), Some(block));
    assert_eq!(grid.block_at(Point3::flat(5, 18)), Some(CellId::EMPTY));
}

#[test]
fn test_hazards_restored_only_into_empty_cells() {
    let mut grid = bucket();
    let r = grid.registry_mut().mint(CellCategory::RetiredPiece);
    let action = CellId::of(CellCategory::HazardAction);
    let danger = CellId::of(CellCategory::HazardDanger);
    for x in 1..=10 {
        grid.set(x, BOTTOM, r);
    }
    // Column 2: a retired block above a hazard, so it falls into the slot.
    grid.set(2, 17, r);
    grid.set(2, 18, danger);
    // Column 6: a hazard with nothing above it.
    grid.set(6, 18, action);

    let mut scorer = TallyScorer::default();
    assert!(grid.drop_bottommost_full_row(&mut scorer));

    assert_eq!(grid.get(2, 18), Some(r));
    assert_eq!(grid.get(6, 18), Some(action));
    let hazards = (0..20)
        .flat_map(|y| (1..=10).map(move |x| (x, y)))
        .filter(|&(x, y)| {
            grid.category_at(Point3::flat(x, y))
                .map_or(false, |c| c.is_hazard())
        })
        .count();
    assert_eq!(hazards, 1);
}

#[test]
fn test_hazards_do_not_complete_rows() {
    let mut grid = bucket();
    let r = grid.registry_mut().mint(CellCategory::RetiredPiece);
    for x in 1..=9 {
        grid.set(x, BOTTOM, r);
    }
    grid.set(10, BOTTOM, CellId::of(CellCategory::HazardDanger));
    assert!(!grid.can_compress());
}

#[test]
fn test_four_row_cascade() {
    let mut grid = bucket();
    let r = grid.registry_mut().mint(CellCategory::RetiredPiece);
    for y in 16..=19 {
        for x in 1..=10 {
            grid.set(x, y, r);
        }
    }
    grid.set(1, 15, r);

    let mut scorer = TallyScorer::default();
    assert!(grid.drop_bottommost_full_row(&mut scorer));
    assert_eq!(scorer.rows_cleared, 4);
    assert_eq!(scorer.clear_events, 1);
    assert_eq!(grid.get(1, 19), Some(r));
    assert_eq!(retired_rows_above(&grid, 19), 0);
}

#[test]
fn test_clear_row_outside_interior_keeps_floor() {
    let mut grid = bucket();
    let floor = grid.bounds().bottom + 1;
    assert_eq!(floor, 20);

    assert!(!grid.clear_row(floor));
    assert!(!grid.clear_row(floor + 5));
    for x in 0..12 {
        assert_eq!(
            grid.category_at(Point3::flat(x, floor as i32)),
            Some(CellCategory::BucketWall)
        );
    }
}

#[test]
fn test_fully_cleared_pieces_drop_their_ids() {
    let mut grid = bucket();
    let a = grid.registry_mut().mint(CellCategory::RetiredPiece);
    let b = grid.registry_mut().mint(CellCategory::RetiredPiece);
    let survivor = grid.registry_mut().mint(CellCategory::RetiredPiece);
    for x in 1..=9 {
        grid.set(x, BOTTOM, a);
    }
    grid.set(10, BOTTOM, b);
    grid.set(3, 18, survivor);
    grid.set(4, 17, survivor);
    assert_eq!(grid.registry().dynamic_count(), 3);

    let mut scorer = TallyScorer::default();
    assert!(grid.drop_bottommost_full_row(&mut scorer));

    assert_eq!(grid.registry().dynamic_count(), 1);
    assert!(!grid.registry().is_bound(a));
    assert!(!grid.registry().is_bound(b));
    assert_eq!(grid.get(3, 19), Some(survivor));
    assert_eq!(
        grid.registry().classify(survivor),
        CellCategory::RetiredPiece
    );
}
