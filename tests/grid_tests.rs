//! Grid store tests - bounds handling, piece table, snapshots, reset

use bucket_grid::core::types::{CellCategory, CellId, Point3};
use bucket_grid::core::{BucketShape, Grid, GridError, Piece, StaticPiece, TallyScorer};

fn classic() -> Grid {
    Grid::new(BucketShape::Classic {
        width: 10,
        height: 20,
    })
    .unwrap()
}

#[test]
fn test_new_bucket_structure() {
    let grid = classic();
    assert_eq!(grid.width(), 12);
    assert_eq!(grid.height(), 21);

    let b = grid.bounds();
    assert_eq!((b.interior_left, b.interior_right), (1, 10));
    assert_eq!((b.top, b.bottom), (0, 19));

    for y in 0..20 {
        assert_eq!(grid.category_at(Point3::flat(0, y)), Some(CellCategory::BucketWall));
        assert_eq!(grid.category_at(Point3::flat(11, y)), Some(CellCategory::BucketWall));
        for x in 1..=10 {
            assert!(grid.is_empty_at(Point3::flat(x, y)), "({}, {}) should be empty", x, y);
        }
    }
    for x in 0..12 {
        assert_eq!(grid.category_at(Point3::flat(x, 20)), Some(CellCategory::BucketWall));
    }
}

#[test]
fn test_get_out_of_bounds() {
    let grid = classic();
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(12, 0), None);
    assert_eq!(grid.get(0, 21), None);
    assert_eq!(grid.get_at(Point3::new(1, 1, 1)), None);
}

#[test]
fn test_set_out_of_bounds_is_noop() {
    let mut grid = classic();
    let before = grid.merge_with_in_play(None);
    let wall = CellId::of(CellCategory::BucketWall);

    assert!(!grid.set(-1, 0, wall));
    assert!(!grid.set(0, 21, wall));
    assert!(!grid.set_block_at(Point3::flat(99, 0), wall));
    assert_eq!(grid.merge_with_in_play(None), before);
}

#[test]
fn test_is_empty_fails_closed() {
    let grid = classic();
    assert!(!grid.is_empty_at(Point3::flat(-1, 5)));
    assert!(!grid.is_empty_at(Point3::flat(5, 21)));
    assert!(!grid.is_empty_at(Point3::flat(0, 5)));
    assert!(grid.is_empty_at(Point3::flat(5, 5)));
}

#[test]
fn test_move_item_carries_both_layers() {
    let mut grid = classic();
    let piece = grid.registry_mut().mint(CellCategory::RetiredPiece);
    let block = grid.registry_mut().mint_block();
    grid.set(3, 4, piece);
    grid.set_block_at(Point3::flat(3, 4), block);

    let filler = CellId::of(CellCategory::HazardAction);
    assert!(grid.move_item(Point3::flat(3, 4), Point3::flat(3, 7), filler));

    assert_eq!(grid.get(3, 7), Some(piece));
    assert_eq!(grid.block_at(Point3::flat(3, 7)), Some(block));
    assert_eq!(grid.get(3, 4), Some(filler));
    assert_eq!(grid.block_at(Point3::flat(3, 4)), Some(CellId::EMPTY));

    assert!(!grid.move_item(Point3::flat(3, 7), Point3::flat(3, 40), CellId::EMPTY));
    assert_eq!(grid.get(3, 7), Some(piece));
}

#[test]
fn test_merge_with_in_play_overlays_without_mutating() {
    let mut grid = classic();
    let offsets = [Point3::flat(0, 0), Point3::flat(1, 0), Point3::flat(0, 1)];
    let piece = StaticPiece::mint(grid.registry_mut(), Point3::flat(4, 2), &offsets);
    let other = StaticPiece::mint(grid.registry_mut(), Point3::flat(8, 2), &offsets);
    grid.track_piece(&piece);
    grid.track_piece(&other);

    // Tracking alone writes nothing into the committed layer.
    assert_eq!(grid.get(4, 2), Some(CellId::EMPTY));
    assert!(grid.is_empty_at(Point3::flat(8, 2)));

    let before: Vec<_> = (0..21)
        .flat_map(|y| (0..12).map(move |x| (x, y)))
        .map(|(x, y)| grid.get(x, y))
        .collect();

    let snapshot = grid.merge_with_in_play(None);
    assert_eq!(snapshot.get(4, 2), Some(piece.id()));
    assert_eq!(snapshot.get(8, 3), Some(other.id()));
    assert_eq!(
        snapshot.category_at(Point3::flat(5, 2)),
        Some(CellCategory::ActivePiece)
    );

    let excluded = grid.merge_with_in_play(Some(piece.id()));
    assert_eq!(excluded.get(4, 2), Some(CellId::EMPTY));
    assert_eq!(excluded.get(8, 2), Some(other.id()));

    let after: Vec<_> = (0..21)
        .flat_map(|y| (0..12).map(move |x| (x, y)))
        .map(|(x, y)| grid.get(x, y))
        .collect();
    assert_eq!(before, after);
    assert_eq!(grid.piece_at(Point3::flat(5, 2)), Some(piece.id()));
}

#[test]
fn test_track_refreshes_footprint() {
    let mut grid = classic();
    let mut piece = StaticPiece::mint(grid.registry_mut(), Point3::flat(4, 0), &[Point3::ORIGIN]);
    grid.track_piece(&piece);
    piece.translate(Point3::flat(0, 3));
    grid.track_piece(&piece);

    assert_eq!(grid.in_play_count(), 1);
    assert_eq!(grid.piece_at(Point3::flat(4, 0)), None);
    assert_eq!(grid.piece_at(Point3::flat(4, 3)), Some(piece.id()));

    assert!(grid.untrack_piece(piece.id()));
    assert!(!grid.untrack_piece(piece.id()));
    assert_eq!(grid.registry().classify(piece.id()), CellCategory::RetiredPiece);
}

#[test]
fn test_merge_piece_reports_points() {
    let mut grid = classic();
    let offsets = [Point3::flat(0, 0), Point3::flat(1, 0)];
    let piece = StaticPiece::mint(grid.registry_mut(), Point3::flat(5, 19), &offsets);
    grid.track_piece(&piece);

    let mut scorer = TallyScorer::default();
    assert!(grid.merge_piece_into_grid(&piece, &mut scorer));
    assert_eq!(scorer.pieces_placed, 1);
    assert_eq!(scorer.cells_placed, 2);
    assert_eq!(grid.in_play_count(), 0);
}

#[test]
fn test_merge_piece_never_overwrites_walls() {
    let mut grid = classic();
    let wall = CellId::of(CellCategory::BucketWall);
    let offsets = [Point3::flat(0, 0), Point3::flat(1, 0)];

    // (11, 19) is the right wall: the piece keeps only its interior cell.
    let piece = StaticPiece::mint(grid.registry_mut(), Point3::flat(10, 19), &offsets);
    let mut scorer = TallyScorer::default();
    assert!(!grid.merge_piece_into_grid(&piece, &mut scorer));
    assert_eq!(grid.get(10, 19), Some(piece.id()));
    assert_eq!(grid.get(11, 19), Some(wall));
    assert_eq!(scorer.cells_placed, 1);

    // Entirely outside: wall and off-grid cells.
    let far = StaticPiece::mint(grid.registry_mut(), Point3::flat(11, 19), &offsets);
    assert!(!grid.merge_piece_into_grid(&far, &mut scorer));
    assert_eq!(grid.get(11, 19), Some(wall));
    assert_eq!(scorer.cells_placed, 1);
    assert_eq!(scorer.pieces_placed, 2);
}

#[test]
fn test_reset_restores_empty_bucket() {
    let mut grid = classic();
    let r = grid.registry_mut().mint(CellCategory::RetiredPiece);
    grid.set(5, 19, r);
    let piece = StaticPiece::mint(grid.registry_mut(), Point3::flat(4, 0), &[Point3::ORIGIN]);
    grid.track_piece(&piece);

    grid.reset(None, None).unwrap();
    assert_eq!(grid.get(5, 19), Some(CellId::EMPTY));
    assert_eq!(grid.in_play_count(), 0);
    assert_eq!(grid.stack_height(), 0);
    assert_eq!(grid.rotation(), 0);

    grid.reset(Some(6), Some(8)).unwrap();
    assert_eq!((grid.width(), grid.height()), (8, 9));
    assert_eq!(grid.bounds().interior_width, 6);

    let err = grid.reset(Some(0), None).unwrap_err();
    assert_eq!(err, GridError::InvalidBucket);
}

#[test]
fn test_depth_slices_are_independent() {
    let mut grid = Grid::from_geometry(BucketShape::Classic { width: 4, height: 4 }, 3).unwrap();
    let r = grid.registry_mut().mint(CellCategory::RetiredPiece);
    assert!(grid.set_at(Point3::new(2, 3, 2), r));
    assert_eq!(grid.get_at(Point3::new(2, 3, 2)), Some(r));
    assert_eq!(grid.get_at(Point3::new(2, 3, 0)), Some(CellId::EMPTY));
    assert_eq!(
        grid.category_at(Point3::new(0, 1, 1)),
        Some(CellCategory::BucketWall)
    );
}

#[test]
fn test_open_grid_create() {
    let grid = Grid::create(5, 3, 1, CellId::of(CellCategory::BucketExterior)).unwrap();
    assert_eq!(grid.bounds().interior_cells(), 15);
    assert!(!grid.is_empty_at(Point3::flat(2, 2)));
}
