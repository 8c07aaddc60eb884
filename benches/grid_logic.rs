use bucket_grid::core::types::{CellCategory, Point3};
use bucket_grid::core::{BucketShape, Grid, NullScorer, ReachabilityAnalyzer};
use bucket_grid::engine::PlacementPlanner;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const TEE: [Point3; 4] = [
    Point3::flat(0, 0),
    Point3::flat(1, 0),
    Point3::flat(2, 0),
    Point3::flat(1, 1),
];
const TEE_R: [Point3; 4] = [
    Point3::flat(0, 0),
    Point3::flat(0, 1),
    Point3::flat(1, 1),
    Point3::flat(0, 2),
];

fn ragged() -> Grid {
    let mut grid = Grid::new(BucketShape::Classic {
        width: 10,
        height: 20,
    })
    .unwrap();
    let r = grid.registry_mut().mint(CellCategory::RetiredPiece);
    for y in 10..20 {
        for x in 1..=10 {
            if (x * 7 + y * 3) % 5 != 0 {
                grid.set(x, y, r);
            }
        }
    }
    grid
}

fn bench_reachability(c: &mut Criterion) {
    let grid = ragged();
    let analyzer = ReachabilityAnalyzer::default();
    let probe = [Point3::flat(4, 9), Point3::flat(5, 9), Point3::flat(6, 9)];

    c.bench_function("reach_count_what_if", |b| {
        b.iter(|| analyzer.count(black_box(&grid), black_box(&probe)))
    });
}

fn bench_best_placement(c: &mut Criterion) {
    let grid = ragged();
    let planner = PlacementPlanner::default();

    c.bench_function("best_placement_tee", |b| {
        b.iter(|| planner.best(black_box(&grid), &[&TEE, &TEE_R]))
    });
}

fn bench_clear_4_rows(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::new(BucketShape::Classic {
                width: 10,
                height: 20,
            })
            .unwrap();
            let r = grid.registry_mut().mint(CellCategory::RetiredPiece);
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 1..=10 {
                    grid.set(x, y, r);
                }
            }
            grid.drop_bottommost_full_row(&mut NullScorer)
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut grid = Grid::new(BucketShape::Rotating { size: 20 }).unwrap();

    c.bench_function("rotate_cw_22x22", |b| {
        b.iter(|| grid.rotate(black_box(true)))
    });
}

criterion_group!(
    benches,
    bench_reachability,
    bench_best_placement,
    bench_clear_4_rows,
    bench_rotate
);
criterion_main!(benches);
