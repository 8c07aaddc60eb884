//! Headless autoplay demo (default binary).
//!
//! Builds a bucket from the `BUCKET_GRID_*` environment, lets the placement
//! planner drop a fixed cycle of footprints into it, and prints the board plus
//! running totals. Usage: `bucket-grid [pieces]` (default 40).

use anyhow::{Context, Result};

use bucket_grid::core::types::{CellCategory, Point3};
use bucket_grid::core::{Grid, GridConfig, GridSnapshot, TallyScorer};
use bucket_grid::engine::{PlaceError, PlacementPlanner};

const fn p(x: i32, y: i32) -> Point3 {
    Point3::flat(x, y)
}

// Demo footprints only; real piece definitions live with the game.
const BAR: [[Point3; 4]; 2] = [
    [p(0, 0), p(1, 0), p(2, 0), p(3, 0)],
    [p(0, 0), p(0, 1), p(0, 2), p(0, 3)],
];
const SQUARE: [[Point3; 4]; 1] = [[p(0, 0), p(1, 0), p(0, 1), p(1, 1)]];
const TEE: [[Point3; 4]; 4] = [
    [p(0, 0), p(1, 0), p(2, 0), p(1, 1)],
    [p(1, 0), p(0, 1), p(1, 1), p(1, 2)],
    [p(1, 0), p(0, 1), p(1, 1), p(2, 1)],
    [p(0, 0), p(0, 1), p(1, 1), p(0, 2)],
];
const ELL: [[Point3; 4]; 4] = [
    [p(0, 0), p(0, 1), p(0, 2), p(1, 2)],
    [p(0, 0), p(1, 0), p(2, 0), p(0, 1)],
    [p(0, 0), p(1, 0), p(1, 1), p(1, 2)],
    [p(2, 0), p(0, 1), p(1, 1), p(2, 1)],
];

fn rotations(turn: usize) -> Vec<&'static [Point3]> {
    match turn % 4 {
        0 => BAR.iter().map(|r| r.as_slice()).collect(),
        1 => SQUARE.iter().map(|r| r.as_slice()).collect(),
        2 => TEE.iter().map(|r| r.as_slice()).collect(),
        _ => ELL.iter().map(|r| r.as_slice()).collect(),
    }
}

fn glyph(category: CellCategory) -> char {
    match category {
        CellCategory::Empty => '.',
        CellCategory::BucketWall => '#',
        CellCategory::InvisibleBucketWall | CellCategory::BucketExterior => ' ',
        CellCategory::ActivePiece => '@',
        CellCategory::RetiredPiece => 'o',
        CellCategory::HazardAction => '!',
        CellCategory::HazardDanger => 'x',
        CellCategory::UnreachableMarker => '?',
    }
}

fn render(snapshot: &GridSnapshot) -> String {
    let mut out = String::with_capacity((snapshot.width() + 1) * snapshot.height());
    for y in 0..snapshot.height() {
        out.extend(snapshot.row_categories(y, 0).iter().map(|&c| glyph(c)));
        out.push('\n');
    }
    out
}

fn main() -> Result<()> {
    let pieces: usize = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("piece count must be a number, got {:?}", arg))?,
        None => 40,
    };

    let config = GridConfig::from_env();
    let mut grid = Grid::from_geometry(config.bucket_shape(), config.depth)
        .context("failed to build bucket")?;
    let planner = PlacementPlanner::from_config(&config);
    let mut scorer = TallyScorer::default();

    println!(
        "[Demo] {:?} bucket {}x{} (grid {}x{}x{})",
        config.shape,
        grid.bounds().interior_width,
        grid.bounds().interior_height,
        grid.width(),
        grid.height(),
        grid.depth()
    );

    for turn in 0..pieces {
        match planner.place_best(&mut grid, &rotations(turn), &mut scorer) {
            Ok(placed) => {
                if placed.cleared {
                    println!(
                        "[Demo] piece {} cleared rows {:?}",
                        turn, scorer.last_cleared
                    );
                }
            }
            Err(PlaceError::NoCandidate) => {
                println!("[Demo] bucket topped out after {} pieces", turn);
                break;
            }
            Err(e) => return Err(e).context("placement failed"),
        }
    }

    let report = planner.analyzer().analyze(&grid, &[]);
    grid.mark_unreachable(&report);
    print!("{}", render(&grid.merge_with_in_play(None)));
    grid.clear_unreachable_markers();

    println!(
        "[Demo] placed={} rows={} homogeneous={} gaps={} unreachable={} reachable={}",
        scorer.pieces_placed,
        scorer.rows_cleared,
        scorer.homogeneous_rows,
        report.groups.len(),
        report.unreachable,
        report.reachable
    );
    Ok(())
}
