//! Placement search for the automated player
//!
//! Every rotation of a footprint is tried at every interior column: the piece
//! enters at the top interior row and drops straight down until it rests. Each
//! landing spot is scored with a hypothetical reachability pass (the grid is
//! never touched) and the best one can be committed.

use std::panic;
use std::thread;

use arrayvec::ArrayVec;

use crate::core::{Grid, GridConfig, Piece, ReachCounts, ReachabilityAnalyzer, Scorer, StaticPiece};
use crate::entry::{widest_entry_gap, EntryGap};
use crate::types::{CellId, Point3, MAX_PIECE_CELLS};

pub type Footprint = ArrayVec<Point3, MAX_PIECE_CELLS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NoCandidate,
    OutOfBounds,
    Blocked,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NoCandidate => "no_candidate",
            PlaceError::OutOfBounds | PlaceError::Blocked => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NoCandidate => "no rotation fits anywhere in the bucket",
            PlaceError::OutOfBounds => "placement leaves the bucket interior",
            PlaceError::Blocked => "placement overlaps occupied cells",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PlaceError {}

/// One resting position of one rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub rotation: usize,
    pub origin: Point3,
    pub cells: Footprint,
}

impl Candidate {
    /// Leftmost and rightmost occupied columns
    pub fn column_span(&self) -> (usize, usize) {
        let lo = self.cells.iter().map(|p| p.x).min().unwrap_or(0);
        let hi = self.cells.iter().map(|p| p.x).max().unwrap_or(0);
        (lo.max(0) as usize, hi.max(0) as usize)
    }

    /// Offsets of the cells relative to `origin`
    pub fn offsets(&self) -> Footprint {
        self.cells.iter().map(|&p| p - self.origin).collect()
    }
}

/// Whether every cell is inside the interior and open
pub fn fits(grid: &Grid, cells: &[Point3]) -> bool {
    let b = grid.bounds();
    cells.iter().all(|p| {
        p.x >= 0 && p.y >= 0 && b.contains(p.x as usize, p.y as usize) && grid.is_open_at(*p)
    })
}

fn shifted(offsets: &[Point3], origin: Point3) -> Footprint {
    offsets.iter().map(|&o| origin + o).collect()
}

/// Drop `offsets` at column `x` from the top interior row; `None` if it can't enter
pub fn landing(grid: &Grid, rotation: usize, offsets: &[Point3], x: i32) -> Option<Candidate> {
    if offsets.is_empty() || offsets.len() > MAX_PIECE_CELLS {
        return None;
    }
    let b = grid.bounds();
    let min_dy = offsets.iter().map(|o| o.y).min().unwrap_or(0);

    let mut origin = Point3::flat(x, b.top as i32 - min_dy);
    if !fits(grid, &shifted(offsets, origin)) {
        return None;
    }
    loop {
        let below = origin + Point3::flat(0, 1);
        if !fits(grid, &shifted(offsets, below)) {
            break;
        }
        origin = below;
    }

    Some(Candidate {
        rotation,
        origin,
        cells: shifted(offsets, origin),
    })
}

/// All resting positions for every rotation
pub fn enumerate(grid: &Grid, rotations: &[&[Point3]]) -> Vec<Candidate> {
    let b = grid.bounds();
    let mut out = Vec::new();

    for (rotation, offsets) in rotations.iter().enumerate() {
        let mut min_dx = i32::MAX;
        let mut max_dx = i32::MIN;
        for o in offsets.iter() {
            min_dx = min_dx.min(o.x);
            max_dx = max_dx.max(o.x);
        }
        if min_dx > max_dx {
            continue;
        }
        let first = b.interior_left as i32 - min_dx;
        let last = b.interior_right as i32 - max_dx;
        for x in first..=last {
            if let Some(c) = landing(grid, rotation, offsets, x) {
                out.push(c);
            }
        }
    }

    out
}

/// Linear scoring weights; higher totals are better
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementWeights {
    pub unreachable_cell: i64,
    pub gap_group: i64,
    pub stack_height: i64,
    pub completed_row: i64,
    /// Applied when the piece's columns fall outside the widest entry gap.
    pub outside_entry: i64,
}

impl Default for PlacementWeights {
    fn default() -> Self {
        Self {
            unreachable_cell: -35,
            gap_group: -10,
            stack_height: -4,
            completed_row: 25,
            outside_entry: -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scored {
    pub candidate: Candidate,
    pub score: i64,
    pub counts: ReachCounts,
    pub rows_completed: usize,
}

/// Committed placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedPiece {
    pub id: CellId,
    pub cells: Footprint,
    pub cleared: bool,
}

/// Rows the candidate would complete
fn rows_completed(grid: &Grid, cells: &[Point3]) -> usize {
    let b = grid.bounds();
    let registry = grid.registry();
    let mut rows: ArrayVec<i32, MAX_PIECE_CELLS> = ArrayVec::new();
    for p in cells {
        if !rows.contains(&p.y) {
            rows.push(p.y);
        }
    }
    rows.iter()
        .filter(|&&y| {
            (b.interior_left..=b.interior_right).all(|x| {
                let p = Point3::flat(x as i32, y);
                cells.contains(&p) || grid.get_at(p).is_some_and(|id| registry.is_collapsible(id))
            })
        })
        .count()
}

/// Join scoped workers in spawn order, re-raising the first panic
fn join_workers<T>(handles: Vec<thread::ScopedJoinHandle<'_, T>>) -> Vec<T> {
    handles
        .into_iter()
        .map(|h| h.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
        .collect()
}

#[derive(Debug, Default)]
pub struct PlacementPlanner {
    analyzer: ReachabilityAnalyzer,
    weights: PlacementWeights,
}

impl PlacementPlanner {
    pub fn new(weights: PlacementWeights, pool_capacity: usize) -> Self {
        Self {
            analyzer: ReachabilityAnalyzer::new(pool_capacity),
            weights,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(PlacementWeights::default(), config.scratch_pool)
    }

    pub fn analyzer(&self) -> &ReachabilityAnalyzer {
        &self.analyzer
    }

    pub fn weights(&self) -> PlacementWeights {
        self.weights
    }

    /// Score one candidate against the committed grid
    pub fn evaluate(&self, grid: &Grid, candidate: &Candidate, gap: Option<EntryGap>) -> Scored {
        let counts = self.analyzer.count(grid, &candidate.cells);
        let rows = rows_completed(grid, &candidate.cells);
        let b = grid.bounds();
        let height = counts
            .top_blocked_row
            .map_or(0, |top| b.bottom + 1 - top) as i64;
        let (lo, hi) = candidate.column_span();
        let outside = gap.map_or(false, |g| !g.covers(lo, hi));

        let w = self.weights;
        let score = w.unreachable_cell * counts.unreachable as i64
            + w.gap_group * counts.groups as i64
            + w.stack_height * height
            + w.completed_row * rows as i64
            + if outside { w.outside_entry } else { 0 };

        Scored {
            candidate: candidate.clone(),
            score,
            counts,
            rows_completed: rows,
        }
    }

    fn best_of(
        &self,
        grid: &Grid,
        candidates: &[Candidate],
        gap: Option<EntryGap>,
    ) -> Option<Scored> {
        let mut best: Option<Scored> = None;
        for c in candidates {
            let scored = self.evaluate(grid, c, gap);
            if best.as_ref().map_or(true, |b| scored.score > b.score) {
                best = Some(scored);
            }
        }
        best
    }

    /// Highest-scoring placement; ties keep the first candidate in enumeration order
    pub fn best(&self, grid: &Grid, rotations: &[&[Point3]]) -> Option<Scored> {
        let candidates = enumerate(grid, rotations);
        self.best_of(grid, &candidates, widest_entry_gap(grid))
    }

    /// [`best`](Self::best) with candidates split across `threads` scoped workers
    ///
    /// Each worker draws its own scratch buffer from the shared pool, so the
    /// result is identical to the sequential search. A panicking worker
    /// re-raises its panic on the calling thread.
    pub fn best_parallel(
        &self,
        grid: &Grid,
        rotations: &[&[Point3]],
        threads: usize,
    ) -> Option<Scored> {
        let candidates = enumerate(grid, rotations);
        if candidates.is_empty() {
            return None;
        }
        let gap = widest_entry_gap(grid);
        let chunk = candidates.len().div_ceil(threads.max(1));

        let partials: Vec<Option<Scored>> = thread::scope(|s| {
            let handles: Vec<_> = candidates
                .chunks(chunk)
                .map(|part| s.spawn(move || self.best_of(grid, part, gap)))
                .collect();
            join_workers(handles)
        });

        let mut best: Option<Scored> = None;
        for scored in partials.into_iter().flatten() {
            if best.as_ref().map_or(true, |b| scored.score > b.score) {
                best = Some(scored);
            }
        }
        best
    }

    /// Merge a candidate into the grid as a new piece and compact
    pub fn commit(
        grid: &mut Grid,
        candidate: &Candidate,
        scorer: &mut dyn Scorer,
    ) -> Result<PlacedPiece, PlaceError> {
        let b = grid.bounds();
        let inside = candidate
            .cells
            .iter()
            .all(|p| p.x >= 0 && p.y >= 0 && b.contains(p.x as usize, p.y as usize));
        if !inside {
            return Err(PlaceError::OutOfBounds);
        }
        if !fits(grid, &candidate.cells) {
            return Err(PlaceError::Blocked);
        }

        let piece = StaticPiece::mint(grid.registry_mut(), candidate.origin, &candidate.offsets());
        grid.track_piece(&piece);
        grid.merge_piece_into_grid(&piece, scorer);
        let cleared = grid.drop_bottommost_full_row(scorer);

        Ok(PlacedPiece {
            id: piece.id(),
            cells: candidate.cells.clone(),
            cleared,
        })
    }

    /// Search and commit in one step
    pub fn place_best(
        &self,
        grid: &mut Grid,
        rotations: &[&[Point3]],
        scorer: &mut dyn Scorer,
    ) -> Result<PlacedPiece, PlaceError> {
        let scored = self.best(grid, rotations).ok_or(PlaceError::NoCandidate)?;
        Self::commit(grid, &scored.candidate, scorer)
    }
}
