//! Scorer collaborator - receives clear and placement notifications
//!
//! Scoring formulas live elsewhere; the grid only reports what happened.

use crate::types::Point3;

pub trait Scorer {
    /// Rows removed by one compaction pass, in clearing order, and how many of
    /// them held a single piece identity before clearing.
    fn on_rows_cleared(&mut self, cleared_rows: &[usize], homogeneous: usize);

    /// Cells written by a piece merge.
    fn on_piece_locations_scored(&mut self, points: &[Point3]);
}

/// Ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScorer;

impl Scorer for NullScorer {
    fn on_rows_cleared(&mut self, _cleared_rows: &[usize], _homogeneous: usize) {}

    fn on_piece_locations_scored(&mut self, _points: &[Point3]) {}
}

/// Running totals of everything reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyScorer {
    pub rows_cleared: usize,
    pub homogeneous_rows: usize,
    pub clear_events: usize,
    pub pieces_placed: usize,
    pub cells_placed: usize,
    /// Row indices from the most recent clear event.
    pub last_cleared: Vec<usize>,
}

impl Scorer for TallyScorer {
    fn on_rows_cleared(&mut self, cleared_rows: &[usize], homogeneous: usize) {
        self.rows_cleared += cleared_rows.len();
        self.homogeneous_rows += homogeneous;
        self.clear_events += 1;
        self.last_cleared.clear();
        self.last_cleared.extend_from_slice(cleared_rows);
    }

    fn on_piece_locations_scored(&mut self, points: &[Point3]) {
        self.pieces_placed += 1;
        self.cells_placed += points.len();
    }
}
