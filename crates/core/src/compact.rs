//! Row compaction - full-row detection, clearing and column-local gravity
//!
//! A row is full when none of its interior cells is non-collapsible (walls and
//! retired material count, empty space and hazards do not). Clearing cascades:
//! after a row is cleared and the material above slides down one step, the same
//! row is checked again before the scan moves upward. The loop is iterative and
//! each clear removes at least one occupied cell, so it always terminates.
//!
//! Rotating buckets only compact the half at or below the rotation centre.

use std::ops::RangeInclusive;

use crate::grid::Grid;
use crate::scorer::Scorer;
use crate::types::{CellCategory, CellId};

impl Grid {
    /// Interior rows eligible for compaction
    fn compaction_rows(&self) -> RangeInclusive<usize> {
        let b = self.bounds;
        let start = self.rotation_center.map_or(b.top, |c| c.clamp(b.top, b.bottom));
        start..=b.bottom
    }

    /// Whether every interior cell of `row` (all slices) counts toward a full row
    pub fn is_row_full(&self, row: usize) -> bool {
        let b = self.bounds;
        if row < b.top || row > b.bottom {
            return false;
        }
        (0..self.depth).all(|z| {
            (b.interior_left..=b.interior_right).all(|x| {
                let id = self.content[self.flat_index(x, row, z)];
                self.registry.is_collapsible(id)
            })
        })
    }

    /// Empty every interior cell of `row` in both layers
    ///
    /// Returns `true` when all cleared content cells held the same id. Rows
    /// outside the interior are structure and are left alone (`false`).
    pub fn clear_row(&mut self, row: usize) -> bool {
        let b = self.bounds;
        if row < b.top || row > b.bottom {
            return false;
        }

        let mut first: Option<CellId> = None;
        let mut homogeneous = true;
        for z in 0..self.depth {
            for x in b.interior_left..=b.interior_right {
                let idx = self.flat_index(x, row, z);
                let id = self.content[idx];
                match first {
                    None => first = Some(id),
                    Some(f) if f != id => homogeneous = false,
                    Some(_) => {}
                }
                self.content[idx] = CellId::EMPTY;
                self.blocks[idx] = CellId::EMPTY;
            }
        }
        self.invalidate();
        homogeneous
    }

    /// Shift retired material above `after_row` down one step, column by column
    ///
    /// A cell moves only into an empty cell directly below it. Structure cells
    /// (walls, exterior) stay put and hold up whatever rests on them.
    pub fn slide_blocks_down(&mut self, after_row: usize) {
        let b = self.bounds;
        let last = after_row.min(b.bottom);
        if last <= b.top {
            return;
        }

        for z in 0..self.depth {
            for x in b.interior_left..=b.interior_right {
                for y in ((b.top + 1)..=last).rev() {
                    let dst = self.flat_index(x, y, z);
                    let src = self.flat_index(x, y - 1, z);
                    if !self.registry.is_empty(self.content[dst]) {
                        continue;
                    }
                    if self.registry.classify(self.content[src]) == CellCategory::RetiredPiece {
                        self.move_index(src, dst, CellId::EMPTY);
                    }
                }
            }
        }
    }

    /// Non-mutating check for at least one full row in the compaction range
    pub fn can_compress(&self) -> bool {
        self.compaction_rows().any(|row| self.is_row_full(row))
    }

    /// Clear every full row, bottom-up, until none remain
    ///
    /// Hazard markers are lifted out before clearing and put back afterwards,
    /// but only where their cell is still empty. Returns whether any row was
    /// removed; the scorer hears about the cleared rows in clearing order.
    pub fn drop_bottommost_full_row(&mut self, scorer: &mut dyn Scorer) -> bool {
        let mut hazards = std::mem::take(&mut self.hazard_scratch);
        let mut cleared = std::mem::take(&mut self.cleared_scratch);
        let mut retired = std::mem::take(&mut self.retired_scratch);
        hazards.clear();
        cleared.clear();
        retired.clear();

        let b = self.bounds;
        for z in 0..self.depth {
            for y in b.top..=b.bottom {
                for x in b.interior_left..=b.interior_right {
                    let idx = self.flat_index(x, y, z);
                    let id = self.content[idx];
                    if self.registry.classify(id).is_hazard() {
                        hazards.push((idx, id));
                        self.content[idx] = CellId::EMPTY;
                    }
                }
            }
        }

        let rows = self.compaction_rows();
        let start = *rows.start();
        let mut row = *rows.end();
        let mut homogeneous = 0usize;
        loop {
            if self.is_row_full(row) {
                self.collect_retired(row, &mut retired);
                if self.clear_row(row) {
                    homogeneous += 1;
                }
                cleared.push(row);
                self.slide_blocks_down(row);
                // Material that slid into `row` may complete it again.
                continue;
            }
            if row == start {
                break;
            }
            row -= 1;
        }

        for &(idx, id) in &hazards {
            if self.registry.is_empty(self.content[idx]) {
                self.content[idx] = id;
            }
        }
        if !hazards.is_empty() {
            self.invalidate();
        }

        // Pieces with no cells left on the board no longer need a binding.
        for &id in &retired {
            if !self.content.contains(&id) {
                self.registry.forget(id);
            }
        }

        let removed = !cleared.is_empty();
        if removed {
            scorer.on_rows_cleared(&cleared, homogeneous);
        }

        self.hazard_scratch = hazards;
        self.cleared_scratch = cleared;
        self.retired_scratch = retired;
        removed
    }

    /// Append the distinct retired piece ids in `row` to `out`
    fn collect_retired(&self, row: usize, out: &mut Vec<CellId>) {
        let b = self.bounds;
        for z in 0..self.depth {
            for x in b.interior_left..=b.interior_right {
                let id = self.content[self.flat_index(x, row, z)];
                if id.is_static() || out.contains(&id) {
                    continue;
                }
                if self.registry.classify(id) == CellCategory::RetiredPiece {
                    out.push(id);
                }
            }
        }
    }
}
