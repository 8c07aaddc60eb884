//! Bucket entry detection
//!
//! The automated player prefers to drop pieces through the widest opening in
//! the top interior row. Ties go to the leftmost run; nothing downstream relies
//! on that choice.

use crate::core::Grid;
use crate::types::Point3;

/// A horizontal run of open cells in the top interior row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryGap {
    /// Leftmost column of the run
    pub start: usize,
    pub width: usize,
}

impl EntryGap {
    pub fn end(&self) -> usize {
        self.start + self.width - 1
    }

    pub fn contains(&self, x: usize) -> bool {
        x >= self.start && x <= self.end()
    }

    /// Whether the column span `lo..=hi` lies entirely inside the gap
    pub fn covers(&self, lo: usize, hi: usize) -> bool {
        lo >= self.start && hi <= self.end()
    }
}

/// Widest open run in the top interior row (slice 0), `None` if the row is closed
pub fn widest_entry_gap(grid: &Grid) -> Option<EntryGap> {
    let b = grid.bounds();
    let mut best: Option<EntryGap> = None;
    let mut run_start: Option<usize> = None;

    for x in b.interior_left..=b.interior_right + 1 {
        let open = x <= b.interior_right && grid.is_open_at(Point3::flat(x as i32, b.top as i32));
        match (open, run_start) {
            (true, None) => run_start = Some(x),
            (false, Some(start)) => {
                let gap = EntryGap {
                    start,
                    width: x - start,
                };
                if best.map_or(true, |g| gap.width > g.width) {
                    best = Some(gap);
                }
                run_start = None;
            }
            _ => {}
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BucketShape;
    use crate::types::{CellCategory, CellId};

    #[test]
    fn empty_bucket_is_one_gap() {
        let grid = Grid::new(BucketShape::Classic {
            width: 10,
            height: 20,
        })
        .unwrap();
        assert_eq!(
            widest_entry_gap(&grid),
            Some(EntryGap {
                start: 1,
                width: 10
            })
        );
    }

    #[test]
    fn picks_widest_then_leftmost() {
        let mut grid = Grid::new(BucketShape::Classic {
            width: 8,
            height: 4,
        })
        .unwrap();
        let wall = CellId::of(CellCategory::BucketWall);
        // Open runs: 1..=2, 4..=5, 7..=8
        grid.set(3, 0, wall);
        grid.set(6, 0, wall);
        let gap = widest_entry_gap(&grid).unwrap();
        assert_eq!(gap, EntryGap { start: 1, width: 2 });

        grid.set(1, 0, wall);
        let gap = widest_entry_gap(&grid).unwrap();
        assert_eq!(gap.start, 4);
        assert!(gap.covers(4, 5));
        assert!(!gap.contains(6));
    }

    #[test]
    fn closed_top_row_has_no_gap() {
        let mut grid = Grid::new(BucketShape::Classic {
            width: 3,
            height: 3,
        })
        .unwrap();
        let wall = CellId::of(CellCategory::BucketWall);
        for x in 1..=3 {
            grid.set(x, 0, wall);
        }
        assert_eq!(widest_entry_gap(&grid), None);
    }
}
