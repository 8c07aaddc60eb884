//! Reachability analysis - which empty cells a falling piece could get to
//!
//! Used by the automated player to score candidate placements. One pass:
//!
//! 1. Every interior cell a block cannot enter (walls, retired material, plus
//!    any hypothetical placement cells) is marked `Block`, and the topmost
//!    blocked row `H` is recorded.
//! 2. Interior cells at rows `H..=bottom` are scanned column by column from the
//!    bottom up. Each unvisited open cell seeds a flood fill bounded to the
//!    interior columns and rows `H..=bottom`; visited cells are tentatively
//!    `Unreachable` and the minimum row reached is tracked.
//! 3. A region that touches row `H` is open to the top and is promoted to
//!    `Reachable`; anything else is an enclosed gap.
//!
//! Rows above `H` are entirely open and count as reachable without being filled.
//! The fill is iterative over an explicit stack and is 4-connected within a
//! slice, adding ±z neighbours on multi-slice boards.
//!
//! Hypothetical cells never touch the grid: they are applied to a private
//! scratch state array drawn from a [`ScratchPool`], so many what-if queries can
//! run at once against one shared `&Grid`.

use std::sync::Mutex;

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{CellCategory, CellId, Point3, ReachableState, DEFAULT_SCRATCH_POOL};

/// Totals from one analysis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReachCounts {
    pub unreachable: usize,
    pub blocked: usize,
    pub reachable: usize,
    /// Number of enclosed gaps.
    pub groups: usize,
    /// Topmost blocked interior row, if anything is blocked.
    pub top_blocked_row: Option<usize>,
}

/// Full analysis result including every enclosed gap
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReachabilityReport {
    pub groups: Vec<Vec<Point3>>,
    pub unreachable: usize,
    pub blocked: usize,
    pub reachable: usize,
}

impl ReachabilityReport {
    /// Size of the largest enclosed gap
    pub fn largest_group(&self) -> usize {
        self.groups.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Debug, Default)]
struct Scratch {
    states: Vec<ReachableState>,
    stack: Vec<usize>,
    region: Vec<usize>,
}

/// Reusable analysis buffers shared behind a mutex
///
/// Buffers keep their capacity between calls, so once warm a pass on a grid of
/// the same size does not allocate.
#[derive(Debug)]
pub struct ScratchPool {
    buffers: Mutex<Vec<Scratch>>,
    capacity: usize,
}

impl ScratchPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    fn acquire(&self) -> Scratch {
        let mut buffers = self.buffers.lock().unwrap_or_else(|e| e.into_inner());
        buffers.pop().unwrap_or_default()
    }

    fn release(&self, scratch: Scratch) {
        let mut buffers = self.buffers.lock().unwrap_or_else(|e| e.into_inner());
        if buffers.len() < self.capacity {
            buffers.push(scratch);
        }
    }

    /// Buffers currently parked in the pool
    pub fn idle(&self) -> usize {
        self.buffers.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for ScratchPool {
    fn default() -> Self {
        Self::new(DEFAULT_SCRATCH_POOL)
    }
}

#[derive(Debug, Default)]
pub struct ReachabilityAnalyzer {
    pool: ScratchPool,
}

impl ReachabilityAnalyzer {
    pub fn new(pool_capacity: usize) -> Self {
        Self {
            pool: ScratchPool::new(pool_capacity),
        }
    }

    pub fn pool(&self) -> &ScratchPool {
        &self.pool
    }

    /// Classify the grid (plus `hypothetical` occupied cells) and list every enclosed gap
    pub fn analyze(&self, grid: &Grid, hypothetical: &[Point3]) -> ReachabilityReport {
        let mut groups = Vec::new();
        let counts = self.run(grid, hypothetical, |region| {
            groups.push(region.iter().map(|&i| grid.point_of(i)).collect());
        });
        ReachabilityReport {
            groups,
            unreachable: counts.unreachable,
            blocked: counts.blocked,
            reachable: counts.reachable,
        }
    }

    /// Same pass as [`analyze`](Self::analyze) without materialising the gaps
    pub fn count(&self, grid: &Grid, hypothetical: &[Point3]) -> ReachCounts {
        self.run(grid, hypothetical, |_| {})
    }

    fn run<F>(&self, grid: &Grid, hypothetical: &[Point3], mut on_group: F) -> ReachCounts
    where
        F: FnMut(&[usize]),
    {
        let mut scratch = self.pool.acquire();
        let counts = Self::classify(grid, hypothetical, &mut scratch, &mut on_group);
        self.pool.release(scratch);
        counts
    }

    fn classify(
        grid: &Grid,
        hypothetical: &[Point3],
        scratch: &mut Scratch,
        on_group: &mut dyn FnMut(&[usize]),
    ) -> ReachCounts {
        let b = grid.bounds();
        let (width, height, depth) = (grid.width(), grid.height(), grid.depth());
        let registry = grid.registry();

        let states = &mut scratch.states;
        states.clear();
        states.resize(width * height * depth, ReachableState::Outside);

        let mut counts = ReachCounts::default();
        let mut top: Option<usize> = None;

        for z in 0..depth {
            for y in b.top..=b.bottom {
                for x in b.interior_left..=b.interior_right {
                    let idx = (z * height + y) * width + x;
                    if !registry.is_valid_neighbor(grid.content[idx]) {
                        states[idx] = ReachableState::Block;
                        counts.blocked += 1;
                        top = Some(top.map_or(y, |t| t.min(y)));
                    }
                }
            }
        }

        for &p in hypothetical {
            let Some(idx) = grid.index_of(p) else {
                continue;
            };
            let (x, y) = (p.x as usize, p.y as usize);
            if b.contains(x, y) && states[idx] != ReachableState::Block {
                states[idx] = ReachableState::Block;
                counts.blocked += 1;
                top = Some(top.map_or(y, |t| t.min(y)));
            }
        }

        counts.top_blocked_row = top;
        let h = top.unwrap_or(b.top);

        for z in 0..depth {
            for x in b.interior_left..=b.interior_right {
                for y in (h..=b.bottom).rev() {
                    let seed = (z * height + y) * width + x;
                    if states[seed] != ReachableState::Outside {
                        continue;
                    }

                    let min_row = Self::fill(
                        grid,
                        h,
                        seed,
                        states,
                        &mut scratch.stack,
                        &mut scratch.region,
                    );
                    if min_row <= h {
                        for &i in &scratch.region {
                            states[i] = ReachableState::Reachable;
                        }
                    } else {
                        counts.unreachable += scratch.region.len();
                        counts.groups += 1;
                        on_group(&scratch.region);
                    }
                }
            }
        }

        counts.reachable = b.interior_cells() * depth - counts.unreachable - counts.blocked;
        counts
    }

    /// Flood one region from `seed`, marking it `Unreachable`; returns the minimum row reached
    fn fill(
        grid: &Grid,
        h: usize,
        seed: usize,
        states: &mut [ReachableState],
        stack: &mut Vec<usize>,
        region: &mut Vec<usize>,
    ) -> usize {
        let b = grid.bounds();
        let (width, height, depth) = (grid.width(), grid.height(), grid.depth());
        let slice = width * height;

        stack.clear();
        region.clear();
        states[seed] = ReachableState::Unreachable;
        stack.push(seed);
        let mut min_row = usize::MAX;

        while let Some(idx) = stack.pop() {
            region.push(idx);
            let x = idx % width;
            let y = (idx / width) % height;
            let z = idx / slice;
            min_row = min_row.min(y);

            let mut next: ArrayVec<usize, 6> = ArrayVec::new();
            if x > b.interior_left {
                next.push(idx - 1);
            }
            if x < b.interior_right {
                next.push(idx + 1);
            }
            if y > h {
                next.push(idx - width);
            }
            if y < b.bottom {
                next.push(idx + width);
            }
            if z > 0 {
                next.push(idx - slice);
            }
            if z + 1 < depth {
                next.push(idx + slice);
            }

            for n in next {
                if states[n] == ReachableState::Outside {
                    states[n] = ReachableState::Unreachable;
                    stack.push(n);
                }
            }
        }

        min_row
    }
}

impl Grid {
    /// Paint every enclosed gap from `report` with the unreachable marker
    ///
    /// Only cells that are still empty are painted.
    pub fn mark_unreachable(&mut self, report: &ReachabilityReport) -> usize {
        let marker = CellId::of(CellCategory::UnreachableMarker);
        let mut painted = 0;
        for &p in report.groups.iter().flatten() {
            if let Some(idx) = self.index_of(p) {
                if self.content[idx] == CellId::EMPTY {
                    self.content[idx] = marker;
                    painted += 1;
                }
            }
        }
        if painted > 0 {
            self.invalidate();
        }
        painted
    }

    /// Remove every unreachable marker
    pub fn clear_unreachable_markers(&mut self) -> usize {
        let marker = CellId::of(CellCategory::UnreachableMarker);
        let mut cleared = 0;
        for cell in self.content.iter_mut().filter(|c| **c == marker) {
            *cell = CellId::EMPTY;
            cleared += 1;
        }
        if cleared > 0 {
            self.invalidate();
        }
        cleared
    }
}
