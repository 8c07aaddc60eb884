//! Orientation transforms for rotating-bucket variants
//!
//! Every transform writes into scratch layers of identical size and swaps them
//! in, applying the same mapping to the content and block layers of each depth
//! slice. Indices below are `[row][column]`:
//!
//! | Transform | Mapping |
//! |-----------|---------|
//! | rotate cw | `new[y][x] = old[w-x-1][y]` |
//! | rotate ccw | `new[y][x] = old[x][w-y-1]` |
//! | flip horizontal | `new[y][x] = old[y][w-x-1]` |
//! | flip vertical | `new[y][x] = old[h-y-1][x]` |
//!
//! All of them require a square grid. In-play footprints are dropped because
//! their coordinates no longer mean anything; callers re-track pieces.

use crate::error::GridError;
use crate::grid::Grid;
use crate::types::{BucketBounds, CellId, FlipAxis};

impl Grid {
    fn require_square(&self) -> Result<(), GridError> {
        if self.width != self.height {
            return Err(GridError::NotSquare {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Rebuild both layers with `source(x, y)` giving the old `(x, y)` for each new cell
    fn remap<F>(&mut self, source: F)
    where
        F: Fn(usize, usize) -> (usize, usize),
    {
        let mut content = vec![CellId::EMPTY; self.content.len()];
        let mut blocks = vec![CellId::EMPTY; self.blocks.len()];

        for z in 0..self.depth {
            for y in 0..self.height {
                for x in 0..self.width {
                    let (ox, oy) = source(x, y);
                    let dst = self.flat_index(x, y, z);
                    let src = self.flat_index(ox, oy, z);
                    content[dst] = self.content[src];
                    blocks[dst] = self.blocks[src];
                }
            }
        }

        self.content = content;
        self.blocks = blocks;
        self.in_play.clear();
        self.invalidate();
    }

    /// Rotate the whole board a quarter turn
    pub fn rotate(&mut self, clockwise: bool) -> Result<(), GridError> {
        self.require_square()?;
        let n = self.width;

        if clockwise {
            self.remap(|x, y| (y, n - x - 1));
        } else {
            self.remap(|x, y| (n - y - 1, x));
        }

        let b = self.bounds;
        // Old (x, y) lands on (n-1-y, x) clockwise and (y, n-1-x) counter-clockwise.
        let (left, right, top, bottom) = if clockwise {
            (n - 1 - b.bottom, n - 1 - b.top, b.interior_left, b.interior_right)
        } else {
            (b.top, b.bottom, n - 1 - b.interior_right, n - 1 - b.interior_left)
        };
        self.bounds = BucketBounds {
            top,
            bottom,
            interior_left: left,
            interior_right: right,
            interior_width: right - left + 1,
            interior_height: bottom - top + 1,
        };

        let step = if clockwise { 1 } else { -1 };
        self.rotation = (self.rotation + step).rem_euclid(4);
        Ok(())
    }

    /// Mirror the whole board across an axis
    pub fn flip(&mut self, axis: FlipAxis) -> Result<(), GridError> {
        self.require_square()?;
        let (w, h) = (self.width, self.height);
        let b = self.bounds;

        match axis {
            FlipAxis::Horizontal => {
                self.remap(|x, y| (w - x - 1, y));
                self.bounds.interior_left = w - 1 - b.interior_right;
                self.bounds.interior_right = w - 1 - b.interior_left;
            }
            FlipAxis::Vertical => {
                self.remap(|x, y| (x, h - y - 1));
                self.bounds.top = h - 1 - b.bottom;
                self.bounds.bottom = h - 1 - b.top;
            }
        }
        Ok(())
    }
}
