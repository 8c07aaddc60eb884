//! Bucket geometry - where the playable interior sits inside the grid
//!
//! A [`BucketGeometry`] supplies the grid size and interior rectangle. The grid
//! store consumes it once at construction and again on every reset, so shapes
//! must also be able to describe themselves at a different interior size.
//!
//! Stock shapes:
//!
//! - **Open**: the whole grid is interior, no structure cells
//! - **Classic**: walls on the left, right and bottom; open top
//! - **Rotating**: square grid framed on all four sides, rotation centre at
//!   mid-height of the interior

use std::fmt;

use crate::types::{BucketLayout, CellCategory};

pub trait BucketGeometry: fmt::Debug + Send + Sync {
    /// Layout at the shape's own interior size
    fn layout(&self) -> BucketLayout;

    /// Layout for a different interior size (used by `Grid::reset`)
    fn layout_for(&self, interior_width: usize, interior_height: usize) -> BucketLayout;

    /// Category of a cell outside the interior
    ///
    /// The default paints cells touching the interior as walls (an invisible lid
    /// when the cell is above the interior) and everything else as exterior.
    fn structure_at(&self, layout: &BucketLayout, x: usize, y: usize) -> CellCategory {
        let left = layout.interior_left;
        let top = layout.interior_top;
        let right = left + layout.interior_width;
        let bottom = top + layout.interior_height;
        let near_x = x + 1 >= left && x <= right;
        let near_y = y + 1 >= top && y <= bottom;
        if near_x && near_y {
            if y < top {
                CellCategory::InvisibleBucketWall
            } else {
                CellCategory::BucketWall
            }
        } else {
            CellCategory::BucketExterior
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketShape {
    Open { width: usize, height: usize },
    Classic { width: usize, height: usize },
    Rotating { size: usize },
}

impl BucketGeometry for BucketShape {
    fn layout(&self) -> BucketLayout {
        match *self {
            BucketShape::Open { width, height } | BucketShape::Classic { width, height } => {
                self.layout_for(width, height)
            }
            BucketShape::Rotating { size } => self.layout_for(size, size),
        }
    }

    fn layout_for(&self, interior_width: usize, interior_height: usize) -> BucketLayout {
        match self {
            BucketShape::Open { .. } => BucketLayout {
                grid_width: interior_width,
                grid_height: interior_height,
                interior_left: 0,
                interior_top: 0,
                interior_width,
                interior_height,
                rotation_center: None,
            },
            BucketShape::Classic { .. } => BucketLayout {
                grid_width: interior_width + 2,
                grid_height: interior_height + 1,
                interior_left: 1,
                interior_top: 0,
                interior_width,
                interior_height,
                rotation_center: None,
            },
            BucketShape::Rotating { .. } => {
                // Always square; the larger requested side wins.
                let size = interior_width.max(interior_height);
                BucketLayout {
                    grid_width: size + 2,
                    grid_height: size + 2,
                    interior_left: 1,
                    interior_top: 1,
                    interior_width: size,
                    interior_height: size,
                    rotation_center: Some(1 + size / 2),
                }
            }
        }
    }
}
