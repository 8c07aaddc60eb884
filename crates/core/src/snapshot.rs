use crate::types::{CellCategory, CellId, Point3};

/// Read-only view of the grid with in-play pieces overlaid
///
/// Produced by [`Grid::merge_with_in_play`](crate::Grid::merge_with_in_play).
/// Renderers and analysis code read through this instead of the live grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) depth: usize,
    pub(crate) content: Vec<CellId>,
    pub(crate) blocks: Vec<CellId>,
    pub(crate) categories: Vec<CellCategory>,
    pub(crate) rotation: i8,
}

impl GridSnapshot {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn rotation(&self) -> i8 {
        self.rotation
    }

    fn index(&self, p: Point3) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.z < 0 {
            return None;
        }
        let (x, y, z) = (p.x as usize, p.y as usize, p.z as usize);
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some((z * self.height + y) * self.width + x)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<CellId> {
        self.get_at(Point3::flat(x, y))
    }

    pub fn get_at(&self, p: Point3) -> Option<CellId> {
        self.index(p).map(|i| self.content[i])
    }

    pub fn block_at(&self, p: Point3) -> Option<CellId> {
        self.index(p).map(|i| self.blocks[i])
    }

    pub fn category_at(&self, p: Point3) -> Option<CellCategory> {
        self.index(p).map(|i| self.categories[i])
    }

    /// Categories of row `y` in slice `z`
    pub fn row_categories(&self, y: usize, z: usize) -> &[CellCategory] {
        if y >= self.height || z >= self.depth {
            return &[];
        }
        let start = (z * self.height + y) * self.width;
        &self.categories[start..start + self.width]
    }

    pub fn content(&self) -> &[CellId] {
        &self.content
    }

    pub fn blocks(&self) -> &[CellId] {
        &self.blocks
    }
}
