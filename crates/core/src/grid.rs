//! Grid store - owns the content and block layers
//!
//! The grid is a dense `width × height × depth` arena stored row-major per depth
//! slice (`(z * height + y) * width + x`). Two layers share that shape:
//!
//! - **content**: one [`CellId`] per cell, classified through the grid's [`Registry`]
//! - **blocks**: per-block instance ids, [`CellId::EMPTY`] where there is no block
//!
//! Coordinates are signed so edge-of-board probes never need pre-checks: reads
//! outside the grid return `None`, writes are no-ops returning `false`.
//!
//! In-play pieces are not written into the layers. Their footprints live in an
//! id-keyed table and are overlaid only by [`Grid::merge_with_in_play`].

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::bucket::{BucketGeometry, BucketShape};
use crate::diag;
use crate::error::GridError;
use crate::piece::Piece;
use crate::registry::Registry;
use crate::scorer::Scorer;
use crate::snapshot::GridSnapshot;
use crate::types::{BucketBounds, BucketLayout, CellCategory, CellId, Point3};

type Footprint = Vec<(Point3, CellId)>;

#[derive(Debug, Clone)]
pub struct Grid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) depth: usize,
    pub(crate) content: Vec<CellId>,
    pub(crate) blocks: Vec<CellId>,
    pub(crate) bounds: BucketBounds,
    pub(crate) rotation_center: Option<usize>,
    pub(crate) registry: Registry,
    pub(crate) in_play: BTreeMap<CellId, Footprint>,
    /// Net quarter turns, always in `0..4`.
    pub(crate) rotation: i8,
    geometry: Arc<dyn BucketGeometry>,
    /// Topmost occupied interior row per interior column (slice 0).
    profile: OnceLock<Vec<Option<usize>>>,
    /// Reused by compaction so repeated clears don't reallocate.
    pub(crate) hazard_scratch: Vec<(usize, CellId)>,
    pub(crate) cleared_scratch: Vec<usize>,
    pub(crate) retired_scratch: Vec<CellId>,
}

impl Grid {
    /// Allocate a grid filled uniformly with `fill`; the whole grid is interior
    pub fn create(
        width: usize,
        height: usize,
        depth: usize,
        fill: CellId,
    ) -> Result<Self, GridError> {
        let shape = BucketShape::Open { width, height };
        let mut grid = Self::with_depth(Arc::new(shape), depth)?;
        grid.content.fill(fill);
        Ok(grid)
    }

    /// Build an empty bucket from a geometry collaborator
    pub fn from_geometry<G>(geometry: G, depth: usize) -> Result<Self, GridError>
    where
        G: BucketGeometry + 'static,
    {
        Self::with_depth(Arc::new(geometry), depth)
    }

    /// Flat 2D bucket
    pub fn new(shape: BucketShape) -> Result<Self, GridError> {
        Self::from_geometry(shape, 1)
    }

    fn with_depth(geometry: Arc<dyn BucketGeometry>, depth: usize) -> Result<Self, GridError> {
        let layout = geometry.layout();
        let mut grid = Self {
            width: 0,
            height: 0,
            depth,
            content: Vec::new(),
            blocks: Vec::new(),
            bounds: Self::check_layout(&layout, depth)?,
            rotation_center: layout.rotation_center,
            registry: Registry::new(),
            in_play: BTreeMap::new(),
            rotation: 0,
            geometry,
            profile: OnceLock::new(),
            hazard_scratch: Vec::new(),
            cleared_scratch: Vec::new(),
            retired_scratch: Vec::new(),
        };
        grid.apply_layout(&layout);
        Ok(grid)
    }

    fn check_layout(layout: &BucketLayout, depth: usize) -> Result<BucketBounds, GridError> {
        if layout.grid_width == 0 || layout.grid_height == 0 || depth == 0 {
            return Err(GridError::InvalidDimensions {
                width: layout.grid_width,
                height: layout.grid_height,
                depth,
            });
        }
        BucketBounds::from_layout(layout).ok_or(GridError::InvalidBucket)
    }

    /// Reallocate both layers and paint bucket structure from `layout`
    fn apply_layout(&mut self, layout: &BucketLayout) {
        self.width = layout.grid_width;
        self.height = layout.grid_height;
        let size = self.width * self.height * self.depth;
        self.content = vec![CellId::EMPTY; size];
        self.blocks = vec![CellId::EMPTY; size];
        self.rotation_center = layout.rotation_center;

        for z in 0..self.depth {
            for y in 0..self.height {
                for x in 0..self.width {
                    if self.bounds.contains(x, y) {
                        continue;
                    }
                    let category = self.geometry.structure_at(layout, x, y);
                    let idx = self.flat_index(x, y, z);
                    self.content[idx] = CellId::of(category);
                }
            }
        }
    }

    /// Reinitialise to an empty bucket, optionally with a new interior size
    ///
    /// Clears in-play pieces, dynamic registry ids, the rotation counter and the
    /// cached column profile.
    pub fn reset(&mut self, width: Option<usize>, height: Option<usize>) -> Result<(), GridError> {
        let w = width.unwrap_or(self.bounds.interior_width);
        let h = height.unwrap_or(self.bounds.interior_height);
        let layout = self.geometry.layout_for(w, h);
        self.bounds = Self::check_layout(&layout, self.depth)?;
        self.apply_layout(&layout);
        self.registry.clear_dynamic();
        self.in_play.clear();
        self.rotation = 0;
        self.invalidate();
        diag!("Grid", "reset to {}x{}x{}", self.width, self.height, self.depth);
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn bounds(&self) -> BucketBounds {
        self.bounds
    }

    pub fn rotation_center(&self) -> Option<usize> {
        self.rotation_center
    }

    /// Net clockwise quarter turns applied since construction or reset
    pub fn rotation(&self) -> i8 {
        self.rotation
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    #[inline(always)]
    pub(crate) fn flat_index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.height + y) * self.width + x
    }

    /// Flat index for a point, `None` outside the grid
    #[inline(always)]
    pub fn index_of(&self, p: Point3) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.z < 0 {
            return None;
        }
        let (x, y, z) = (p.x as usize, p.y as usize, p.z as usize);
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some(self.flat_index(x, y, z))
    }

    /// Inverse of [`index_of`](Self::index_of)
    pub fn point_of(&self, idx: usize) -> Point3 {
        let x = idx % self.width;
        let y = (idx / self.width) % self.height;
        let z = idx / (self.width * self.height);
        Point3::new(x as i32, y as i32, z as i32)
    }

    pub(crate) fn invalidate(&mut self) {
        self.profile.take();
    }

    /// Content at `(x, y)` on slice 0
    pub fn get(&self, x: i32, y: i32) -> Option<CellId> {
        self.get_at(Point3::flat(x, y))
    }

    /// Set content at `(x, y)` on slice 0; `false` when out of bounds
    pub fn set(&mut self, x: i32, y: i32, value: CellId) -> bool {
        self.set_at(Point3::flat(x, y), value)
    }

    pub fn get_at(&self, p: Point3) -> Option<CellId> {
        self.index_of(p).map(|i| self.content[i])
    }

    pub fn set_at(&mut self, p: Point3, value: CellId) -> bool {
        match self.index_of(p) {
            Some(i) => {
                self.content[i] = value;
                self.invalidate();
                true
            }
            None => false,
        }
    }

    pub fn block_at(&self, p: Point3) -> Option<CellId> {
        self.index_of(p).map(|i| self.blocks[i])
    }

    pub fn set_block_at(&mut self, p: Point3, value: CellId) -> bool {
        match self.index_of(p) {
            Some(i) => {
                self.blocks[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn category_at(&self, p: Point3) -> Option<CellCategory> {
        self.get_at(p).map(|id| self.registry.classify(id))
    }

    /// Empty check that fails closed: out of bounds counts as occupied
    pub fn is_empty_at(&self, p: Point3) -> bool {
        match self.get_at(p) {
            Some(id) => self.registry.is_empty(id),
            None => false,
        }
    }

    /// Whether a falling block may occupy `p` (empty or hazard marker, in bounds)
    pub fn is_open_at(&self, p: Point3) -> bool {
        match self.get_at(p) {
            Some(id) => self.registry.is_valid_neighbor(id),
            None => false,
        }
    }

    /// Move one content+block pair, leaving `replacement` in the source cell
    ///
    /// Returns `false` (and changes nothing) if either point is out of bounds.
    pub fn move_item(&mut self, from: Point3, to: Point3, replacement: CellId) -> bool {
        let (Some(src), Some(dst)) = (self.index_of(from), self.index_of(to)) else {
            return false;
        };
        self.move_index(src, dst, replacement);
        true
    }

    #[inline]
    pub(crate) fn move_index(&mut self, src: usize, dst: usize, replacement: CellId) {
        self.content[dst] = self.content[src];
        self.blocks[dst] = self.blocks[src];
        self.content[src] = replacement;
        self.blocks[src] = CellId::EMPTY;
        self.invalidate();
    }

    /// Record (or refresh) an in-play piece footprint
    pub fn track_piece(&mut self, piece: &dyn Piece) {
        let id = piece.id();
        if !self.registry.is_bound(id) {
            self.registry.bind(id, CellCategory::ActivePiece);
        }
        self.in_play.insert(id, piece.current_locations());
    }

    /// Stop tracking a piece without merging it
    pub fn untrack_piece(&mut self, id: CellId) -> bool {
        let removed = self.in_play.remove(&id).is_some();
        if removed {
            self.registry.release(id);
        }
        removed
    }

    pub fn in_play_count(&self) -> usize {
        self.in_play.len()
    }

    /// Footprint of a tracked piece
    pub fn in_play_cells(&self, id: CellId) -> Option<&[(Point3, CellId)]> {
        self.in_play.get(&id).map(|f| f.as_slice())
    }

    /// In-play piece occupying `p`, if any
    pub fn piece_at(&self, p: Point3) -> Option<CellId> {
        self.in_play
            .iter()
            .find(|(_, cells)| cells.iter().any(|&(q, _)| q == p))
            .map(|(&id, _)| id)
    }

    /// Snapshot of committed content with every in-play footprint overlaid
    ///
    /// `excluding` leaves one piece out (typically the piece being evaluated).
    /// The committed layers are never touched.
    pub fn merge_with_in_play(&self, excluding: Option<CellId>) -> GridSnapshot {
        let mut content = self.content.clone();
        let mut blocks = self.blocks.clone();

        for (&id, cells) in &self.in_play {
            if Some(id) == excluding {
                continue;
            }
            for &(p, block) in cells {
                if let Some(i) = self.index_of(p) {
                    content[i] = id;
                    blocks[i] = block;
                }
            }
        }

        let categories = content.iter().map(|&id| self.registry.classify(id)).collect();
        GridSnapshot {
            width: self.width,
            height: self.height,
            depth: self.depth,
            content,
            blocks,
            categories,
            rotation: self.rotation,
        }
    }

    /// Index of `p` when it lies inside the bucket interior
    fn interior_index(&self, p: Point3) -> Option<usize> {
        let i = self.index_of(p)?;
        self.bounds.contains(p.x as usize, p.y as usize).then_some(i)
    }

    /// Write a piece into both layers as retired material
    ///
    /// The piece id is rebound to `RetiredPiece` and dropped from the in-play
    /// table. Cells outside the bucket interior (walls, exterior, off-grid) are
    /// skipped so structure is never overwritten; returns `false` if any were.
    pub fn merge_piece_into_grid(&mut self, piece: &dyn Piece, scorer: &mut dyn Scorer) -> bool {
        let id = piece.id();
        let locations = piece.current_locations();
        let mut points = Vec::with_capacity(locations.len());
        let mut all_inside = true;

        for (p, block) in locations {
            match self.interior_index(p) {
                Some(i) => {
                    self.content[i] = id;
                    self.blocks[i] = block;
                    points.push(p);
                }
                None => all_inside = false,
            }
        }

        if !all_inside {
            diag!("Grid", "piece {} merged with cells outside the interior", id);
        }

        self.registry.retire(id);
        self.in_play.remove(&id);
        self.invalidate();
        scorer.on_piece_locations_scored(&points);
        all_inside
    }

    /// Topmost occupied interior row for each interior column (slice 0)
    ///
    /// Cached until the next mutation.
    pub fn column_profile(&self) -> &[Option<usize>] {
        self.profile.get_or_init(|| {
            let b = self.bounds;
            (b.interior_left..=b.interior_right)
                .map(|x| {
                    (b.top..=b.bottom).find(|&y| {
                        let id = self.content[self.flat_index(x, y, 0)];
                        !self.registry.is_valid_neighbor(id)
                    })
                })
                .collect()
        })
    }

    /// Height of the tallest interior stack, in rows
    pub fn stack_height(&self) -> usize {
        let bottom = self.bounds.bottom;
        self.column_profile()
            .iter()
            .flatten()
            .map(|&top| bottom + 1 - top)
            .max()
            .unwrap_or(0)
    }
}
