//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental value types used throughout the grid engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (grid store, analysis, AI placement search, rendering).
//!
//! # Coordinates
//!
//! - **x**: column, grows to the right
//! - **y**: row, grows downward (row 0 is the top of the grid)
//! - **z**: depth slice, always 0 for flat boards
//!
//! # Default Bucket
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_INTERIOR_WIDTH` | 10 | Playable columns |
//! | `DEFAULT_INTERIOR_HEIGHT` | 20 | Playable rows |
//! | `DEFAULT_DEPTH` | 1 | Depth slices (flat board) |
//! | `DEFAULT_SCRATCH_POOL` | 8 | Pooled analysis buffers |
//!
//! # Examples
//!
//! ```
//! use bucket_grid_types::{CellCategory, CellId, Point3};
//!
//! // Static ids are stable per category
//! let wall = CellId::of(CellCategory::BucketWall);
//! assert_eq!(wall, CellId::of(CellCategory::BucketWall));
//! assert_eq!(wall.static_category(), Some(CellCategory::BucketWall));
//!
//! // Points add and subtract component-wise
//! let p = Point3::new(1, 2, 0) + Point3::new(3, -1, 0);
//! assert_eq!(p, Point3::new(4, 1, 0));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// Default playable columns
pub const DEFAULT_INTERIOR_WIDTH: usize = 10;

/// Default playable rows
pub const DEFAULT_INTERIOR_HEIGHT: usize = 20;

/// Default depth (flat board)
pub const DEFAULT_DEPTH: usize = 1;

/// Default number of pooled reachability scratch buffers
pub const DEFAULT_SCRATCH_POOL: usize = 8;

/// Upper bound on cells in a single piece footprint
pub const MAX_PIECE_CELLS: usize = 16;

/// Semantic category of a grid cell
///
/// - **Empty**: open space (also the "no block" sentinel of the block layer)
/// - **BucketWall**: visible bucket structure
/// - **InvisibleBucketWall**: structure that is solid but not drawn
/// - **BucketExterior**: outside the bucket, never playable
/// - **ActivePiece**: a piece still under player/AI control
/// - **RetiredPiece**: material merged permanently into the grid
/// - **HazardAction** / **HazardDanger**: special marker cells
/// - **UnreachableMarker**: debug overlay for enclosed gaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellCategory {
    Empty,
    BucketWall,
    InvisibleBucketWall,
    BucketExterior,
    ActivePiece,
    RetiredPiece,
    HazardAction,
    HazardDanger,
    UnreachableMarker,
}

impl CellCategory {
    /// Every category, in static-id order
    pub const ALL: [CellCategory; 9] = [
        CellCategory::Empty,
        CellCategory::BucketWall,
        CellCategory::InvisibleBucketWall,
        CellCategory::BucketExterior,
        CellCategory::ActivePiece,
        CellCategory::RetiredPiece,
        CellCategory::HazardAction,
        CellCategory::HazardDanger,
        CellCategory::UnreachableMarker,
    ];

    /// Whether this category is one of the hazard markers snapshotted during compaction
    pub fn is_hazard(&self) -> bool {
        matches!(self, CellCategory::HazardAction | CellCategory::HazardDanger)
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CellCategory::Empty => "empty",
            CellCategory::BucketWall => "bucket_wall",
            CellCategory::InvisibleBucketWall => "invisible_bucket_wall",
            CellCategory::BucketExterior => "bucket_exterior",
            CellCategory::ActivePiece => "active_piece",
            CellCategory::RetiredPiece => "retired_piece",
            CellCategory::HazardAction => "hazard_action",
            CellCategory::HazardDanger => "hazard_danger",
            CellCategory::UnreachableMarker => "unreachable_marker",
        }
    }

    fn index(&self) -> u128 {
        *self as u128
    }
}

/// Opaque 128-bit cell identity
///
/// Static ids occupy the low range (one per [`CellCategory`]); dynamic ids are
/// minted by the registry above [`CellId::DYNAMIC_BASE`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u128);

impl CellId {
    /// The `Empty` sentinel (also "no block" in the block layer)
    pub const EMPTY: CellId = CellId(0);

    /// First value handed out for dynamic ids
    pub const DYNAMIC_BASE: u128 = 1 << 64;

    /// Static id for a category
    pub const fn of(category: CellCategory) -> CellId {
        CellId(category as u128)
    }

    pub const fn from_raw(raw: u128) -> CellId {
        CellId(raw)
    }

    pub const fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_static(&self) -> bool {
        self.0 < CellId::DYNAMIC_BASE
    }

    /// Category of a static id; `None` for dynamic or unknown low values
    pub fn static_category(&self) -> Option<CellCategory> {
        CellCategory::ALL.iter().copied().find(|c| c.index() == self.0)
    }
}

impl Default for CellId {
    fn default() -> Self {
        CellId::EMPTY
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.static_category() {
            Some(c) => write!(f, "CellId({})", c.as_str()),
            None => write!(f, "CellId({:#x})", self.0),
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Integer point used for cell coordinates and relative offsets
///
/// Ordering is by squared Euclidean distance from the origin, with ties broken
/// lexicographically on `(x, y, z)` so the order stays consistent with `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Point on the flat (z = 0) slice
    pub const fn flat(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }

    /// Squared Euclidean distance from the origin
    pub fn length_squared(&self) -> i64 {
        let (x, y, z) = (self.x as i64, self.y as i64, self.z as i64);
        x * x + y * y + z * z
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Ord for Point3 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.length_squared()
            .cmp(&other.length_squared())
            .then_with(|| (self.x, self.y, self.z).cmp(&(other.x, other.y, other.z)))
    }
}

impl PartialOrd for Point3 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Raw bucket geometry as supplied by a bucket shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketLayout {
    pub grid_width: usize,
    pub grid_height: usize,
    pub interior_left: usize,
    pub interior_top: usize,
    pub interior_width: usize,
    pub interior_height: usize,
    /// Row the board pivots around; `Some` only for rotating buckets.
    pub rotation_center: Option<usize>,
}

/// Interior rectangle of the bucket, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketBounds {
    pub top: usize,
    pub bottom: usize,
    pub interior_left: usize,
    pub interior_right: usize,
    pub interior_width: usize,
    pub interior_height: usize,
}

impl BucketBounds {
    /// Derive bounds from a layout; `None` if the interior is empty or leaves the grid
    pub fn from_layout(layout: &BucketLayout) -> Option<Self> {
        if layout.interior_width == 0 || layout.interior_height == 0 {
            return None;
        }
        let right = layout.interior_left + layout.interior_width - 1;
        let bottom = layout.interior_top + layout.interior_height - 1;
        if right >= layout.grid_width || bottom >= layout.grid_height {
            return None;
        }
        Some(Self {
            top: layout.interior_top,
            bottom,
            interior_left: layout.interior_left,
            interior_right: right,
            interior_width: layout.interior_width,
            interior_height: layout.interior_height,
        })
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.interior_left && x <= self.interior_right && y >= self.top && y <= self.bottom
    }

    pub fn interior_cells(&self) -> usize {
        self.interior_width * self.interior_height
    }
}

/// Per-cell classification used only during a reachability pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReachableState {
    #[default]
    Outside,
    Block,
    Reachable,
    Unreachable,
}

/// Mirror axis for whole-board flips
///
/// - **Horizontal**: mirror columns (left ↔ right)
/// - **Vertical**: mirror rows (top ↔ bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

impl FlipAxis {
    /// Parse from string (case-insensitive): "horizontal" | "h", "vertical" | "v"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "horizontal" | "h" => Some(FlipAxis::Horizontal),
            "vertical" | "v" => Some(FlipAxis::Vertical),
            _ => None,
        }
    }
}
