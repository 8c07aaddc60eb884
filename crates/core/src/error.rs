//! Grid construction and transform errors
//!
//! Only configuration and precondition failures surface here. Coordinate range
//! problems on reads and writes are reported as `None`/`false` by the accessors.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A grid dimension was zero.
    InvalidDimensions {
        width: usize,
        height: usize,
        depth: usize,
    },
    /// The bucket interior is empty or extends past the grid.
    InvalidBucket,
    /// Rotation and mirroring need `width == height`.
    NotSquare { width: usize, height: usize },
}

impl GridError {
    pub fn code(self) -> &'static str {
        match self {
            GridError::InvalidDimensions { .. } | GridError::InvalidBucket => "invalid_geometry",
            GridError::NotSquare { .. } => "not_square",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            GridError::InvalidDimensions { .. } => "grid dimensions must be positive",
            GridError::InvalidBucket => "bucket interior must be non-empty and inside the grid",
            GridError::NotSquare { .. } => "rotate/flip requires a square grid",
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GridError::InvalidDimensions {
                width,
                height,
                depth,
            } => write!(f, "{} (got {}x{}x{})", self.message(), width, height, depth),
            GridError::InvalidBucket => f.write_str(self.message()),
            GridError::NotSquare { width, height } => {
                write!(f, "{} (got {}x{})", self.message(), width, height)
            }
        }
    }
}

impl std::error::Error for GridError {}
