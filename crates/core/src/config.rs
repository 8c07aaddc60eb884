//! Environment-driven configuration
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BUCKET_GRID_SHAPE` | `classic` | `classic`, `rotating` or `open` |
//! | `BUCKET_GRID_WIDTH` | 10 | Interior columns |
//! | `BUCKET_GRID_HEIGHT` | 20 | Interior rows |
//! | `BUCKET_GRID_DEPTH` | 1 | Depth slices |
//! | `BUCKET_GRID_SCRATCH_POOL` | 8 | Pooled reachability buffers |
//! | `BUCKET_GRID_QUIET` | unset | `1`/`true` silences diagnostics |
//!
//! Unparsable or zero values fall back to the defaults.

use std::env;

use crate::bucket::BucketShape;
use crate::types::{
    DEFAULT_DEPTH, DEFAULT_INTERIOR_HEIGHT, DEFAULT_INTERIOR_WIDTH, DEFAULT_SCRATCH_POOL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Open,
    Classic,
    Rotating,
}

impl ShapeKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Some(ShapeKind::Open),
            "classic" => Some(ShapeKind::Classic),
            "rotating" => Some(ShapeKind::Rotating),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub shape: ShapeKind,
    pub interior_width: usize,
    pub interior_height: usize,
    pub depth: usize,
    pub scratch_pool: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Classic,
            interior_width: DEFAULT_INTERIOR_WIDTH,
            interior_height: DEFAULT_INTERIOR_HEIGHT,
            depth: DEFAULT_DEPTH,
            scratch_pool: DEFAULT_SCRATCH_POOL,
        }
    }
}

fn positive<F>(lookup: &F, var: &str, default: usize) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default)
}

impl GridConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from any variable source (`from_env` passes the process environment)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let shape = lookup("BUCKET_GRID_SHAPE")
            .and_then(|s| ShapeKind::from_str(&s))
            .unwrap_or(defaults.shape);

        Self {
            shape,
            interior_width: positive(&lookup, "BUCKET_GRID_WIDTH", defaults.interior_width),
            interior_height: positive(&lookup, "BUCKET_GRID_HEIGHT", defaults.interior_height),
            depth: positive(&lookup, "BUCKET_GRID_DEPTH", defaults.depth),
            scratch_pool: positive(&lookup, "BUCKET_GRID_SCRATCH_POOL", defaults.scratch_pool),
        }
    }

    /// Whether diagnostics were silenced via `BUCKET_GRID_QUIET`
    pub fn quiet_from_env() -> bool {
        env::var("BUCKET_GRID_QUIET")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
    }

    /// Bucket shape described by this config
    pub fn bucket_shape(&self) -> BucketShape {
        match self.shape {
            ShapeKind::Open => BucketShape::Open {
                width: self.interior_width,
                height: self.interior_height,
            },
            ShapeKind::Classic => BucketShape::Classic {
                width: self.interior_width,
                height: self.interior_height,
            },
            ShapeKind::Rotating => BucketShape::Rotating {
                size: self.interior_width.max(self.interior_height),
            },
        }
    }
}
