//! Core grid engine - pure, deterministic, and testable
//!
//! This crate owns the playfield of a falling-block puzzle game. It has **zero
//! dependencies** on rendering, input, networking or persistence, making it:
//!
//! - **Deterministic**: the same sequence of operations yields identical grids
//! - **Testable**: every operation is a plain method on an owned value
//! - **Shareable**: `&Grid` can be read from many threads during AI search
//! - **Fast**: compaction and reachability reuse scratch buffers on hot paths
//!
//! # Module Structure
//!
//! - [`registry`]: cell id → category classification and id minting
//! - [`bucket`]: bucket geometry collaborator and stock bucket shapes
//! - [`grid`]: the two-layer grid store, in-play piece table, snapshots
//! - [`orient`]: quarter-turn rotation and mirroring (square grids only)
//! - [`compact`]: full-row detection, clearing and cascading gravity
//! - [`reach`]: flood-fill reachability analysis for placement scoring
//! - [`scorer`] / [`piece`]: collaborator traits the grid reports to and reads from
//! - [`config`]: environment-driven configuration
//!
//! # Example
//!
//! ```
//! use bucket_grid_core::{BucketShape, Grid, ReachabilityAnalyzer, StaticPiece, TallyScorer};
//! use bucket_grid_core::types::Point3;
//!
//! let mut grid = Grid::new(BucketShape::Classic { width: 4, height: 6 }).unwrap();
//! let mut scorer = TallyScorer::default();
//!
//! // Lay a 4-wide bar on the floor: it completes the bottom row.
//! let bar: Vec<Point3> = (0..4).map(|dx| Point3::flat(dx, 0)).collect();
//! let piece = StaticPiece::mint(grid.registry_mut(), Point3::flat(1, 5), &bar);
//! grid.merge_piece_into_grid(&piece, &mut scorer);
//!
//! assert!(grid.can_compress());
//! assert!(grid.drop_bottommost_full_row(&mut scorer));
//! assert_eq!(scorer.rows_cleared, 1);
//! assert_eq!(scorer.homogeneous_rows, 1);
//!
//! let report = ReachabilityAnalyzer::default().analyze(&grid, &[]);
//! assert_eq!(report.unreachable, 0);
//! ```

pub mod bucket;
pub mod compact;
pub mod config;
pub mod diag;
pub mod error;
pub mod grid;
pub mod orient;
pub mod piece;
pub mod reach;
pub mod registry;
pub mod scorer;
pub mod snapshot;

pub use bucket_grid_types as types;

// Re-export commonly used types for convenience
pub use bucket::{BucketGeometry, BucketShape};
pub use config::{GridConfig, ShapeKind};
pub use error::GridError;
pub use grid::Grid;
pub use piece::{Piece, StaticPiece};
pub use reach::{ReachCounts, ReachabilityAnalyzer, ReachabilityReport, ScratchPool};
pub use registry::Registry;
pub use scorer::{NullScorer, Scorer, TallyScorer};
pub use snapshot::GridSnapshot;
