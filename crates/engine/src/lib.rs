//! Automated-player placement search
//!
//! Builds on [`bucket_grid_core`]: enumerates every resting position of a
//! footprint, scores each with a hypothetical reachability pass, and commits the
//! winner. Piece shapes are supplied by the caller as rotation footprints.
//!
//! # Example
//!
//! ```
//! use bucket_grid_core::{BucketShape, Grid, TallyScorer};
//! use bucket_grid_core::types::Point3;
//! use bucket_grid_engine::PlacementPlanner;
//!
//! let mut grid = Grid::new(BucketShape::Classic { width: 4, height: 6 }).unwrap();
//! let bar: [Point3; 4] = [
//!     Point3::flat(0, 0),
//!     Point3::flat(1, 0),
//!     Point3::flat(2, 0),
//!     Point3::flat(3, 0),
//! ];
//!
//! let planner = PlacementPlanner::default();
//! let mut scorer = TallyScorer::default();
//! let placed = planner.place_best(&mut grid, &[&bar], &mut scorer).unwrap();
//! assert!(placed.cleared);
//! ```

pub mod entry;
pub mod place;

pub use bucket_grid_core as core;
pub use bucket_grid_types as types;

pub use entry::{widest_entry_gap, EntryGap};
pub use place::{
    enumerate, fits, landing, Candidate, Footprint, PlaceError, PlacedPiece, PlacementPlanner,
    PlacementWeights, Scored,
};
