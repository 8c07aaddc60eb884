//! Bucket grid (workspace facade crate).
//!
//! Re-exports the member crates under one stable path:
//! `bucket_grid::{types, core, engine}`. The implementation lives in the
//! dedicated crates under `crates/`.

pub use bucket_grid_core as core;
pub use bucket_grid_engine as engine;
pub use bucket_grid_types as types;
