//! Piece collaborator - anything that can report where its blocks are
//!
//! The grid only ever reads a piece's locations; it never moves or mutates it.

use crate::registry::Registry;
use crate::types::{CellCategory, CellId, Point3};

pub trait Piece {
    /// Piece identity written into the content layer on merge
    fn id(&self) -> CellId;

    /// Absolute cell positions with their per-block instance ids
    fn current_locations(&self) -> Vec<(Point3, CellId)>;
}

/// A piece with a fixed set of blocks that can be translated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPiece {
    id: CellId,
    blocks: Vec<(Point3, CellId)>,
}

impl StaticPiece {
    /// Mint a new active piece: one piece id plus one block id per offset
    pub fn mint(registry: &mut Registry, origin: Point3, offsets: &[Point3]) -> Self {
        let id = registry.mint(CellCategory::ActivePiece);
        let blocks = offsets
            .iter()
            .map(|&offset| (origin + offset, registry.mint_block()))
            .collect();
        Self { id, blocks }
    }

    /// Build from already-minted ids
    pub fn from_parts(id: CellId, blocks: Vec<(Point3, CellId)>) -> Self {
        Self { id, blocks }
    }

    pub fn translate(&mut self, delta: Point3) {
        for (p, _) in &mut self.blocks {
            *p = *p + delta;
        }
    }

    pub fn translated(&self, delta: Point3) -> Self {
        let mut moved = self.clone();
        moved.translate(delta);
        moved
    }

    pub fn cells(&self) -> impl Iterator<Item = Point3> + '_ {
        self.blocks.iter().map(|&(p, _)| p)
    }
}

impl Piece for StaticPiece {
    fn id(&self) -> CellId {
        self.id
    }

    fn current_locations(&self) -> Vec<(Point3, CellId)> {
        self.blocks.clone()
    }
}
