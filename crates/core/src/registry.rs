//! Cell identity registry - maps cell ids to semantic categories
//!
//! Static ids (one per [`CellCategory`]) classify without any lookup. Dynamic ids
//! are minted here per piece; block-instance ids are minted from the same counter
//! but never bound, since only the content layer is ever classified.
//!
//! Classification is total:
//!
//! - static id → its category
//! - bound dynamic id → the bound category
//! - released dynamic id → `RetiredPiece`
//! - anything else → diagnostic + `BucketExterior` (occupied, non-collapsible)

use std::collections::{HashMap, HashSet};

use crate::diag;
use crate::types::{CellCategory, CellId};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    bound: HashMap<CellId, CellCategory>,
    released: HashSet<CellId>,
    next: u128,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static id for a category; stable across calls and registries
    pub fn static_id(category: CellCategory) -> CellId {
        CellId::of(category)
    }

    fn next_raw(&mut self) -> CellId {
        let id = CellId::from_raw(CellId::DYNAMIC_BASE + self.next);
        self.next += 1;
        id
    }

    /// Mint a dynamic id bound to `category`
    pub fn mint(&mut self, category: CellCategory) -> CellId {
        let id = self.next_raw();
        self.bound.insert(id, category);
        id
    }

    /// Mint an unbound per-block instance id (block layer only)
    pub fn mint_block(&mut self) -> CellId {
        self.next_raw()
    }

    /// Bind (or rebind) a dynamic id. Static ids are fixed and ignored.
    pub fn bind(&mut self, id: CellId, category: CellCategory) {
        if id.is_static() {
            return;
        }
        self.released.remove(&id);
        self.bound.insert(id, category);
    }

    pub fn is_bound(&self, id: CellId) -> bool {
        id.static_category().is_some() || self.bound.contains_key(&id)
    }

    /// Rebind a piece id as retired material
    pub fn retire(&mut self, id: CellId) {
        self.bind(id, CellCategory::RetiredPiece);
    }

    /// Drop a binding; the id keeps classifying as retired material
    pub fn release(&mut self, id: CellId) {
        if self.bound.remove(&id).is_some() {
            self.released.insert(id);
        }
    }

    /// Drop every record of a dynamic id whose cells are all gone
    pub fn forget(&mut self, id: CellId) {
        self.bound.remove(&id);
        self.released.remove(&id);
    }

    /// Dynamic ids currently bound or released
    pub fn dynamic_count(&self) -> usize {
        self.bound.len() + self.released.len()
    }

    /// Forget every dynamic id (grid reset)
    pub fn clear_dynamic(&mut self) {
        self.bound.clear();
        self.released.clear();
    }

    pub fn classify(&self, id: CellId) -> CellCategory {
        if let Some(category) = id.static_category() {
            return category;
        }
        if let Some(&category) = self.bound.get(&id) {
            return category;
        }
        if self.released.contains(&id) {
            return CellCategory::RetiredPiece;
        }
        diag!("Registry", "unregistered cell id {}; treating as exterior", id);
        CellCategory::BucketExterior
    }

    pub fn is_empty(&self, id: CellId) -> bool {
        matches!(
            self.classify(id),
            CellCategory::Empty | CellCategory::UnreachableMarker
        )
    }

    pub fn is_occupied(&self, id: CellId) -> bool {
        !self.is_empty(id)
    }

    /// Cells that count toward a full row
    pub fn is_collapsible(&self, id: CellId) -> bool {
        matches!(
            self.classify(id),
            CellCategory::BucketWall
                | CellCategory::InvisibleBucketWall
                | CellCategory::RetiredPiece
        )
    }

    /// Cells a falling block (or a flood fill) may move into
    pub fn is_valid_neighbor(&self, id: CellId) -> bool {
        let category = self.classify(id);
        matches!(
            category,
            CellCategory::Empty | CellCategory::UnreachableMarker
        ) || category.is_hazard()
    }
}
