use crate::foundation::core::{Point, Rect};
use crate::foundation::ids::{BlockId, PlacedId};
use crate::interaction::placed::PlacedExpressions;
use crate::layout::block::BlockTree;
use crate::layout::walker::LayoutEngine;

/// A leaf on the canvas, named by its owner and its block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct LeafRef {
    pub placed: PlacedId,
    pub block: BlockId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasEntry {
    pub id: PlacedId,
    /// Laid out with its origin at the placed expression's canvas origin.
    pub tree: BlockTree,
}

/// Every placed expression laid out, plus the leaf index used for collisions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasLayout {
    entries: Vec<CanvasEntry>,
    leaves: Vec<LeafRef>,
    skipped: Vec<PlacedId>,
}

impl CanvasLayout {
    /// Lay out all of `placed`. An expression that fails to lay out is left off the canvas
    /// and listed in [`CanvasLayout::skipped`].
    #[tracing::instrument(skip_all, fields(placed = placed.len()))]
    pub fn build(placed: &PlacedExpressions, engine: &mut LayoutEngine) -> Self {
        let mut entries = Vec::with_capacity(placed.len());
        let mut leaves = Vec::new();
        let mut skipped = Vec::new();
        for (id, p) in placed.iter() {
            let mut tree = match engine.layout(&p.expression) {
                Ok(tree) => tree,
                Err(e) => {
                    tracing::warn!(%id, expression = %p.expression, error = %e, "expression skipped");
                    skipped.push(id);
                    continue;
                }
            };
            tree.set_origin(p.origin);
            leaves.extend(tree.leaves().iter().map(|&block| LeafRef { placed: id, block }));
            entries.push(CanvasEntry { id, tree });
        }
        Self {
            entries,
            leaves,
            skipped,
        }
    }

    /// Bottom to top.
    pub fn entries(&self) -> &[CanvasEntry] {
        &self.entries
    }

    pub fn get(&self, id: PlacedId) -> Option<&BlockTree> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.tree)
    }

    pub fn get_mut(&mut self, id: PlacedId) -> Option<&mut BlockTree> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.tree)
    }

    /// Placed expressions that did not lay out, bottom to top.
    pub fn skipped(&self) -> &[PlacedId] {
        &self.skipped
    }

    /// All leaves: placed expressions bottom to top, each in left-to-right order.
    pub fn leaves(&self) -> &[LeafRef] {
        &self.leaves
    }

    /// Check area of a leaf in canvas space.
    pub fn check_area(&self, leaf: LeafRef) -> Option<Rect> {
        self.get(leaf.placed)?.check_area(leaf.block)
    }

    /// Topmost branch capturing `point` (canvas space).
    pub fn hit_test(&self, point: Point) -> Option<(PlacedId, BlockId)> {
        self.entries
            .iter()
            .rev()
            .find_map(|e| e.tree.hit_test(point).map(|b| (e.id, b)))
    }

    pub fn clear_highlights(&mut self) {
        for e in &mut self.entries {
            e.tree.clear_highlights();
        }
    }

    /// Union of every entry's bounds; `None` for an empty canvas.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.entries
            .iter()
            .map(|e| e.tree.bounds())
            .reduce(|a, b| a.union(b))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/canvas.rs"]
mod tests;
