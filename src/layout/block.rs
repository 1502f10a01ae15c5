use kurbo::Shape as _;

use crate::foundation::core::{Point, Rect, RoundedRect, Rgb, Size, Vec2};
use crate::foundation::ids::BlockId;
use crate::layout::infer::ResultType;
use crate::transform::address::StructuralAddress;

/// Presentation tint used for drag feedback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tint {
    #[default]
    Static,
    Dragging,
    Mismatch,
    Match,
}

impl Tint {
    pub fn rgb(self) -> Rgb {
        match self {
            Tint::Static => Rgb(0xffffff),
            Tint::Dragging => Rgb(0xdddddd),
            Tint::Mismatch => Rgb(0xf56c6c),
            Tint::Match => Rgb(0x67c23a),
        }
    }
}

/// Mutable drag-feedback state. Never affects geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Highlight {
    /// Collision ring around a leaf.
    pub ring: Tint,
    /// Ring opacity; the ring is invisible until a collision is reported.
    pub ring_alpha: f64,
    /// Drag background of a branch.
    pub background: Tint,
    /// Drag handle dot of a branch.
    pub handle: Tint,
}

/// Geometry of an atom, in block-local coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LeafShape {
    /// Outer collision ring; equals the block bounds.
    pub ring: Rect,
    pub background: Rect,
    /// Region a dragged handle must enter to hit this leaf.
    pub check_area: Rect,
    pub label: String,
    pub label_center: Point,
}

/// Layout algorithm of a composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    /// Two slots around an infix glyph.
    Infix,
    /// Label on the left, slots stacked top to bottom.
    Stacked,
}

/// A cut-out in a branch's event layer where one child receives pointer events.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Hole {
    pub rect: Rect,
    /// Type of the child in this slot; decides the cut-out's corner radius.
    pub child_type: ResultType,
}

/// Geometry of an operator or function call, in block-local coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BranchShape {
    pub arrangement: Arrangement,
    pub background: Rect,
    /// Pointer-capturing layer; the holes are subtracted from it.
    pub event_layer: Rect,
    pub holes: Vec<Hole>,
    pub handle_center: Point,
    pub handle_radius: f64,
    pub label: String,
    pub label_center: Point,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockShape {
    Leaf(LeafShape),
    Branch(BranchShape),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BlockFlags {
    pub is_leaf: bool,
    pub is_root: bool,
    pub is_template: bool,
}

/// One expression node on screen.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VisualBlock {
    pub id: BlockId,
    pub parent: Option<BlockId>,
    pub children: Vec<BlockId>,
    /// Position of this block's origin relative to its parent's origin (or the tree origin).
    pub offset: Vec2,
    pub size: Size,
    pub shape: BlockShape,
    /// Slot type for leaves, produced type for branches.
    pub result_type: ResultType,
    pub flags: BlockFlags,
    /// Canonical text of the node this block renders.
    pub expression: String,
    pub address: StructuralAddress,
    pub highlight: Highlight,
}

impl VisualBlock {
    pub fn is_leaf(&self) -> bool {
        self.flags.is_leaf
    }

    pub fn local_bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.size)
    }

    pub fn leaf_shape(&self) -> Option<&LeafShape> {
        match &self.shape {
            BlockShape::Leaf(s) => Some(s),
            BlockShape::Branch(_) => None,
        }
    }

    pub fn branch_shape(&self) -> Option<&BranchShape> {
        match &self.shape {
            BlockShape::Branch(s) => Some(s),
            BlockShape::Leaf(_) => None,
        }
    }

    /// Leaf only; branches ignore it.
    pub fn set_collision_tint(&mut self, tint: Tint, alpha: f64) {
        if self.is_leaf() {
            self.highlight.ring = tint;
            self.highlight.ring_alpha = alpha;
        }
    }

    /// Branch only; leaves ignore it.
    pub fn set_background_tint(&mut self, tint: Tint) {
        if !self.is_leaf() {
            self.highlight.background = tint;
        }
    }

    /// Branch only; leaves ignore it.
    pub fn set_handle_tint(&mut self, tint: Tint) {
        if !self.is_leaf() {
            self.highlight.handle = tint;
        }
    }

    /// Does the event layer (minus its holes) capture `local`?
    pub fn event_layer_contains(&self, local: Point) -> bool {
        let Some(shape) = self.branch_shape() else {
            return false;
        };
        let outer = RoundedRect::from_rect(
            shape.event_layer,
            self.result_type.corner_radius(shape.event_layer.height()),
        );
        if !outer.contains(local) {
            return false;
        }
        !shape.holes.iter().any(|h| {
            RoundedRect::from_rect(h.rect, h.child_type.corner_radius(h.rect.height()))
                .contains(local)
        })
    }
}

/// Arena of blocks produced by one layout pass.
///
/// Ids are assigned in post-order, so children always precede their parent and the root is last.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BlockTree {
    blocks: Vec<VisualBlock>,
    root: BlockId,
    origin: Point,
    leaves: Vec<BlockId>,
    branches: Vec<BlockId>,
}

impl BlockTree {
    pub(crate) fn from_parts(
        blocks: Vec<VisualBlock>,
        root: BlockId,
        leaves: Vec<BlockId>,
        branches: Vec<BlockId>,
    ) -> Self {
        Self {
            blocks,
            root,
            origin: Point::ORIGIN,
            leaves,
            branches,
        }
    }

    pub fn root(&self) -> &VisualBlock {
        &self.blocks[self.root.index()]
    }

    pub fn root_id(&self) -> BlockId {
        self.root
    }

    pub fn get(&self, id: BlockId) -> Option<&VisualBlock> {
        self.blocks.get(id.index())
    }

    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut VisualBlock> {
        self.blocks.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualBlock> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Atom blocks in left-to-right visiting order.
    pub fn leaves(&self) -> &[BlockId] {
        &self.leaves
    }

    /// Composite blocks in completion (post-) order.
    pub fn branches(&self) -> &[BlockId] {
        &self.branches
    }

    /// Canonical text of the whole expression.
    pub fn expression(&self) -> &str {
        &self.root().expression
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn set_template(&mut self, is_template: bool) {
        for b in &mut self.blocks {
            b.flags.is_template = is_template;
        }
    }

    /// Reset every highlight to neutral.
    pub fn clear_highlights(&mut self) {
        for b in &mut self.blocks {
            b.highlight = Highlight::default();
        }
    }

    /// Origin of `id` in the tree's coordinate space (tree origin included).
    pub fn block_origin(&self, id: BlockId) -> Option<Point> {
        let mut p = self.origin;
        let mut cur = Some(id);
        while let Some(c) = cur {
            let b = self.get(c)?;
            p += b.offset;
            cur = b.parent;
        }
        Some(p)
    }

    pub fn block_bounds(&self, id: BlockId) -> Option<Rect> {
        let b = self.get(id)?;
        Some(Rect::from_origin_size(self.block_origin(id)?, b.size))
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin + self.root().offset, self.root().size)
    }

    /// Leaf check area in the tree's coordinate space.
    pub fn check_area(&self, id: BlockId) -> Option<Rect> {
        let shape = self.get(id)?.leaf_shape()?;
        Some(shape.check_area + self.block_origin(id)?.to_vec2())
    }

    /// Branch drag-handle center in the tree's coordinate space.
    pub fn handle_center(&self, id: BlockId) -> Option<Point> {
        let shape = self.get(id)?.branch_shape()?;
        Some(shape.handle_center + self.block_origin(id)?.to_vec2())
    }

    /// Branch whose event layer captures `point`.
    ///
    /// Holes pass events through to the child in the slot, so at most one branch matches. Leaves
    /// never capture events.
    pub fn hit_test(&self, point: Point) -> Option<BlockId> {
        self.hit_test_from(self.root, point - self.origin.to_vec2())
    }

    fn hit_test_from(&self, id: BlockId, parent_local: Point) -> Option<BlockId> {
        let b = self.get(id)?;
        let local = parent_local - b.offset;
        if !b.local_bounds().contains(local) {
            return None;
        }
        for &child in b.children.iter().rev() {
            if let Some(hit) = self.hit_test_from(child, local) {
                return Some(hit);
            }
        }
        b.event_layer_contains(local).then_some(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/block.rs"]
mod tests;
