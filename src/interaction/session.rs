use crate::expression::parse;
use crate::foundation::config::BlocksConfig;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{BlocksError, BlocksResult};
use crate::foundation::ids::{BlockId, PlacedId};
use crate::interaction::canvas::{CanvasLayout, LeafRef};
use crate::interaction::palette::Palette;
use crate::interaction::placed::{PlacedExpression, PlacedExpressions};
use crate::interaction::viewport::Viewport;
use crate::layout::block::{BlockTree, Tint};
use crate::layout::measure::{TextMeasure, measure_from_config};
use crate::layout::walker::LayoutEngine;
use crate::transform::rewrite::transform;

/// Where a drag was started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragSource {
    /// A palette entry; cloned, never consumed.
    Template { index: usize },
    /// A branch of a placed expression.
    Canvas { placed: PlacedId, block: BlockId },
}

/// Leaf currently under the drag handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Collision {
    pub leaf: LeafRef,
    /// Leaf slot type equals the dragged block's type.
    pub matched: bool,
}

/// The block being dragged.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    /// Laid out on its own, with its origin in global coordinates.
    tree: BlockTree,
    /// Placed expression the dragged block still belongs to (whole-root drags only).
    owner: Option<PlacedId>,
    /// Pointer position relative to the block origin at drag start.
    grab: Vec2,
    /// Latest pointer sample not yet applied by a frame.
    pending: Option<Point>,
    collision: Option<Collision>,
}

impl DragState {
    pub fn tree(&self) -> &BlockTree {
        &self.tree
    }

    pub fn expression(&self) -> &str {
        self.tree.expression()
    }

    pub fn owner(&self) -> Option<PlacedId> {
        self.owner
    }

    /// Global position of the dragged block as of the last applied frame.
    pub fn position(&self) -> Point {
        self.tree.origin()
    }

    pub fn collision(&self) -> Option<Collision> {
        self.collision
    }
}

/// Result of ending a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    /// Released over the palette; the owner of the dragged block, if it had one, is gone.
    Deleted { removed: Option<PlacedId> },
    /// Became a new top-level expression.
    Placed { id: PlacedId },
    /// Spliced into the leaf of `target`, which was replaced by `id`.
    Merged { target: PlacedId, id: PlacedId },
    /// Nothing was being dragged, or the drop was abandoned.
    Aborted,
}

/// Pointer input, as recorded by a host or a replay script.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    /// Animation frame boundary.
    Frame,
    Up { x: f64, y: f64 },
    Cancel,
    ScrollCanvas { x: f64, y: f64 },
    ScrollPalette { x: f64, y: f64 },
}

/// Interactive editing state: palette, placed expressions, their layout and the active drag.
///
/// Every mutation goes through a method here. Edits to the placed collection are staged on a copy
/// and only committed once the whole canvas lays out again, so a failed edit leaves the previous
/// state in place.
pub struct Session {
    config: BlocksConfig,
    engine: LayoutEngine,
    palette: Palette,
    placed: PlacedExpressions,
    canvas: CanvasLayout,
    viewport: Viewport,
    drag: Option<DragState>,
    frame_pending: bool,
}

impl Session {
    /// Validate `config`, lay out the palette and start with an empty canvas.
    #[tracing::instrument(skip_all)]
    pub fn new(config: BlocksConfig) -> BlocksResult<Self> {
        let measure = measure_from_config(&config.measure)?;
        Self::with_measure(config, measure)
    }

    /// Like [`Session::new`] with a caller-supplied measurer.
    pub fn with_measure(
        config: BlocksConfig,
        measure: Box<dyn TextMeasure>,
    ) -> BlocksResult<Self> {
        config.validate()?;
        let mut engine = LayoutEngine::new(config.geometry.clone(), measure);
        let palette = Palette::build(&config.palette.templates, &mut engine)?;
        let viewport = Viewport::new(config.palette.width);
        Ok(Self {
            config,
            engine,
            palette,
            placed: PlacedExpressions::new(),
            canvas: CanvasLayout::default(),
            viewport,
            drag: None,
            frame_pending: false,
        })
    }

    pub fn config(&self) -> &BlocksConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn canvas(&self) -> &CanvasLayout {
        &self.canvas
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// A pointer move is waiting for [`Session::on_frame`].
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn expressions(&self) -> &PlacedExpressions {
        &self.placed
    }

    /// Direct access to the placed collection. Call [`Session::refresh`] afterwards.
    pub fn expressions_mut(&mut self) -> &mut PlacedExpressions {
        &mut self.placed
    }

    /// Add an expression in canonical form and relayout; nothing changes if it does not lay out.
    pub fn add_expression(
        &mut self,
        expression: impl AsRef<str>,
        origin: Point,
    ) -> BlocksResult<PlacedId> {
        let canonical = parse(expression.as_ref())?.to_canonical();
        let mut next = self.placed.clone();
        let id = next.add(PlacedExpression::new(canonical, origin));
        self.commit(next)?;
        Ok(id)
    }

    /// Relayout the canvas from the placed collection. Returns the expressions that did not
    /// lay out; they stay in the collection but are not drawn.
    #[tracing::instrument(skip(self))]
    pub fn refresh(&mut self) -> &[PlacedId] {
        self.canvas = CanvasLayout::build(&self.placed, &mut self.engine);
        self.canvas.skipped()
    }

    pub fn set_canvas_scroll(&mut self, scroll: Vec2) {
        self.viewport.canvas_scroll = scroll;
    }

    pub fn set_palette_scroll(&mut self, scroll: Vec2) {
        self.viewport.palette_scroll = scroll;
    }

    /// Drag source whose event layer captures the global point `at`.
    pub fn source_at(&self, at: Point) -> Option<DragSource> {
        if self.viewport.is_over_palette(at) {
            let (index, _) = self.palette.hit_test(self.viewport.global_to_palette(at))?;
            Some(DragSource::Template { index })
        } else {
            let (placed, block) = self.canvas.hit_test(self.viewport.global_to_canvas(at))?;
            Some(DragSource::Canvas { placed, block })
        }
    }

    /// Global point on the operator glyph of a source's branch, inside its event layer.
    pub fn grab_point(&self, source: DragSource) -> Option<Point> {
        match source {
            DragSource::Template { index } => {
                let tree = self.palette.get(index)?;
                let p = glyph_point(tree, tree.root_id())?;
                Some(self.viewport.palette_to_global(p))
            }
            DragSource::Canvas { placed, block } => {
                let p = glyph_point(self.canvas.get(placed)?, block)?;
                Some(self.viewport.canvas_to_global(p))
            }
        }
    }

    /// Start a drag at whatever branch lies under `at`.
    #[tracing::instrument(skip(self))]
    pub fn pointer_down(&mut self, at: Point) -> BlocksResult<Option<DragSource>> {
        if self.drag.is_some() {
            tracing::debug!("drag already active; pointer down ignored");
            return Ok(None);
        }
        let Some(source) = self.source_at(at) else {
            return Ok(None);
        };
        Ok(self.begin_drag(source, at)?.then_some(source))
    }

    /// Start dragging `source` with the pointer at `at`. Returns `false` when nothing started.
    ///
    /// Pulling a non-root branch out of a placed expression leaves a placeholder of the branch's
    /// type behind and commits that edit immediately.
    #[tracing::instrument(skip(self))]
    pub fn begin_drag(&mut self, source: DragSource, at: Point) -> BlocksResult<bool> {
        if self.drag.is_some() {
            return Ok(false);
        }
        let (mut tree, owner, position) = match source {
            DragSource::Template { index } => {
                let Some(template) = self.palette.get(index) else {
                    tracing::debug!(index, "no such template");
                    return Ok(false);
                };
                let position = self.viewport.palette_to_global(template.origin());
                let expression = template.expression().to_owned();
                (self.engine.layout(&expression)?, None, position)
            }
            DragSource::Canvas { placed, block } => match self.detach(placed, block) {
                Ok(started) => started,
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(error = %e, "drag start abandoned");
                    return Ok(false);
                }
                Err(e) => return Err(e),
            },
        };

        tree.set_origin(position);
        let root = tree.root_id();
        if let Some(b) = tree.get_mut(root) {
            b.set_background_tint(Tint::Dragging);
        }
        tracing::debug!(expression = tree.expression(), ?owner, "drag started");
        self.drag = Some(DragState {
            tree,
            owner,
            grab: at - position,
            pending: None,
            collision: None,
        });
        Ok(true)
    }

    /// Record a pointer sample. Returns `true` when the host should schedule a frame; samples
    /// arriving while one is already scheduled replace the pending one.
    pub fn pointer_move(&mut self, at: Point) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        drag.pending = Some(at);
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Apply the latest pointer sample and refresh collision feedback.
    pub fn on_frame(&mut self) -> Option<Collision> {
        self.frame_pending = false;
        let drag = self.drag.as_mut()?;
        let at = drag.pending.take()?;
        drag.tree.set_origin(at - drag.grab);
        self.update_collision()
    }

    /// Finish the drag with the pointer released at `at`.
    #[tracing::instrument(skip(self))]
    pub fn pointer_up(&mut self, at: Point) -> BlocksResult<DropOutcome> {
        let Some(drag) = self.drag.as_mut() else {
            return Ok(DropOutcome::Aborted);
        };
        drag.pending = Some(at);
        self.finish_drag()
    }

    /// Finish the drag at the last known pointer position.
    #[tracing::instrument(skip(self))]
    pub fn pointer_cancel(&mut self) -> BlocksResult<DropOutcome> {
        self.finish_drag()
    }

    /// Feed one recorded event.
    pub fn dispatch(&mut self, event: PointerEvent) -> BlocksResult<Option<DropOutcome>> {
        match event {
            PointerEvent::Down { x, y } => {
                self.pointer_down(Point::new(x, y))?;
            }
            PointerEvent::Move { x, y } => {
                self.pointer_move(Point::new(x, y));
            }
            PointerEvent::Frame => {
                self.on_frame();
            }
            PointerEvent::Up { x, y } => return self.pointer_up(Point::new(x, y)).map(Some),
            PointerEvent::Cancel => return self.pointer_cancel().map(Some),
            PointerEvent::ScrollCanvas { x, y } => self.set_canvas_scroll(Vec2::new(x, y)),
            PointerEvent::ScrollPalette { x, y } => self.set_palette_scroll(Vec2::new(x, y)),
        }
        Ok(None)
    }

    fn detach(
        &mut self,
        placed: PlacedId,
        block: BlockId,
    ) -> BlocksResult<(BlockTree, Option<PlacedId>, Point)> {
        let missing = || BlocksError::MissingOwnerExpression(placed);
        let owner = self.placed.get(placed).ok_or_else(missing)?.clone();
        let tree = self.canvas.get(placed).ok_or_else(missing)?;
        let b = tree.get(block).ok_or_else(missing)?;
        let position = self
            .viewport
            .canvas_to_global(tree.block_origin(block).ok_or_else(missing)?);

        if b.flags.is_root {
            let mut whole = tree.clone();
            whole.clear_highlights();
            return Ok((whole, Some(placed), position));
        }

        let address = b.address.clone();
        let expression = b.expression.clone();
        let placeholder = b.result_type.placeholder();

        let edited = transform(&owner.expression, &address, placeholder)?;
        let detached = self.engine.layout(&expression)?;
        let mut next = self.placed.clone();
        next.add(PlacedExpression::new(edited, owner.origin));
        next.remove(placed);
        self.commit(next)?;
        Ok((detached, None, position))
    }

    fn finish_drag(&mut self) -> BlocksResult<DropOutcome> {
        // the slot is cleared before anything can fail
        let Some(mut drag) = self.drag.take() else {
            return Ok(DropOutcome::Aborted);
        };
        self.frame_pending = false;
        if let Some(at) = drag.pending.take() {
            drag.tree.set_origin(at - drag.grab);
        }
        self.canvas.clear_highlights();

        let position = drag.tree.origin();
        let mut next = self.placed.clone();
        let outcome = if self.viewport.is_over_palette(position) {
            DropOutcome::Deleted {
                removed: drag.owner.filter(|&id| next.contains(id)),
            }
        } else {
            match self.probe_collision(&drag) {
                Some(Collision {
                    leaf,
                    matched: true,
                }) => match self.merge_into(&mut next, leaf, drag.expression()) {
                    Ok(id) => DropOutcome::Merged {
                        target: leaf.placed,
                        id,
                    },
                    Err(e) if e.is_recoverable() => {
                        tracing::warn!(error = %e, "drop abandoned");
                        return Ok(DropOutcome::Aborted);
                    }
                    Err(e) => return Err(e),
                },
                _ => {
                    let c = self.viewport.global_to_canvas(position);
                    let origin = Point::new(c.x, c.y.max(self.config.canvas.min_drop_y));
                    let id = next.add(PlacedExpression::new(drag.expression(), origin));
                    DropOutcome::Placed { id }
                }
            }
        };
        if let Some(owner) = drag.owner {
            next.remove(owner);
        }
        self.commit(next)?;
        tracing::debug!(?outcome, "drag finished");
        Ok(outcome)
    }

    fn merge_into(
        &self,
        next: &mut PlacedExpressions,
        leaf: LeafRef,
        dragged: &str,
    ) -> BlocksResult<PlacedId> {
        let missing = || BlocksError::MissingOwnerExpression(leaf.placed);
        let target = next.get(leaf.placed).ok_or_else(missing)?.clone();
        let address = &self
            .canvas
            .get(leaf.placed)
            .and_then(|t| t.get(leaf.block))
            .ok_or_else(missing)?
            .address;
        let merged = transform(&target.expression, address, dragged)?;
        let id = next.add(PlacedExpression::new(merged, target.origin));
        next.remove(leaf.placed);
        Ok(id)
    }

    /// First leaf, in natural order, whose check area holds the drag handle center.
    fn probe_collision(&self, drag: &DragState) -> Option<Collision> {
        if self.viewport.is_over_palette(drag.tree.origin()) {
            return None;
        }
        let handle = drag.tree.handle_center(drag.tree.root_id())?;
        let probe = self.viewport.global_to_canvas(handle);
        let leaf = self
            .canvas
            .leaves()
            .iter()
            .copied()
            .filter(|l| Some(l.placed) != drag.owner)
            .find(|&l| self.canvas.check_area(l).is_some_and(|r| r.contains(probe)))?;
        let leaf_type = self.canvas.get(leaf.placed)?.get(leaf.block)?.result_type;
        Some(Collision {
            leaf,
            matched: leaf_type == drag.tree.root().result_type,
        })
    }

    fn update_collision(&mut self) -> Option<Collision> {
        self.canvas.clear_highlights();
        let collision = self.drag.as_ref().and_then(|d| self.probe_collision(d));
        let handle_tint = match collision {
            Some(c) => {
                let tint = if c.matched { Tint::Match } else { Tint::Mismatch };
                if let Some(b) = self
                    .canvas
                    .get_mut(c.leaf.placed)
                    .and_then(|t| t.get_mut(c.leaf.block))
                {
                    b.set_collision_tint(tint, 1.0);
                }
                tint
            }
            None => Tint::Static,
        };
        let drag = self.drag.as_mut()?;
        let root = drag.tree.root_id();
        if let Some(b) = drag.tree.get_mut(root) {
            b.set_handle_tint(handle_tint);
        }
        drag.collision = collision;
        collision
    }

    fn commit(&mut self, next: PlacedExpressions) -> BlocksResult<()> {
        // entries staged by this change must lay out; older ones may only be skipped
        for (_, p) in next.iter().filter(|(id, _)| !self.placed.contains(*id)) {
            self.engine.layout(&p.expression)?;
        }
        self.canvas = CanvasLayout::build(&next, &mut self.engine);
        self.placed = next;
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("placed", &self.placed)
            .field("viewport", &self.viewport)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

fn glyph_point(tree: &BlockTree, block: BlockId) -> Option<Point> {
    let shape = tree.get(block)?.branch_shape()?;
    Some(tree.block_origin(block)? + shape.label_center.to_vec2())
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/session.rs"]
mod tests;
