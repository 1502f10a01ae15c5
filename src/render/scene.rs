use crate::foundation::config::GeometryConfig;
use crate::foundation::core::{Point, Rect, Rgb, Size, Vec2, rect_is_finite};
use crate::foundation::ids::BlockId;
use crate::interaction::session::Session;
use crate::layout::block::{BlockShape, BlockTree};

/// Fill of block backgrounds behind the slots.
pub const BACKGROUND_FILL: Rgb = Rgb(0xdddddd);
/// Palette/canvas divider.
pub const DIVIDER_COLOR: Rgb = Rgb(0xcecdce);

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    RoundRect {
        rect: Rect,
        radius: f64,
        fill: Rgb,
        opacity: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Rgb,
    },
    Label {
        text: String,
        center: Point,
        size_px: f64,
        color: Rgb,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Rgb,
    },
}

/// Back-to-front primitives on a surface of `size`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct DisplayList {
    pub size: Size,
    pub items: Vec<Primitive>,
}

impl DisplayList {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, p: Primitive) {
        self.items.push(p);
    }

    fn round_rect(&mut self, rect: Rect, radius: f64, fill: Rgb, opacity: f64) {
        if !rect_is_finite(rect) {
            tracing::warn!(?rect, "skipping non-finite rect");
            return;
        }
        self.push(Primitive::RoundRect {
            rect,
            radius,
            fill,
            opacity,
        });
    }

    /// Append every block of `tree`, parents before children, shifted by `offset`.
    pub fn push_tree(&mut self, tree: &BlockTree, offset: Vec2, geometry: &GeometryConfig) {
        self.push_block(tree, tree.root_id(), tree.origin() + offset, geometry);
    }

    fn push_block(
        &mut self,
        tree: &BlockTree,
        id: BlockId,
        parent_origin: Point,
        geometry: &GeometryConfig,
    ) {
        let Some(b) = tree.get(id) else {
            return;
        };
        let origin = parent_origin + b.offset;
        let at = origin.to_vec2();
        let ty = b.result_type;
        match &b.shape {
            BlockShape::Leaf(s) => {
                if b.highlight.ring_alpha > 0.0 {
                    self.round_rect(
                        s.ring + at,
                        ty.corner_radius(s.ring.height()),
                        Rgb::WHITE.tinted(b.highlight.ring.rgb()),
                        b.highlight.ring_alpha,
                    );
                }
                self.round_rect(
                    s.background + at,
                    ty.corner_radius(s.background.height()),
                    BACKGROUND_FILL,
                    1.0,
                );
                self.round_rect(
                    s.check_area + at,
                    ty.corner_radius(s.check_area.height()),
                    Rgb::WHITE,
                    1.0,
                );
                self.push(Primitive::Label {
                    text: s.label.clone(),
                    center: s.label_center + at,
                    size_px: geometry.label_font_px,
                    color: Rgb::BLACK,
                });
            }
            BlockShape::Branch(s) => {
                self.round_rect(
                    s.background + at,
                    ty.corner_radius(s.background.height()),
                    BACKGROUND_FILL,
                    1.0,
                );
                self.round_rect(
                    s.event_layer + at,
                    ty.corner_radius(s.event_layer.height()),
                    Rgb::WHITE.tinted(b.highlight.background.rgb()),
                    1.0,
                );
                for &child in &b.children {
                    self.push_block(tree, child, origin, geometry);
                }
                self.push(Primitive::Label {
                    text: s.label.clone(),
                    center: s.label_center + at,
                    size_px: geometry.op_font_px,
                    color: Rgb::BLACK,
                });
                self.push(Primitive::Circle {
                    center: s.handle_center + at,
                    radius: s.handle_radius,
                    fill: Rgb::WHITE.tinted(b.highlight.handle.rgb()),
                });
            }
        }
    }
}

/// A single expression with `margin` around it.
pub fn tree_scene(tree: &BlockTree, geometry: &GeometryConfig, margin: f64) -> DisplayList {
    let bounds = tree.bounds();
    let mut list = DisplayList::new(Size::new(
        bounds.width() + 2.0 * margin,
        bounds.height() + 2.0 * margin,
    ));
    let offset = Vec2::new(margin - bounds.x0, margin - bounds.y0);
    list.push_tree(tree, offset, geometry);
    list
}

/// Everything a session shows on a `size` screen: palette, divider, canvas, then the dragged
/// block on top.
pub fn session_scene(session: &Session, size: Size) -> DisplayList {
    let geometry = &session.config().geometry;
    let viewport = session.viewport();
    let mut list = DisplayList::new(size);

    list.round_rect(
        Rect::new(0.0, 0.0, viewport.palette_width, size.height),
        0.0,
        Rgb::WHITE,
        1.0,
    );
    for template in session.palette().templates() {
        list.push_tree(template, -viewport.palette_scroll, geometry);
    }
    list.push(Primitive::Line {
        from: Point::new(viewport.palette_width, 0.0),
        to: Point::new(viewport.palette_width, size.height),
        width: 1.0,
        color: DIVIDER_COLOR,
    });

    let lifted = session.drag().and_then(|d| d.owner());
    for entry in session.canvas().entries() {
        // a root being dragged is drawn only at the pointer
        if Some(entry.id) == lifted {
            continue;
        }
        list.push_tree(&entry.tree, viewport.canvas_offset(), geometry);
    }
    if let Some(drag) = session.drag() {
        list.push_tree(drag.tree(), Vec2::ZERO, geometry);
    }
    list
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
