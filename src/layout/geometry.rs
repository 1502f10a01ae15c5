//! Per-node block geometry.
//!
//! Every function here is a pure function of its inputs: the same child sizes and labels always
//! produce identical rectangles.

use crate::foundation::config::GeometryConfig;
use crate::foundation::core::{Point, Rect, Size, Vec2};
use crate::layout::block::{Arrangement, BranchShape, Hole, LeafShape};
use crate::layout::infer::ResultType;
use crate::layout::measure::TextMeasure;

/// What a parent needs to know about an already-built child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ChildSlot {
    pub(crate) size: Size,
    pub(crate) is_leaf: bool,
    pub(crate) result_type: ResultType,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BranchGeometry {
    pub(crate) size: Size,
    pub(crate) shape: BranchShape,
    /// Child block origins relative to the branch origin, in operand order.
    pub(crate) child_offsets: Vec<Vec2>,
}

pub(crate) struct GeometryBuilder<'a> {
    cfg: &'a GeometryConfig,
    measure: &'a mut dyn TextMeasure,
}

impl<'a> GeometryBuilder<'a> {
    pub(crate) fn new(cfg: &'a GeometryConfig, measure: &'a mut dyn TextMeasure) -> Self {
        Self { cfg, measure }
    }

    /// Padded label box width, never below `min_text_width`.
    fn text_box_width(&self, measured: f64) -> f64 {
        let w = self.cfg.padding + measured + self.cfg.padding;
        w.max(self.cfg.min_text_width)
    }

    /// Atoms draw their own padding, so a slot holding one shrinks by it on every side.
    fn hole_size(&self, child: &ChildSlot) -> Size {
        if child.is_leaf {
            Size::new(
                child.size.width - self.cfg.padding * 2.0,
                child.size.height - self.cfg.padding * 2.0,
            )
        } else {
            child.size
        }
    }

    pub(crate) fn atomic(&mut self, label: &str) -> (Size, LeafShape) {
        let pad = self.cfg.padding;
        let line = self.cfg.line_width;

        let measured = self.measure.measure(label, self.cfg.label_font_px);
        let check = Size::new(self.text_box_width(measured), self.cfg.text_height);
        let inset = pad + line;
        let check_area = Rect::from_origin_size((inset, inset), check);

        let bg = Size::new(line + check.width + line, line + check.height + line);
        let background = Rect::from_origin_size((pad, pad), bg);

        let size = Size::new(pad + bg.width + pad, pad + bg.height + pad);
        let ring = Rect::from_origin_size(Point::ORIGIN, size);

        (
            size,
            LeafShape {
                ring,
                background,
                check_area,
                label: label.to_owned(),
                label_center: Point::new(size.width / 2.0, size.height / 2.0),
            },
        )
    }

    /// Infix layout: `[left] op [right]`, vertically centered.
    pub(crate) fn binary(
        &mut self,
        label: &str,
        left: &ChildSlot,
        right: &ChildSlot,
    ) -> BranchGeometry {
        let pad = self.cfg.padding;
        let line = self.cfg.line_width;
        let op_w = self.cfg.op_text_width;

        let l = self.hole_size(left);
        let r = self.hole_size(right);

        let width = l.width + op_w + r.width;
        let height = l.height.max(r.height);

        let event = Size::new(pad + width + pad, pad + height + pad);
        let bg = Size::new(line + event.width + line, line + event.height + line);

        // hole rects are relative to the event layer
        let left_hole = Rect::from_origin_size((pad, (event.height - l.height) / 2.0), l);
        let right_hole = Rect::from_origin_size(
            (pad + l.width + op_w, (event.height - r.height) / 2.0),
            r,
        );

        let left_offset = if left.is_leaf {
            Vec2::new(line, (line + height + line - l.height) / 2.0)
        } else {
            Vec2::new(line + left_hole.x0, line + left_hole.y0)
        };
        let right_offset = if right.is_leaf {
            Vec2::new(line + l.width + op_w, (line + height + line - r.height) / 2.0)
        } else {
            Vec2::new(line + right_hole.x0, line + right_hole.y0)
        };

        let event_origin = Vec2::new(line, line);
        BranchGeometry {
            size: bg,
            shape: BranchShape {
                arrangement: Arrangement::Infix,
                background: Rect::from_origin_size(Point::ORIGIN, bg),
                event_layer: Rect::from_origin_size(event_origin.to_point(), event),
                holes: vec![
                    Hole {
                        rect: left_hole + event_origin,
                        child_type: left.result_type,
                    },
                    Hole {
                        rect: right_hole + event_origin,
                        child_type: right.result_type,
                    },
                ],
                handle_center: Point::new(line + pad / 2.0, bg.height / 2.0),
                handle_radius: pad / 2.0,
                label: label.to_owned(),
                label_center: Point::new(line + pad + l.width + op_w / 2.0, bg.height / 2.0),
            },
            child_offsets: vec![left_offset, right_offset],
        }
    }

    /// Stacked layout: label column on the left, one slot per operand top to bottom.
    pub(crate) fn dynamic(&mut self, label: &str, children: &[ChildSlot]) -> BranchGeometry {
        let pad = self.cfg.padding;
        let line = self.cfg.line_width;

        let measured = self.measure.measure(label, self.cfg.op_font_px);
        let label_w = pad + self.text_box_width(measured);
        let hole_x = label_w;

        let mut holes = Vec::with_capacity(children.len());
        let mut child_offsets = Vec::with_capacity(children.len());
        let mut widest = 0.0f64;
        let mut last_hole_end = 0.0;
        for child in children {
            let hole = self.hole_size(child);
            let hole_y = pad + last_hole_end;
            last_hole_end += hole.height + pad;
            widest = widest.max(hole.width);

            let offset = if child.is_leaf {
                Vec2::new(label_w + line - pad, line + hole_y - pad)
            } else {
                Vec2::new(line + hole_x, line + hole_y)
            };
            child_offsets.push(offset);
            holes.push(Hole {
                rect: Rect::from_origin_size((hole_x, hole_y), hole),
                child_type: child.result_type,
            });
        }

        let width = label_w + widest;
        let height = (last_hole_end - pad).max(0.0);

        let event = Size::new(width + pad, pad + height + pad);
        let bg = Size::new(line + event.width + line, line + event.height + line);

        let event_origin = Vec2::new(line, line);
        for h in &mut holes {
            h.rect = h.rect + event_origin;
        }

        BranchGeometry {
            size: bg,
            shape: BranchShape {
                arrangement: Arrangement::Stacked,
                background: Rect::from_origin_size(Point::ORIGIN, bg),
                event_layer: Rect::from_origin_size(event_origin.to_point(), event),
                holes,
                handle_center: Point::new(line + pad, line + pad),
                handle_radius: pad / 2.0,
                label: label.to_owned(),
                label_center: Point::new(label_w / 2.0, bg.height / 2.0),
            },
            child_offsets,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
