use crate::foundation::core::{Point, Vec2};

/// Screen split into a palette column on the left and a scrollable canvas on the right.
///
/// "Global" coordinates are screen coordinates. Palette and canvas content each have their own
/// unscrolled space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub palette_width: f64,
    pub palette_scroll: Vec2,
    pub canvas_scroll: Vec2,
}

impl Viewport {
    pub fn new(palette_width: f64) -> Self {
        Self {
            palette_width,
            palette_scroll: Vec2::ZERO,
            canvas_scroll: Vec2::ZERO,
        }
    }

    pub fn is_over_palette(&self, global: Point) -> bool {
        global.x < self.palette_width
    }

    pub fn palette_to_global(&self, p: Point) -> Point {
        p - self.palette_scroll
    }

    pub fn global_to_palette(&self, p: Point) -> Point {
        p + self.palette_scroll
    }

    pub fn canvas_to_global(&self, p: Point) -> Point {
        Point::new(
            self.palette_width + p.x - self.canvas_scroll.x,
            p.y - self.canvas_scroll.y,
        )
    }

    pub fn global_to_canvas(&self, p: Point) -> Point {
        Point::new(
            p.x + self.canvas_scroll.x - self.palette_width,
            p.y + self.canvas_scroll.y,
        )
    }

    /// Canvas shift applied to every canvas-space rectangle when drawn on screen.
    pub fn canvas_offset(&self) -> Vec2 {
        Vec2::new(self.palette_width, 0.0) - self.canvas_scroll
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/viewport.rs"]
mod tests;
