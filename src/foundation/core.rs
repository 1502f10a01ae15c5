pub use kurbo::{Point, Rect, RoundedRect, Size, Vec2};

/// Straight-alpha RGB color stored as `0xRRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Pure white; the "no tint" value.
    pub const WHITE: Rgb = Rgb(0xffffff);
    /// Black, used for labels.
    pub const BLACK: Rgb = Rgb(0x000000);

    /// Red channel.
    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    /// Green channel.
    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    /// Blue channel.
    pub fn b(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// CSS hex notation, `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }

    /// Channel-wise multiply, the way a display tint modulates a fill.
    pub fn tinted(self, tint: Rgb) -> Rgb {
        fn mul(a: u8, b: u8) -> u32 {
            ((u32::from(a) * u32::from(b)) + 127) / 255
        }
        Rgb((mul(self.r(), tint.r()) << 16)
            | (mul(self.g(), tint.g()) << 8)
            | mul(self.b(), tint.b()))
    }
}

/// Return `true` when every coordinate of `r` is finite.
pub(crate) fn rect_is_finite(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

/// `inner` lies fully within `outer` (edges may touch).
#[cfg(test)]
pub(crate) fn rect_contains_rect(outer: Rect, inner: Rect) -> bool {
    const EPS: f64 = 1e-9;
    inner.x0 >= outer.x0 - EPS
        && inner.y0 >= outer.y0 - EPS
        && inner.x1 <= outer.x1 + EPS
        && inner.y1 <= outer.y1 + EPS
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
