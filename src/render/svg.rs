use std::fmt::Write as _;

use crate::render::scene::{DisplayList, Primitive};

/// Serialize a display list as a standalone SVG document.
pub fn to_svg(list: &DisplayList) -> String {
    let mut out = String::new();
    let w = list.size.width;
    let h = list.size.height;
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    for item in &list.items {
        match item {
            Primitive::RoundRect {
                rect,
                radius,
                fill,
                opacity,
            } => {
                let _ = write!(
                    out,
                    r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}""#,
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height(),
                    radius,
                    fill.to_hex()
                );
                if *opacity < 1.0 {
                    let _ = write!(out, r#" fill-opacity="{opacity}""#);
                }
                out.push_str("/>\n");
            }
            Primitive::Circle {
                center,
                radius,
                fill,
            } => {
                let _ = writeln!(
                    out,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    center.x,
                    center.y,
                    radius,
                    fill.to_hex()
                );
            }
            Primitive::Label {
                text,
                center,
                size_px,
                color,
            } => {
                if text.is_empty() {
                    continue;
                }
                let _ = writeln!(
                    out,
                    r#"  <text x="{}" y="{}" font-family="sans-serif" font-size="{}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                    center.x,
                    center.y,
                    size_px,
                    color.to_hex(),
                    escape(text)
                );
            }
            Primitive::Line {
                from,
                to,
                width,
                color,
            } => {
                let _ = writeln!(
                    out,
                    r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    color.to_hex(),
                    width
                );
            }
        }
    }
    out.push_str("</svg>\n");
    out
}

fn escape(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            c => s.push(c),
        }
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
