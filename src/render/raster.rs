use std::io::Cursor;

use anyhow::Context as _;

use crate::foundation::error::{BlocksError, BlocksResult};

/// Keep accidental huge canvases from allocating gigabytes.
const MAX_DIM: u32 = 16_384;

/// Rasterize an SVG document at `scale` into straight-alpha RGBA.
pub fn rasterize_svg(svg: &str, scale: f32) -> BlocksResult<image::RgbaImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(BlocksError::config("raster scale must be finite and > 0"));
    }
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let opts = usvg::Options {
        fontdb: std::sync::Arc::new(db),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;

    let size = tree.size();
    let w = (size.width() * scale).ceil().max(1.0) as u32;
    let h = (size.height() * scale).ceil().max(1.0) as u32;
    if w > MAX_DIM || h > MAX_DIM {
        return Err(BlocksError::config(format!(
            "raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| anyhow::anyhow!("failed to allocate {w}x{h} pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut rgba = pixmap.take();
    demultiply_rgba8_in_place(&mut rgba);
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| anyhow::anyhow!("pixmap size does not match {w}x{h}"))?;
    Ok(img)
}

/// Rasterize and encode as PNG.
#[tracing::instrument(skip(svg), fields(len = svg.len()))]
pub fn svg_to_png(svg: &str, scale: f32) -> BlocksResult<Vec<u8>> {
    let img = rasterize_svg(svg, scale)?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
