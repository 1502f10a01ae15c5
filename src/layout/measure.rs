use std::path::Path;

use anyhow::Context as _;

use crate::foundation::config::MeasureConfig;
use crate::foundation::error::{BlocksError, BlocksResult};

/// Width of a single-line label, in pixels.
pub trait TextMeasure {
    fn measure(&mut self, text: &str, size_px: f64) -> f64;
}

/// Every character advances by `em * size_px`.
///
/// Font independent, so layouts are identical on every machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub em: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { em: 0.6 }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&mut self, text: &str, size_px: f64) -> f64 {
        text.chars().count() as f64 * self.em * size_px
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct MeasureBrush;

/// Shapes labels with a real font through Parley.
pub struct FontMeasure {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<MeasureBrush>,
    family_name: String,
}

impl FontMeasure {
    /// Register `font_bytes` and measure with its first family.
    pub fn from_bytes(font_bytes: &[u8]) -> BlocksResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| BlocksError::config("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BlocksError::config("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub fn from_path(path: &Path) -> BlocksResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(&bytes)
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }
}

impl TextMeasure for FontMeasure {
    fn measure(&mut self, text: &str, size_px: f64) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px as f32));
        builder.push_default(parley::style::StyleProperty::Brush(MeasureBrush));

        let mut layout: parley::Layout<MeasureBrush> = builder.build(text);
        layout.break_all_lines(None);
        f64::from(layout.width())
    }
}

/// Build the measurer selected by `cfg`.
pub fn measure_from_config(cfg: &MeasureConfig) -> BlocksResult<Box<dyn TextMeasure>> {
    match cfg {
        MeasureConfig::FixedAdvance { em } => Ok(Box::new(FixedAdvance { em: *em })),
        MeasureConfig::Font { path } => {
            let m = FontMeasure::from_path(path)?;
            tracing::debug!(family = m.family_name(), "font measurer ready");
            Ok(Box::new(m))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/measure.rs"]
mod tests;
