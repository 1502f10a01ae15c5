use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::Point;
use crate::foundation::error::{BlocksError, BlocksResult};

/// Top-level configuration for a [`Session`](crate::Session) and the layout pass.
///
/// Every field has a default, so an empty JSON object is a valid configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlocksConfig {
    /// Block geometry constants.
    pub geometry: GeometryConfig,
    /// Left-hand template palette.
    pub palette: PaletteConfig,
    /// Free-form canvas.
    pub canvas: CanvasConfig,
    /// Label measurement strategy.
    pub measure: MeasureConfig,
}

/// Pixel constants shared by every block shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeometryConfig {
    /// Height of an atom's check area.
    pub text_height: f64,
    /// Width reserved for an infix operator glyph.
    pub op_text_width: f64,
    /// Spacing unit between nested boxes.
    pub padding: f64,
    /// Outline width around every block.
    pub line_width: f64,
    /// Floor for any measured label box.
    pub min_text_width: f64,
    /// Font size of atom labels.
    pub label_font_px: f64,
    /// Font size of operator and function glyphs.
    pub op_font_px: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            text_height: 20.0,
            op_text_width: 26.0,
            padding: 4.0,
            line_width: 2.0,
            min_text_width: 26.0,
            label_font_px: 14.0,
            op_font_px: 16.0,
        }
    }
}

/// One palette entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateSpec {
    /// Expression instantiated when the template is dragged.
    pub expression: String,
    /// Position inside the palette content.
    pub origin: Point,
}

impl TemplateSpec {
    fn new(expression: &str, x: f64, y: f64) -> Self {
        Self {
            expression: expression.to_owned(),
            origin: Point::new(x, y),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    /// Screen width of the palette column; anything left of it counts as "over the palette".
    pub width: f64,
    pub templates: Vec<TemplateSpec>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            width: 200.0,
            templates: default_templates(),
        }
    }
}

/// Arithmetic, relational, logical and text-equality templates, top to bottom.
pub fn default_templates() -> Vec<TemplateSpec> {
    vec![
        TemplateSpec::new("NaN + NaN", 34.0, 12.0),
        TemplateSpec::new("NaN - NaN", 34.0, 60.0),
        TemplateSpec::new("NaN * NaN", 34.0, 108.0),
        TemplateSpec::new("NaN / NaN", 34.0, 156.0),
        TemplateSpec::new("NaN > NaN", 34.0, 204.0),
        TemplateSpec::new("NaN < NaN", 34.0, 252.0),
        TemplateSpec::new("NaN >= NaN", 34.0, 300.0),
        TemplateSpec::new("NaN <= NaN", 34.0, 348.0),
        TemplateSpec::new("NaN == NaN", 34.0, 396.0),
        TemplateSpec::new("NaN != NaN", 34.0, 444.0),
        TemplateSpec::new("true and true", 34.0, 492.0),
        TemplateSpec::new("true or true", 34.0, 568.0),
        TemplateSpec::new("true xor true", 34.0, 644.0),
        TemplateSpec::new("not true", 34.0, 720.0),
        TemplateSpec::new("equalText(\"\", \"\")", 34.0, 768.0),
    ]
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    /// Dropped expressions never land above this canvas-space y.
    pub min_drop_y: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { min_drop_y: 10.0 }
    }
}

/// How label widths are measured.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum MeasureConfig {
    /// `chars * em * font_px`; font independent.
    FixedAdvance { em: f64 },
    /// Shape with the font file at `path`.
    Font { path: PathBuf },
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self::FixedAdvance { em: 0.6 }
    }
}

impl BlocksConfig {
    pub fn from_json_str(s: &str) -> BlocksResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| BlocksError::config(format!("invalid config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> BlocksResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> BlocksResult<()> {
        let g = &self.geometry;
        for (name, v) in [
            ("text_height", g.text_height),
            ("op_text_width", g.op_text_width),
            ("min_text_width", g.min_text_width),
            ("label_font_px", g.label_font_px),
            ("op_font_px", g.op_font_px),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(BlocksError::config(format!(
                    "geometry.{name} must be finite and > 0"
                )));
            }
        }
        for (name, v) in [("padding", g.padding), ("line_width", g.line_width)] {
            if !v.is_finite() || v < 0.0 {
                return Err(BlocksError::config(format!(
                    "geometry.{name} must be finite and >= 0"
                )));
            }
        }
        if !self.palette.width.is_finite() || self.palette.width < 0.0 {
            return Err(BlocksError::config(
                "palette.width must be finite and >= 0",
            ));
        }
        for t in &self.palette.templates {
            if t.expression.trim().is_empty() {
                return Err(BlocksError::config("palette template must be non-empty"));
            }
            if !t.origin.x.is_finite() || !t.origin.y.is_finite() {
                return Err(BlocksError::config(format!(
                    "palette template '{}' has a non-finite origin",
                    t.expression
                )));
            }
        }
        if !self.canvas.min_drop_y.is_finite() {
            return Err(BlocksError::config("canvas.min_drop_y must be finite"));
        }
        if let MeasureConfig::FixedAdvance { em } = self.measure
            && (!em.is_finite() || em <= 0.0)
        {
            return Err(BlocksError::config("measure.em must be finite and > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
