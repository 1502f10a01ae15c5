//! Exprblocks turns algebraic/boolean expressions into nested, draggable blocks.
//!
//! - [`LayoutEngine::layout`] parses a string and computes the block tree, with a structural
//!   address on every block.
//! - [`transform`] replaces the sub-expression an address points at and returns the new text.
//! - [`Session`] holds a palette of templates and a canvas of placed expressions, and turns
//!   pointer events into drags, collisions and merges.
//! - [`session_scene`] / [`to_svg`] / [`svg_to_png`] render what a session shows.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod expression;
pub(crate) mod interaction;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod transform;

pub use crate::foundation::config::{
    BlocksConfig, CanvasConfig, GeometryConfig, MeasureConfig, PaletteConfig, TemplateSpec,
    default_templates,
};
pub use crate::foundation::core::{Point, Rect, Rgb, Size, Vec2};
pub use crate::foundation::error::{BlocksError, BlocksResult};
pub use crate::foundation::ids::{BlockId, PlacedId};

pub use crate::expression::{Node, Op, ParseError, Value, parse};

pub use crate::layout::block::{
    Arrangement, BlockFlags, BlockShape, BlockTree, BranchShape, Highlight, Hole, LeafShape,
    Tint, VisualBlock,
};
pub use crate::layout::infer::{EQUALITY_TEXT_FUNCTIONS, ResultType, infer_slot_type};
pub use crate::layout::measure::{FixedAdvance, FontMeasure, TextMeasure, measure_from_config};
pub use crate::layout::walker::LayoutEngine;

pub use crate::transform::address::{AddressStep, Slot, StructuralAddress};
pub use crate::transform::rewrite::transform;

pub use crate::interaction::canvas::{CanvasEntry, CanvasLayout, LeafRef};
pub use crate::interaction::palette::Palette;
pub use crate::interaction::placed::{PlacedExpression, PlacedExpressions};
pub use crate::interaction::session::{
    Collision, DragSource, DragState, DropOutcome, PointerEvent, Session,
};
pub use crate::interaction::viewport::Viewport;

pub use crate::render::raster::{rasterize_svg, svg_to_png};
pub use crate::render::scene::{
    BACKGROUND_FILL, DIVIDER_COLOR, DisplayList, Primitive, session_scene, tree_scene,
};
pub use crate::render::svg::to_svg;
