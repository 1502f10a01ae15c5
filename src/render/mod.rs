//! Drawing: block trees flattened into a display list, written out as SVG or PNG.

pub(crate) mod raster;
pub(crate) mod scene;
pub(crate) mod svg;
