//! Palette, canvas and the drag/drop session that edits placed expressions.

pub(crate) mod canvas;
pub(crate) mod palette;
pub(crate) mod placed;
pub(crate) mod session;
pub(crate) mod viewport;
