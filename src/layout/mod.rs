//! Expression → nested block layout.
//!
//! One pass parses the text, walks the tree top-down, builds every child block before its parent
//! (composite sizes depend on child sizes) and records a structural address per block.

pub(crate) mod block;
pub(crate) mod geometry;
pub(crate) mod infer;
pub(crate) mod measure;
pub(crate) mod walker;
