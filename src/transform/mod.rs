//! Path-addressed expression rewriting.
//!
//! A block's [`StructuralAddress`] is recorded by the layout pass; [`transform`] replays it against
//! a fresh parse of the owning expression and splices in a replacement.

pub(crate) mod address;
pub(crate) mod rewrite;
