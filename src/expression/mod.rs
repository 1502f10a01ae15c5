//! Parser and canonical serializer for the supported expression grammar.
//!
//! Parsing never preserves identity: every call builds a fresh tree. The canonical form
//! ([`Node::to_canonical`]) makes all grouping explicit, so re-parsing it reproduces the same text.

pub(crate) mod ast;
pub(crate) mod error;
pub(crate) mod lexer;
pub(crate) mod parser;

pub use ast::{Node, Op, Value};
pub use error::ParseError;
pub use parser::parse;
