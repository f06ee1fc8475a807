//! Syntax trees of the defscript front-end.
//!
//! [source] is the tree the grammar parser produces, [target] is the estree
//! shaped tree the transform engine lowers it into. Both trees carry an
//! optional [SourceLocation] on every node.

pub mod literal;
pub mod loc;
pub mod operators;
pub mod source;
pub mod target;
pub mod visit;

pub use loc::{Located, Position, SourceLocation};
