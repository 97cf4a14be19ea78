//! Syntax tree for cfgl documents
//!
//! The parser produces a [`Script`]: the ordered list of top-level elements exactly as
//! written. Nothing is resolved at this stage; constant references stay as names with
//! their spans, and declarations have not been bound yet. The evaluator walks this tree to
//! produce values.
//!
//! Submodules:
//!     nodes: the tree itself
//!     location: byte-offset to line/column conversion

pub mod location;
pub mod nodes;

pub use location::{Position, SourceLocation};
pub use nodes::{Element, Node, Pair, Script};
