//! # cfgl
//!
//! A compiler for the cfgl configuration language.
//!
//! Source text is lexed, parsed into a syntax tree, evaluated against a constant table and
//! assembled into a single document value, which is then rendered by one of the registered
//! formats (YAML by default).

pub mod cfgl;

pub use cfgl::processor::{compile, Compilation, CompileError, CompileOptions};
pub use cfgl::value::{Map, Value};
