//! Output formats for compiled documents
//!
//! This module contains the format implementations and the registry that looks them up
//! by name:
//! - `yaml`: block-style YAML via serde_yaml (the default)
//! - `json`: pretty-printed JSON via serde_json
//! - `treeviz`: a tree view of the document for inspection
//! - `cfgl`: cfgl source that compiles back to the same document

pub mod json;
pub mod registry;
pub mod source;
pub mod treeviz;
pub mod yaml;

pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use source::{to_source_str, SourceFormatter};
pub use treeviz::{script_to_treeviz_str, to_treeviz_str, TreevizFormatter};
pub use yaml::{to_yaml_str, YamlFormatter};

use once_cell::sync::Lazy;

/// Registry holding the built-in formats
pub static DEFAULT_REGISTRY: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::with_defaults);

/// Serialize `value` with one of the built-in formats
pub fn serialize(value: &crate::cfgl::value::Value, format: &str) -> Result<String, FormatError> {
    DEFAULT_REGISTRY.serialize(value, format)
}
